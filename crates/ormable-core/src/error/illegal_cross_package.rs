use super::Error;

/// Error when a has-one or has-many relation would have to synthesize a
/// foreign key on a record type owned by another package.
///
/// The child's package cannot be mutated from the parent's schema, so the key
/// must be declared on the child explicitly (or the relation changed to
/// belongs-to / many-to-many).
#[derive(Debug)]
pub(super) struct IllegalCrossPackage {
    child: Box<str>,
    child_package: Box<str>,
    parent: Box<str>,
    relation: &'static str,
    foreign_key: Box<str>,
    alternative: &'static str,
}

impl std::error::Error for IllegalCrossPackage {}

impl core::fmt::Display for IllegalCrossPackage {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "object `{}` from package `{}` cannot be used for {} in `{}` since it does not \
             have FK `{}` defined; manually define the key, or switch to {}",
            self.child,
            self.child_package,
            self.relation,
            self.parent,
            self.foreign_key,
            self.alternative,
        )
    }
}

impl Error {
    /// Creates an illegal cross-package synthesis error for a has-one relation.
    pub fn illegal_cross_package_has_one(
        child: impl Into<String>,
        child_package: impl Into<String>,
        parent: impl Into<String>,
        foreign_key: impl Into<String>,
    ) -> Error {
        Error::illegal_cross_package(
            child.into(),
            child_package.into(),
            parent.into(),
            "has-one",
            foreign_key.into(),
            "belongs-to",
        )
    }

    /// Creates an illegal cross-package synthesis error for a has-many relation.
    pub fn illegal_cross_package_has_many(
        child: impl Into<String>,
        child_package: impl Into<String>,
        parent: impl Into<String>,
        foreign_key: impl Into<String>,
    ) -> Error {
        Error::illegal_cross_package(
            child.into(),
            child_package.into(),
            parent.into(),
            "has-many",
            foreign_key.into(),
            "many-to-many",
        )
    }

    fn illegal_cross_package(
        child: String,
        child_package: String,
        parent: String,
        relation: &'static str,
        foreign_key: String,
        alternative: &'static str,
    ) -> Error {
        Error::from(super::ErrorKind::IllegalCrossPackage(IllegalCrossPackage {
            child: child.into(),
            child_package: child_package.into(),
            parent: parent.into(),
            relation,
            foreign_key: foreign_key.into(),
            alternative,
        }))
    }

    /// Returns `true` if this error is an illegal cross-package synthesis error.
    pub fn is_illegal_cross_package(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::IllegalCrossPackage(_))
    }
}
