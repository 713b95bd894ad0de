use super::Error;

/// Error when the resolver would install something that collides with an
/// existing registry entry.
///
/// This occurs when:
/// - A foreign key would be inserted into a record type that already declares
///   a field of that name with a different concrete type
/// - A has-many position field already exists with a non-integer type
/// - A relation field folds to the name of a field already on the record
/// - Two ormable messages share a name
#[derive(Debug)]
pub(super) struct SchemaConflict {
    conflict: Conflict,
}

#[derive(Debug)]
enum Conflict {
    Field {
        record: Box<str>,
        field: Box<str>,
        existing: Box<str>,
        incoming: Box<str>,
    },
    Type {
        name: Box<str>,
        existing_package: Box<str>,
        incoming_package: Box<str>,
    },
}

impl std::error::Error for SchemaConflict {}

impl core::fmt::Display for SchemaConflict {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match &self.conflict {
            Conflict::Field {
                record,
                field,
                existing,
                incoming,
            } => write!(
                f,
                "schema conflict: cannot include `{field}` into `{record}` as it already \
                 exists there with a different type: {existing}, {incoming}"
            ),
            Conflict::Type {
                name,
                existing_package,
                incoming_package,
            } => write!(
                f,
                "schema conflict: type `{name}` is declared in package `{existing_package}` \
                 and again in package `{incoming_package}`"
            ),
        }
    }
}

impl Error {
    /// Creates a schema conflict error.
    ///
    /// `existing` is the type already present on the record and `incoming` the
    /// type the resolver tried to install.
    pub fn schema_conflict(
        record: impl Into<String>,
        field: impl Into<String>,
        existing: impl core::fmt::Display,
        incoming: impl core::fmt::Display,
    ) -> Error {
        Error::from(super::ErrorKind::SchemaConflict(SchemaConflict {
            conflict: Conflict::Field {
                record: record.into().into(),
                field: field.into().into(),
                existing: existing.to_string().into(),
                incoming: incoming.to_string().into(),
            },
        }))
    }

    /// Creates a schema conflict error for an ormable type name registered
    /// twice.
    pub fn duplicate_type(
        name: impl Into<String>,
        existing_package: impl Into<String>,
        incoming_package: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::SchemaConflict(SchemaConflict {
            conflict: Conflict::Type {
                name: name.into().into(),
                existing_package: existing_package.into().into(),
                incoming_package: incoming_package.into().into(),
            },
        }))
    }

    /// Returns `true` if this error is a schema conflict error.
    pub fn is_schema_conflict(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::SchemaConflict(_))
    }
}
