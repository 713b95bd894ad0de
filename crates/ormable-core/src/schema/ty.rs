use std::fmt;

/// The semantic type of a declared or synthesized field.
///
/// Nullability and list-ness are carried structurally, so classification
/// never has to inspect type names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TypeRef {
    Scalar(Scalar),

    /// A value that may be absent.
    Nullable(Box<TypeRef>),

    /// A repeated value.
    List(Box<TypeRef>),

    /// Reference to another message type by name. Whether this is a relation
    /// depends on the referenced type being registered as ormable.
    Message(String),

    /// Reference to an enum type by name.
    Enum(String),

    /// Placeholder declared by the user, filled in by the association
    /// resolver when a foreign key lands on it.
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Scalar {
    Bool,
    I32,
    I64,
    U32,
    U64,
    F32,
    F64,
    String,
    Bytes,
    Uuid,
    Timestamp,

    /// Opaque serialized value stored as a single column.
    Json,
}

impl TypeRef {
    pub fn nullable(ty: impl Into<TypeRef>) -> TypeRef {
        TypeRef::Nullable(Box::new(ty.into()))
    }

    pub fn list(ty: impl Into<TypeRef>) -> TypeRef {
        TypeRef::List(Box::new(ty.into()))
    }

    pub fn message(name: impl Into<String>) -> TypeRef {
        TypeRef::Message(name.into())
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, TypeRef::Nullable(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, TypeRef::List(_))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, TypeRef::Unknown)
    }

    pub fn is_bytes(&self) -> bool {
        matches!(self, TypeRef::Scalar(Scalar::Bytes))
    }

    /// True for integer scalars, nullable or not.
    pub fn is_integer(&self) -> bool {
        match self.strip_nullable() {
            TypeRef::Scalar(scalar) => scalar.is_integer(),
            _ => false,
        }
    }

    /// Removes one level of `Nullable`, if present.
    pub fn strip_nullable(&self) -> &TypeRef {
        match self {
            TypeRef::Nullable(inner) => &**inner,
            ty => ty,
        }
    }

    /// Removes every `List` and `Nullable` wrapper, yielding the element type.
    pub fn element(&self) -> &TypeRef {
        match self {
            TypeRef::Nullable(inner) | TypeRef::List(inner) => inner.element(),
            ty => ty,
        }
    }

    /// The referenced message name, looking through wrappers.
    pub fn message_name(&self) -> Option<&str> {
        match self.element() {
            TypeRef::Message(name) => Some(name),
            _ => None,
        }
    }

    /// True if the type is a raw blob column that is always replaced whole.
    pub fn is_blob(&self) -> bool {
        matches!(self.strip_nullable(), TypeRef::Scalar(Scalar::Json))
    }
}

impl Scalar {
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Scalar::I32 | Scalar::I64 | Scalar::U32 | Scalar::U64
        )
    }
}

impl From<Scalar> for TypeRef {
    fn from(value: Scalar) -> Self {
        TypeRef::Scalar(value)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Scalar(scalar) => write!(f, "{scalar:?}"),
            TypeRef::Nullable(inner) => write!(f, "Option<{inner}>"),
            TypeRef::List(inner) => write!(f, "List<{inner}>"),
            TypeRef::Message(name) => f.write_str(name),
            TypeRef::Enum(name) => write!(f, "enum {name}"),
            TypeRef::Unknown => f.write_str("_"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_strips_all_wrappers() {
        let ty = TypeRef::list(TypeRef::nullable(TypeRef::message("Address")));
        assert_eq!(ty.element(), &TypeRef::message("Address"));
        assert_eq!(ty.message_name(), Some("Address"));
    }

    #[test]
    fn display() {
        assert_eq!(TypeRef::nullable(Scalar::I64).to_string(), "Option<I64>");
        assert_eq!(TypeRef::list(TypeRef::message("Tag")).to_string(), "List<Tag>");
    }

    #[test]
    fn integers() {
        assert!(TypeRef::nullable(Scalar::U32).is_integer());
        assert!(!TypeRef::Scalar(Scalar::String).is_integer());
    }
}
