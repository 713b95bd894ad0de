use super::{ColumnTag, Relation, TypeRef};

/// One column or relation slot on a [`RecordType`](super::RecordType).
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Field name, folded to upper camel case
    pub name: String,

    pub ty: TypeRef,

    pub tag: ColumnTag,

    /// Resolved relation, set by the association resolver
    pub relation: Option<Relation>,

    /// Inline composition of another ormable type; no key is involved
    pub embedded: bool,

    /// Set on synthesized foreign keys: the origin name of the type whose
    /// relation introduced the key
    pub parent_origin_name: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Field {
        Field {
            name: name.into(),
            ty,
            tag: ColumnTag::default(),
            relation: None,
            embedded: false,
            parent_origin_name: None,
        }
    }

    pub fn with_tag(mut self, tag: ColumnTag) -> Field {
        self.tag = tag;
        self
    }

    pub fn is_primary_key(&self) -> bool {
        self.tag.primary_key
    }

    pub fn is_relation(&self) -> bool {
        self.relation.is_some()
    }

    /// True if the field was synthesized (or filled in) as a foreign key for
    /// a relation declared on another type.
    pub fn is_foreign_key(&self) -> bool {
        self.parent_origin_name.is_some()
    }
}
