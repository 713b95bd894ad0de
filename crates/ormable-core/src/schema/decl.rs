//! Schema declarations handed over by the schema front end.
//!
//! These mirror the message and field options of the input schema language.
//! They are consumed by [`Registry::from_messages`](super::Registry::from_messages)
//! and never mutated.

use super::{ColumnTag, TypeRef};

#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Message {
    /// Message type name, e.g. `Order`
    pub name: String,

    /// Package owning the message. Relations may not synthesize keys across
    /// package boundaries.
    pub package: String,

    pub options: MessageOptions,

    /// Fields in declaration order
    pub fields: Vec<FieldDecl>,
}

#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MessageOptions {
    /// Map the message to a relational entity
    pub ormable: bool,

    /// Scope generated operations by an account identifier
    pub multi_account: bool,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldDecl {
    pub name: String,

    pub ty: TypeRef,

    #[cfg_attr(feature = "serde", serde(default))]
    pub options: FieldOptions,
}

#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FieldOptions {
    /// Exclude the field from the mapping entirely
    pub drop: bool,

    pub tag: ColumnTag,

    /// Explicit relation kind. Absent means the kind is inferred from the
    /// field's type.
    pub association: Option<AssociationOptions>,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AssociationOptions {
    HasOne(HasOneOptions),
    HasMany(HasManyOptions),
    BelongsTo(BelongsToOptions),
    ManyToMany(ManyToManyOptions),
    Embedded,
}

#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HasOneOptions {
    pub foreign_key: Option<String>,
    pub foreign_key_tag: ColumnTag,
    pub association_foreign_key: Option<String>,
    pub action: Option<AssociationAction>,
}

#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HasManyOptions {
    pub foreign_key: Option<String>,
    pub foreign_key_tag: ColumnTag,
    pub association_foreign_key: Option<String>,

    /// Child field keeping the position of each item for stable ordering
    pub position_field: Option<String>,
    pub position_field_tag: ColumnTag,

    pub action: Option<AssociationAction>,
}

#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BelongsToOptions {
    pub foreign_key: Option<String>,
    pub foreign_key_tag: ColumnTag,
    pub association_foreign_key: Option<String>,
}

#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ManyToManyOptions {
    pub foreign_key: Option<String>,
    pub association_foreign_key: Option<String>,
    pub join_table: Option<String>,
    pub join_table_foreign_key: Option<String>,
    pub association_join_table_foreign_key: Option<String>,
    pub action: Option<AssociationAction>,
}

/// How a strict update treats the existing children of a relation before
/// saving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AssociationAction {
    Clear,
    Append,
    Replace,
}

impl Message {
    pub fn new(name: impl Into<String>, package: impl Into<String>) -> Message {
        Message {
            name: name.into(),
            package: package.into(),
            options: MessageOptions::default(),
            fields: vec![],
        }
    }

    pub fn ormable(mut self) -> Message {
        self.options.ormable = true;
        self
    }

    pub fn multi_account(mut self) -> Message {
        self.options.multi_account = true;
        self
    }

    pub fn field(mut self, field: FieldDecl) -> Message {
        self.fields.push(field);
        self
    }
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeRef>) -> FieldDecl {
        FieldDecl {
            name: name.into(),
            ty: ty.into(),
            options: FieldOptions::default(),
        }
    }

    pub fn tag(mut self, tag: ColumnTag) -> FieldDecl {
        self.options.tag = tag;
        self
    }

    pub fn association(mut self, association: AssociationOptions) -> FieldDecl {
        self.options.association = Some(association);
        self
    }

    pub fn dropped(mut self) -> FieldDecl {
        self.options.drop = true;
        self
    }

    pub(crate) fn is_belongs_to(&self) -> bool {
        matches!(self.options.association, Some(AssociationOptions::BelongsTo(_)))
    }

    pub(crate) fn is_many_to_many(&self) -> bool {
        matches!(self.options.association, Some(AssociationOptions::ManyToMany(_)))
    }

    pub(crate) fn is_embedded(&self) -> bool {
        matches!(self.options.association, Some(AssociationOptions::Embedded))
    }
}
