use super::AssociationAction;

/// A resolved relation. Every key named here exists as a concrete field on the
/// record type it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum Relation {
    HasOne(HasOne),
    HasMany(HasMany),
    BelongsTo(BelongsTo),
    ManyToMany(ManyToMany),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HasOne {
    /// Child type (origin name)
    pub target: String,

    /// Key on the parent
    pub association_key: String,

    /// Key on the child
    pub foreign_key: String,

    pub action: Option<AssociationAction>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HasMany {
    /// Child type (origin name)
    pub target: String,

    /// Key on the parent
    pub association_key: String,

    /// Key on the child
    pub foreign_key: String,

    /// Integer field on the child recording item order
    pub position_field: Option<String>,

    pub action: Option<AssociationAction>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BelongsTo {
    /// Owner type (origin name)
    pub target: String,

    /// Key on the owner
    pub association_key: String,

    /// Key on the declaring type
    pub foreign_key: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ManyToMany {
    /// Associated type (origin name)
    pub target: String,

    /// Key on the declaring type
    pub own_foreign_key: String,

    /// Key on the associated type
    pub association_foreign_key: String,

    pub join_table: String,

    /// Join-table column referencing the declaring type
    pub join_table_foreign_key: String,

    /// Join-table column referencing the associated type
    pub join_table_association_foreign_key: String,

    pub action: Option<AssociationAction>,
}

impl Relation {
    pub fn target(&self) -> &str {
        match self {
            Relation::HasOne(rel) => &rel.target,
            Relation::HasMany(rel) => &rel.target,
            Relation::BelongsTo(rel) => &rel.target,
            Relation::ManyToMany(rel) => &rel.target,
        }
    }

    pub fn as_has_one(&self) -> Option<&HasOne> {
        match self {
            Relation::HasOne(rel) => Some(rel),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_has_one(&self) -> &HasOne {
        match self {
            Relation::HasOne(rel) => rel,
            _ => panic!("expected has-one relation, but was {self:?}"),
        }
    }

    pub fn as_has_many(&self) -> Option<&HasMany> {
        match self {
            Relation::HasMany(rel) => Some(rel),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_has_many(&self) -> &HasMany {
        match self {
            Relation::HasMany(rel) => rel,
            _ => panic!("expected has-many relation, but was {self:?}"),
        }
    }

    pub fn as_belongs_to(&self) -> Option<&BelongsTo> {
        match self {
            Relation::BelongsTo(rel) => Some(rel),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_belongs_to(&self) -> &BelongsTo {
        match self {
            Relation::BelongsTo(rel) => rel,
            _ => panic!("expected belongs-to relation, but was {self:?}"),
        }
    }

    pub fn as_many_to_many(&self) -> Option<&ManyToMany> {
        match self {
            Relation::ManyToMany(rel) => Some(rel),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_many_to_many(&self) -> &ManyToMany {
        match self {
            Relation::ManyToMany(rel) => rel,
            _ => panic!("expected many-to-many relation, but was {self:?}"),
        }
    }
}
