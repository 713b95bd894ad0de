use super::{AssociationAction, Field, RecordType, Registry, Relation, TypeRef};
use crate::{Error, Result};

/// One step a strict update performs on a relation before saving the parent.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanupStep {
    /// Relation field on the parent
    pub field: String,

    pub action: CleanupAction,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CleanupAction {
    /// Delete every child whose foreign key matches the parent's key
    Remove(RemoveChildren),

    /// Detach all existing children
    Clear,

    /// Add the incoming children, keeping existing ones
    Append,

    /// Replace existing children with the incoming ones
    Replace,
}

/// Filter used to delete the children of a has-one / has-many relation.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoveChildren {
    /// Mapped name of the child type
    pub child: String,

    pub foreign_key: String,
    pub foreign_key_ty: TypeRef,

    /// Key on the parent providing the filter value; must be set
    pub association_key: String,
    pub association_key_ty: TypeRef,
}

impl From<AssociationAction> for CleanupAction {
    fn from(value: AssociationAction) -> Self {
        match value {
            AssociationAction::Clear => CleanupAction::Clear,
            AssociationAction::Append => CleanupAction::Append,
            AssociationAction::Replace => CleanupAction::Replace,
        }
    }
}

/// Lists the child-association steps of a strict update on `type_name`, in
/// relation field name order.
///
/// Has-one and has-many relations default to removing the existing children;
/// many-to-many relations default to replacing the join rows. Belongs-to and
/// embedded fields need no step.
pub fn cleanup_plan(registry: &Registry, type_name: &str) -> Result<Vec<CleanupStep>> {
    let parent = registry.record(type_name)?;
    let mut steps = vec![];

    for field in parent.relations() {
        let Some(relation) = &field.relation else {
            continue;
        };

        let action = match relation {
            Relation::HasOne(rel) => match rel.action {
                Some(action) => action.into(),
                None => remove_children(
                    registry,
                    parent,
                    &rel.target,
                    &rel.foreign_key,
                    &rel.association_key,
                )?,
            },
            Relation::HasMany(rel) => match rel.action {
                Some(action) => action.into(),
                None => remove_children(
                    registry,
                    parent,
                    &rel.target,
                    &rel.foreign_key,
                    &rel.association_key,
                )?,
            },
            Relation::ManyToMany(rel) => rel
                .action
                .map(CleanupAction::from)
                .unwrap_or(CleanupAction::Replace),
            Relation::BelongsTo(_) => continue,
        };

        steps.push(CleanupStep {
            field: field.name.clone(),
            action,
        });
    }

    Ok(steps)
}

fn remove_children(
    registry: &Registry,
    parent: &RecordType,
    target: &str,
    foreign_key: &str,
    association_key: &str,
) -> Result<CleanupAction> {
    let child = registry.record(target)?;
    let foreign_key = expect_field(child, foreign_key)?;
    let association_key = expect_field(parent, association_key)?;

    Ok(CleanupAction::Remove(RemoveChildren {
        child: child.name.clone(),
        foreign_key: foreign_key.name.clone(),
        foreign_key_ty: foreign_key.ty.clone(),
        association_key: association_key.name.clone(),
        association_key_ty: association_key.ty.clone(),
    }))
}

fn expect_field<'a>(record: &'a RecordType, name: &str) -> Result<&'a Field> {
    record
        .field(name)
        .ok_or_else(|| Error::missing_reference(&record.name, name))
}
