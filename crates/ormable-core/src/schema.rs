mod builder;
use builder::Builder;

pub mod cleanup;
pub use cleanup::{cleanup_plan, CleanupAction, CleanupStep, RemoveChildren};

mod decl;
pub use decl::{
    AssociationAction, AssociationOptions, BelongsToOptions, FieldDecl, FieldOptions,
    HasManyOptions, HasOneOptions, ManyToManyOptions, Message, MessageOptions,
};

mod field;
pub use field::Field;

pub mod naming;

mod record_type;
pub use record_type::{DeclaredField, RecordType};

mod registry;
pub use registry::Registry;

mod relation;
pub use relation::{BelongsTo, HasMany, HasOne, ManyToMany, Relation};

mod tag;
pub use tag::ColumnTag;

mod ty;
pub use ty::{Scalar, TypeRef};
