use super::{Field, TypeRef};
use crate::{Error, Result};

use std::collections::BTreeMap;

/// An ormable entity.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordType {
    /// Mapped name: the origin name followed by the configured suffix
    pub name: String,

    /// Name of the message the type was created from
    pub origin_name: String,

    pub package: String,

    /// Operations on this type are scoped by an account identifier
    pub multi_account: bool,

    /// Mapped fields, keyed (and therefore iterated) by name. Holds declared
    /// fields as well as every key synthesized by the association resolver.
    pub fields: BTreeMap<String, Field>,

    /// Fields of the originating message in declaration order, as they appear
    /// on record values.
    pub declared: Vec<DeclaredField>,
}

/// A field as declared on the originating message.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclaredField {
    pub name: String,
    pub ty: TypeRef,
}

impl RecordType {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.get_mut(name)
    }

    /// Iterates relation fields in name order.
    pub fn relations(&self) -> impl Iterator<Item = &Field> + '_ {
        self.fields.values().filter(|field| field.is_relation())
    }

    /// Finds the identity field without failing.
    ///
    /// A field tagged as primary key wins; otherwise a field named `id`
    /// (compared case-insensitively) is used.
    pub fn find_primary_key(&self) -> Option<&Field> {
        self.fields
            .values()
            .find(|field| field.is_primary_key())
            .or_else(|| {
                self.fields
                    .values()
                    .find(|field| field.name.eq_ignore_ascii_case("id"))
            })
    }

    /// Returns the identity field, failing if the type has none.
    pub fn primary_key(&self) -> Result<&Field> {
        self.find_primary_key()
            .ok_or_else(|| Error::missing_primary_key(&self.name))
    }

    pub fn has_primary_key(&self) -> bool {
        self.find_primary_key().is_some()
    }

    /// True if the originating message declares a field named `id`.
    pub fn has_id_field(&self) -> bool {
        self.declared
            .iter()
            .any(|field| field.name.eq_ignore_ascii_case("id"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnTag, Scalar};

    fn record(fields: Vec<Field>) -> RecordType {
        RecordType {
            name: "NoteORM".to_string(),
            origin_name: "Note".to_string(),
            package: "notes".to_string(),
            multi_account: false,
            declared: fields
                .iter()
                .map(|field| DeclaredField {
                    name: field.name.clone(),
                    ty: field.ty.clone(),
                })
                .collect(),
            fields: fields
                .into_iter()
                .map(|field| (field.name.clone(), field))
                .collect(),
        }
    }

    #[test]
    fn tagged_primary_key_wins_over_id() {
        let ty = record(vec![
            Field::new("Id", Scalar::I64.into()),
            Field::new("Slug", Scalar::String.into()).with_tag(ColumnTag::primary_key()),
        ]);

        assert_eq!(ty.primary_key().unwrap().name, "Slug");
    }

    #[test]
    fn id_is_matched_case_insensitively() {
        let ty = record(vec![
            Field::new("ID", Scalar::Uuid.into()),
            Field::new("Body", Scalar::String.into()),
        ]);

        assert_eq!(ty.primary_key().unwrap().name, "ID");
        assert!(ty.has_id_field());
    }

    #[test]
    fn missing_primary_key_only_fails_when_required() {
        let ty = record(vec![Field::new("Body", Scalar::String.into())]);

        assert!(!ty.has_primary_key());
        assert!(ty.primary_key().unwrap_err().is_missing_primary_key());
    }
}
