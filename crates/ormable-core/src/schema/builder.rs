use super::{
    naming, AssociationOptions, BelongsTo, BelongsToOptions, ColumnTag, DeclaredField, Field,
    FieldDecl, HasMany, HasManyOptions, HasOne, HasOneOptions, ManyToMany, ManyToManyOptions,
    Message, RecordType, Registry, Relation, Scalar, TypeRef,
};
use crate::{Error, Result, Settings};

use indexmap::IndexMap;
use std::collections::BTreeMap;

/// Tracks state while a registry is built.
pub(crate) struct Builder<'a> {
    settings: &'a Settings,

    /// Record types keyed by origin name
    types: IndexMap<String, RecordType>,
}

/// Relation families counted separately when computing a field's dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Has,
    BelongsTo,
    ManyToMany,
}

/// The key a has-one / has-many / belongs-to relation points at.
struct AssociationKey {
    name: String,
    ty: TypeRef,
}

impl<'a> Builder<'a> {
    pub(crate) fn from_messages(settings: &'a Settings, messages: &[Message]) -> Result<Registry> {
        let mut builder = Builder {
            settings,
            types: IndexMap::new(),
        };

        // All ormable types must be known before any field is classified, a
        // field may reference a type declared later in the input.
        builder.register_types(messages)?;

        for message in messages.iter().filter(|message| message.options.ormable) {
            builder.register_fields(message)?;
        }

        for message in messages.iter().filter(|message| message.options.ormable) {
            builder.resolve_associations(message)?;
        }

        Ok(Registry {
            settings: settings.clone(),
            types: builder.types,
        })
    }

    fn register_types(&mut self, messages: &[Message]) -> Result<()> {
        for message in messages.iter().filter(|message| message.options.ormable) {
            if let Some(existing) = self.types.get(&message.name) {
                return Err(Error::duplicate_type(
                    &message.name,
                    &existing.package,
                    &message.package,
                ));
            }

            let declared = message
                .fields
                .iter()
                .map(|field| DeclaredField {
                    name: field.name.clone(),
                    ty: field.ty.clone(),
                })
                .collect();

            self.types.insert(
                message.name.clone(),
                RecordType {
                    name: self.settings.mapped_name(&message.name),
                    origin_name: message.name.clone(),
                    package: message.package.clone(),
                    multi_account: message.options.multi_account,
                    fields: BTreeMap::new(),
                    declared,
                },
            );
        }

        Ok(())
    }

    /// Registers every field that is not a relation to another ormable type.
    fn register_fields(&mut self, message: &Message) -> Result<()> {
        for decl in &message.fields {
            if decl.options.drop || self.relation_target(decl).is_some() {
                continue;
            }

            if let Some(target) = decl.ty.message_name() {
                if !self.settings.is_quiet() {
                    log::warn!(
                        "field `{}.{}` references `{target}`, which is not ormable; \
                         keeping it as a plain reference",
                        message.name,
                        decl.name
                    );
                }
            }

            let name = naming::field_name(&decl.name);
            let record = self.record_mut(&message.name);

            if let Some(existing) = record.fields.get(&name) {
                return Err(Error::schema_conflict(
                    &record.name,
                    &name,
                    &existing.ty,
                    &decl.ty,
                ));
            }

            let field =
                Field::new(name.clone(), decl.ty.clone()).with_tag(decl.options.tag.clone());
            record.fields.insert(name, field);
        }

        Ok(())
    }

    fn resolve_associations(&mut self, message: &Message) -> Result<()> {
        for decl in &message.fields {
            if decl.options.drop {
                continue;
            }

            let Some(target) = self.relation_target(decl) else {
                continue;
            };
            let target = target.to_string();
            let field_name = naming::field_name(&decl.name);
            let mapped = TypeRef::message(self.settings.mapped_name(&target));

            let (ty, relation, embedded) = if decl.is_embedded() {
                let ty = if decl.ty.is_list() {
                    TypeRef::list(mapped)
                } else {
                    TypeRef::nullable(mapped)
                };
                (ty, None, true)
            } else if decl.ty.is_list() {
                let relation = match &decl.options.association {
                    Some(AssociationOptions::ManyToMany(opts)) => {
                        self.many_to_many(message, decl, &field_name, &target, opts)?
                    }
                    Some(AssociationOptions::HasMany(opts)) => {
                        self.has_many(message, &field_name, &target, opts)?
                    }
                    _ => self.has_many(message, &field_name, &target, &HasManyOptions::default())?,
                };
                (TypeRef::list(mapped), Some(relation), false)
            } else {
                match &decl.options.association {
                    Some(AssociationOptions::BelongsTo(opts)) => {
                        let relation = self.belongs_to(message, &field_name, &target, opts)?;
                        (TypeRef::nullable(mapped), Some(relation), false)
                    }
                    Some(AssociationOptions::HasOne(opts)) => {
                        let relation = self.has_one(message, &field_name, &target, opts)?;
                        (TypeRef::nullable(mapped), Some(relation), false)
                    }
                    _ => {
                        let relation =
                            self.has_one(message, &field_name, &target, &HasOneOptions::default())?;
                        (TypeRef::nullable(mapped), Some(relation), false)
                    }
                }
            };

            log::debug!(
                "resolved `{}.{field_name}` -> `{target}`: {relation:?}",
                message.name
            );

            let record = self.record_mut(&message.name);

            // Only an empty slot or an untyped placeholder may take the
            // relation; literal fields and synthesized keys stay put.
            if let Some(existing) = record.fields.get(&field_name) {
                if !existing.ty.is_unknown() || existing.is_foreign_key() {
                    return Err(Error::schema_conflict(
                        &record.name,
                        &field_name,
                        &existing.ty,
                        &ty,
                    ));
                }
            }

            let field = Field {
                name: field_name.clone(),
                ty,
                tag: decl.options.tag.clone(),
                relation,
                embedded,
                parent_origin_name: None,
            };
            record.fields.insert(field_name, field);
        }

        Ok(())
    }

    fn has_one(
        &mut self,
        message: &Message,
        field_name: &str,
        target: &str,
        opts: &HasOneOptions,
    ) -> Result<Relation> {
        let parent = self.record(&message.name);
        let association_key =
            Self::association_key(parent, opts.association_foreign_key.as_deref())?;
        let foreign_key_ty = foreign_key_type(&association_key.ty, &opts.foreign_key_tag);

        let foreign_key = match &opts.foreign_key {
            Some(name) => naming::field_name(name),
            None => naming::has_foreign_key(
                &message.name,
                field_name,
                &association_key.name,
                self.dimension(message, target, Family::Has),
            ),
        };

        let child = self.record(target);
        if child.package != parent.package && !child.fields.contains_key(&foreign_key) {
            return Err(Error::illegal_cross_package_has_one(
                &child.name,
                &child.package,
                &parent.name,
                &foreign_key,
            ));
        }

        self.install_foreign_key(
            target,
            &foreign_key,
            foreign_key_ty,
            &opts.foreign_key_tag,
            &message.name,
        )?;

        Ok(Relation::HasOne(HasOne {
            target: target.to_string(),
            association_key: association_key.name,
            foreign_key,
            action: opts.action,
        }))
    }

    fn has_many(
        &mut self,
        message: &Message,
        field_name: &str,
        target: &str,
        opts: &HasManyOptions,
    ) -> Result<Relation> {
        let parent = self.record(&message.name);
        let association_key =
            Self::association_key(parent, opts.association_foreign_key.as_deref())?;
        let foreign_key_ty = foreign_key_type(&association_key.ty, &opts.foreign_key_tag);

        let foreign_key = match &opts.foreign_key {
            Some(name) => naming::field_name(name),
            None => naming::has_foreign_key(
                &message.name,
                field_name,
                &association_key.name,
                self.dimension(message, target, Family::Has),
            ),
        };

        let child = self.record(target);
        if child.package != parent.package && !child.fields.contains_key(&foreign_key) {
            return Err(Error::illegal_cross_package_has_many(
                &child.name,
                &child.package,
                &parent.name,
                &foreign_key,
            ));
        }

        self.install_foreign_key(
            target,
            &foreign_key,
            foreign_key_ty,
            &opts.foreign_key_tag,
            &message.name,
        )?;

        let position_field = match &opts.position_field {
            Some(name) => {
                let name = naming::field_name(name);
                self.install_position_field(target, &name, &opts.position_field_tag)?;
                Some(name)
            }
            None => None,
        };

        Ok(Relation::HasMany(HasMany {
            target: target.to_string(),
            association_key: association_key.name,
            foreign_key,
            position_field,
            action: opts.action,
        }))
    }

    fn belongs_to(
        &mut self,
        message: &Message,
        field_name: &str,
        target: &str,
        opts: &BelongsToOptions,
    ) -> Result<Relation> {
        // The referenced type owns the association key; the declaring type
        // receives the foreign key.
        let parent = self.record(target);
        let association_key =
            Self::association_key(parent, opts.association_foreign_key.as_deref())?;
        let foreign_key_ty = foreign_key_type(&association_key.ty, &opts.foreign_key_tag);

        let foreign_key = match &opts.foreign_key {
            Some(name) => naming::field_name(name),
            None => naming::belongs_to_foreign_key(
                target,
                field_name,
                &association_key.name,
                self.dimension(message, target, Family::BelongsTo),
            ),
        };

        self.install_foreign_key(
            &message.name,
            &foreign_key,
            foreign_key_ty,
            &opts.foreign_key_tag,
            target,
        )?;

        Ok(Relation::BelongsTo(BelongsTo {
            target: target.to_string(),
            association_key: association_key.name,
            foreign_key,
        }))
    }

    fn many_to_many(
        &self,
        message: &Message,
        decl: &FieldDecl,
        field_name: &str,
        target: &str,
        opts: &ManyToManyOptions,
    ) -> Result<Relation> {
        let owner = self.record(&message.name);
        let child = self.record(target);

        let own_foreign_key = Self::key_name(owner, opts.foreign_key.as_deref())?;
        let association_foreign_key =
            Self::key_name(child, opts.association_foreign_key.as_deref())?;

        let join_table = match &opts.join_table {
            Some(name) => naming::db_name(name),
            None => naming::join_table(
                &message.name,
                target,
                field_name,
                self.dimension(message, target, Family::ManyToMany),
            ),
        };

        let join_table_foreign_key = match &opts.join_table_foreign_key {
            Some(name) => naming::field_name(name),
            None => naming::join_table_foreign_key(&message.name, &own_foreign_key),
        };

        let join_table_association_foreign_key = match &opts.association_join_table_foreign_key {
            Some(name) => naming::field_name(name),
            None => naming::join_table_association_foreign_key(
                &message.name,
                target,
                field_name,
                &association_foreign_key,
            ),
        };

        log::debug!(
            "`{}.{}` joins through `{join_table}` ({join_table_foreign_key}, \
             {join_table_association_foreign_key})",
            message.name,
            decl.name
        );

        Ok(Relation::ManyToMany(ManyToMany {
            target: target.to_string(),
            own_foreign_key,
            association_foreign_key,
            join_table,
            join_table_foreign_key,
            join_table_association_foreign_key,
            action: opts.action,
        }))
    }

    /// Resolves the key a relation points at: the explicit override, which
    /// must exist on `record`, or its primary key.
    fn association_key(record: &RecordType, explicit: Option<&str>) -> Result<AssociationKey> {
        let field = match explicit {
            Some(name) => {
                let name = naming::field_name(name);
                record
                    .field(&name)
                    .ok_or_else(|| Error::missing_reference(&record.name, &name))?
            }
            None => record.primary_key()?,
        };

        Ok(AssociationKey {
            name: field.name.clone(),
            ty: field.ty.clone(),
        })
    }

    fn key_name(record: &RecordType, explicit: Option<&str>) -> Result<String> {
        Self::association_key(record, explicit).map(|key| key.name)
    }

    /// Inserts the foreign key `name` into `record`, or fills in / checks the
    /// field already there.
    fn install_foreign_key(
        &mut self,
        record: &str,
        name: &str,
        ty: TypeRef,
        tag: &ColumnTag,
        parent_origin_name: &str,
    ) -> Result<()> {
        let record = self.record_mut(record);

        match record.fields.get_mut(name) {
            None => {
                log::debug!("synthesized foreign key `{}.{name}`: {ty}", record.name);
                record
                    .fields
                    .insert(name.to_string(), Field::new(name, ty).with_tag(tag.clone()));
            }
            Some(existing) if existing.ty.is_unknown() => {
                log::debug!("filled in foreign key `{}.{name}`: {ty}", record.name);
                existing.ty = ty;
            }
            Some(existing) if existing.ty != ty => {
                return Err(Error::schema_conflict(&record.name, name, &existing.ty, &ty));
            }
            Some(_) => {}
        }

        if let Some(field) = record.fields.get_mut(name) {
            field.parent_origin_name = Some(parent_origin_name.to_string());
        }

        Ok(())
    }

    fn install_position_field(&mut self, record: &str, name: &str, tag: &ColumnTag) -> Result<()> {
        let record = self.record_mut(record);

        match record.fields.get(name) {
            None => {
                record.fields.insert(
                    name.to_string(),
                    Field::new(name, Scalar::I64.into()).with_tag(tag.clone()),
                );
            }
            Some(existing) if !existing.ty.is_integer() => {
                return Err(Error::schema_conflict(
                    &record.name,
                    name,
                    &existing.ty,
                    TypeRef::from(Scalar::I64),
                ));
            }
            Some(_) => {}
        }

        Ok(())
    }

    /// Number of sibling fields on `message` that reference `target` under the
    /// same relation family.
    fn dimension(&self, message: &Message, target: &str, family: Family) -> usize {
        message
            .fields
            .iter()
            .filter(|decl| !decl.options.drop && !decl.is_embedded())
            .filter(|decl| decl.ty.message_name() == Some(target))
            .filter(|decl| {
                let decl_family = if decl.is_belongs_to() {
                    Family::BelongsTo
                } else if decl.is_many_to_many() {
                    Family::ManyToMany
                } else {
                    Family::Has
                };
                decl_family == family
            })
            .count()
    }

    /// The ormable type a field references, if any.
    fn relation_target<'b>(&self, decl: &'b FieldDecl) -> Option<&'b str> {
        decl.ty
            .message_name()
            .filter(|name| self.types.contains_key(*name))
    }

    fn record(&self, name: &str) -> &RecordType {
        &self.types[name]
    }

    fn record_mut(&mut self, name: &str) -> &mut RecordType {
        &mut self.types[name]
    }
}

/// Derives a foreign key's type from the association key it references.
fn foreign_key_type(association_key: &TypeRef, tag: &ColumnTag) -> TypeRef {
    if tag.not_null {
        association_key.strip_nullable().clone()
    } else if association_key.is_nullable() || association_key.is_bytes() {
        association_key.clone()
    } else {
        TypeRef::nullable(association_key.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn foreign_key_type_derivation() {
        let not_null = ColumnTag::not_null();
        let none = ColumnTag::default();

        assert_eq!(
            foreign_key_type(&TypeRef::nullable(Scalar::I64), &not_null),
            TypeRef::from(Scalar::I64)
        );
        assert_eq!(
            foreign_key_type(&Scalar::I64.into(), &none),
            TypeRef::nullable(Scalar::I64)
        );
        assert_eq!(
            foreign_key_type(&TypeRef::nullable(Scalar::Uuid), &none),
            TypeRef::nullable(Scalar::Uuid)
        );
        assert_eq!(
            foreign_key_type(&Scalar::Bytes.into(), &none),
            TypeRef::from(Scalar::Bytes)
        );
    }
}
