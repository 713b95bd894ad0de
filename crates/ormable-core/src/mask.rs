//! Field-mask driven patching of record values.
//!
//! A mask is an ordered list of dotted paths, e.g. `["address.city", "name"]`.
//! [`apply_mask`] copies the selected values from a patcher into a patchee,
//! recursing relationally into ormable nested records and structurally (see
//! [`merge_with_mask`]) into opaque ones.
//!
//! # Path order
//!
//! When the first path below an ormable nested field `F` is found at index
//! `i`, the nested merge receives `mask[i..]`, every path from that point to
//! the end of the list. `F` is then marked as updated and later `F.` paths
//! are not looked at again. As a consequence:
//!
//! * `["address.city", "name", "address.zip"]` applies both nested paths.
//! * `["address.city", "address"]` first merges `city`, then the exact
//!   `address` path replaces the whole value, discarding that merge.
//! * `["address", "address.city"]` replaces the whole value; the nested path
//!   is ignored.

mod merge;
pub use merge::merge_with_mask;

use crate::{
    schema::{Registry, TypeRef},
    value::{Record, Value},
    Error, Result,
};

/// How the merge treats a declared field.
#[derive(Debug, Clone, Copy)]
enum Strategy<'a> {
    /// Singular reference to an ormable type, merged relationally
    Ormable(&'a str),

    /// Singular reference to a non-ormable message, merged structurally
    Opaque,

    /// Raw blob, replaced whole by any path naming it
    Blob,

    /// Replaced on an exact path match only
    Plain,
}

/// Applies `patcher` to `patchee` according to `mask`.
///
/// `type_name` names the ormable type of both records (origin or mapped
/// name). `prefix` is prepended to every field name when matching paths; it
/// is empty at the top level and `"{field}."` for nested calls.
///
/// Returns `Ok(None)` without touching anything when there is no patcher.
pub fn apply_mask<'a, S: AsRef<str>>(
    registry: &Registry,
    type_name: &str,
    patchee: Option<&'a mut Record>,
    patcher: Option<&Record>,
    mask: &[S],
    prefix: &str,
) -> Result<Option<&'a mut Record>> {
    let Some(patcher) = patcher else {
        return Ok(None);
    };
    let Some(patchee) = patchee else {
        return Err(Error::invalid_argument(format!(
            "patcher supplied for `{type_name}` without a patchee"
        )));
    };

    let record_type = registry.record(type_name)?;
    let fields: Vec<(&str, Strategy<'_>)> = record_type
        .declared
        .iter()
        .map(|field| (field.name.as_str(), strategy(registry, &field.ty)))
        .collect();
    let mut updated = vec![false; fields.len()];

    for (i, path) in mask.iter().enumerate() {
        let path = path.as_ref();
        let Some(rest) = path.strip_prefix(prefix) else {
            continue;
        };

        for (index, &(name, strategy)) in fields.iter().enumerate() {
            let exact = rest == name;
            let nested = rest
                .strip_prefix(name)
                .is_some_and(|tail| tail.starts_with('.'));

            match strategy {
                Strategy::Ormable(target) => {
                    if !updated[index] && nested {
                        updated[index] = true;

                        let Some(child_patcher) = patcher.record(name) else {
                            log::trace!("`{path}` clears `{type_name}.{name}`");
                            patchee.clear(name);
                            break;
                        };

                        log::trace!("`{path}` merges into `{type_name}.{name}`");
                        let child_prefix = format!("{prefix}{name}.");
                        apply_mask(
                            registry,
                            target,
                            Some(patchee.record_or_default(name)),
                            Some(child_patcher),
                            &mask[i..],
                            &child_prefix,
                        )?;
                        break;
                    }

                    if exact {
                        updated[index] = true;
                        replace(patchee, patcher, name, path, type_name);
                        break;
                    }
                }
                Strategy::Opaque => {
                    if !updated[index] && nested {
                        updated[index] = true;

                        let Some(src) = patcher.record(name) else {
                            log::trace!("`{path}` clears `{type_name}.{name}`");
                            patchee.clear(name);
                            break;
                        };

                        let field_prefix = format!("{prefix}{name}.");
                        let sub_mask: Vec<&str> = mask[i..]
                            .iter()
                            .filter_map(|path| path.as_ref().strip_prefix(field_prefix.as_str()))
                            .collect();

                        log::trace!("`{path}` merges {sub_mask:?} into `{type_name}.{name}`");
                        let dst = patchee.record_or_default(name);
                        merge_with_mask(src, dst, sub_mask.as_slice())?;
                        break;
                    }

                    if exact {
                        updated[index] = true;
                        replace(patchee, patcher, name, path, type_name);
                        break;
                    }
                }
                Strategy::Blob => {
                    if !updated[index] && rest.starts_with(name) {
                        updated[index] = true;
                        replace(patchee, patcher, name, path, type_name);
                        break;
                    }
                }
                Strategy::Plain => {
                    if exact {
                        replace(patchee, patcher, name, path, type_name);
                        break;
                    }
                }
            }
        }
    }

    Ok(Some(patchee))
}

/// Applies one mask per patcher, pairing `patchees[i]`, `patchers[i]` and
/// `masks[i]`.
///
/// Batch patching needs the type to be addressable by identity: it must
/// have a primary key, and a multi-account type must declare an `id` field.
pub fn apply_mask_set<'a, S: AsRef<str>>(
    registry: &Registry,
    type_name: &str,
    patchees: &'a mut [Record],
    patchers: &[Record],
    masks: &[Vec<S>],
) -> Result<&'a mut [Record]> {
    let record_type = registry.record(type_name)?;
    record_type.primary_key()?;

    if record_type.multi_account && !record_type.has_id_field() {
        return Err(Error::unsupported(format!(
            "`{}` is multi-account without an `id` field; batch patching is not available",
            record_type.name
        )));
    }

    if patchers.len() != masks.len() {
        return Err(Error::bad_repeated_field_mask(masks.len(), patchers.len()));
    }

    if patchees.len() != patchers.len() {
        return Err(Error::invalid_argument(format!(
            "{} patchers supplied for {} patchees",
            patchers.len(),
            patchees.len()
        )));
    }

    let items = patchees.iter_mut().zip(patchers).zip(masks).enumerate();
    for (i, ((patchee, patcher), mask)) in items {
        apply_mask(registry, type_name, Some(patchee), Some(patcher), mask.as_slice(), "")
            .map_err(|err| err.context(err!("patching object {i} of `{}`", record_type.name)))?;
    }

    Ok(patchees)
}

fn strategy<'a>(registry: &'a Registry, ty: &TypeRef) -> Strategy<'a> {
    let ty = ty.strip_nullable();

    if ty.is_list() {
        return Strategy::Plain;
    }

    if ty.is_blob() {
        return Strategy::Blob;
    }

    match ty {
        TypeRef::Message(name) => match registry.get(name) {
            Some(record_type) => Strategy::Ormable(&record_type.origin_name),
            None => Strategy::Opaque,
        },
        _ => Strategy::Plain,
    }
}

fn replace(patchee: &mut Record, patcher: &Record, name: &str, path: &str, type_name: &str) {
    log::trace!("`{path}` replaces `{type_name}.{name}`");
    let value = patcher.get(name).cloned().unwrap_or(Value::Null);
    patchee.set(name, value);
}
