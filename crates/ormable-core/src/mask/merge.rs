use crate::{
    value::{Record, Value},
    Error, Result,
};

/// Copies the values named by `mask` from `src` into `dst`.
///
/// Each path is walked segment by segment through nested records, creating
/// missing intermediate records in `dst`. A value absent from `src` is
/// removed from `dst`. The merge knows nothing about the schema; it only
/// fails on malformed paths or when a path descends into a non-record value.
pub fn merge_with_mask<S: AsRef<str>>(src: &Record, dst: &mut Record, mask: &[S]) -> Result<()> {
    for path in mask {
        let path = path.as_ref();
        let segments: Vec<&str> = path.split('.').collect();

        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(Error::invalid_argument(format!(
                "malformed field mask path `{path}`"
            )));
        }

        merge_path(src, dst, path, &segments)?;
    }

    Ok(())
}

fn merge_path(src: &Record, dst: &mut Record, path: &str, segments: &[&str]) -> Result<()> {
    match segments {
        [] => Ok(()),
        [leaf] => {
            match src.get(leaf) {
                Some(value) => dst.set(leaf, value.clone()),
                None => {
                    dst.remove(leaf);
                }
            }
            Ok(())
        }
        [head, rest @ ..] => match src.get(head) {
            Some(Value::Record(src)) => merge_path(src, dst.record_or_default(head), path, rest),
            Some(_) => Err(Error::invalid_argument(format!(
                "field mask path `{path}` descends into `{head}`, which is not a record"
            ))),
            None => {
                dst.remove(head);
                Ok(())
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std_util::assert_err_is;

    fn address(city: &str, zip: &str) -> Record {
        Record::new().with("city", city).with("zip", zip)
    }

    #[test]
    fn copies_named_leaves_only() {
        let src = address("B", "2");
        let mut dst = address("A", "1");

        merge_with_mask(&src, &mut dst, &["city"]).unwrap();
        assert_eq!(dst, address("B", "1"));
    }

    #[test]
    fn creates_intermediate_records() {
        let src = Record::new().with("geo", Record::new().with("lat", 1.5));
        let mut dst = Record::new();

        merge_with_mask(&src, &mut dst, &["geo.lat"]).unwrap();
        assert_eq!(dst, src);
    }

    #[test]
    fn absent_source_leaf_is_removed() {
        let src = Record::new().with("city", "B");
        let mut dst = address("A", "1");

        merge_with_mask(&src, &mut dst, &["zip"]).unwrap();
        assert_eq!(dst, Record::new().with("city", "A"));
    }

    #[test]
    fn empty_mask_copies_nothing() {
        let src = address("B", "2");
        let mut dst = address("A", "1");

        merge_with_mask::<&str>(&src, &mut dst, &[]).unwrap();
        assert_eq!(dst, address("A", "1"));
    }

    #[test]
    fn rejects_bad_paths() {
        let src = address("B", "2");
        let mut dst = Record::new();

        assert_err_is!(merge_with_mask(&src, &mut dst, &["city."]), is_invalid_argument);
        assert_err_is!(merge_with_mask(&src, &mut dst, &["city.name"]), is_invalid_argument);
    }
}
