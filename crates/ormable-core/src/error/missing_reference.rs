use super::Error;

/// Error when an explicit key override names a field the target record type
/// does not have.
#[derive(Debug)]
pub(super) struct MissingReference {
    record: Box<str>,
    field: Box<str>,
}

impl std::error::Error for MissingReference {}

impl core::fmt::Display for MissingReference {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "missing field `{}` in `{}`", self.field, self.record)
    }
}

impl Error {
    /// Creates a missing reference error.
    pub fn missing_reference(record: impl Into<String>, field: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MissingReference(MissingReference {
            record: record.into().into(),
            field: field.into().into(),
        }))
    }

    /// Returns `true` if this error is a missing reference error.
    pub fn is_missing_reference(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MissingReference(_))
    }
}
