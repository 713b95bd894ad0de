use super::Error;

/// Error when a record type without an identifiable primary key is used
/// where one is required.
#[derive(Debug)]
pub(super) struct MissingPrimaryKey {
    record: Box<str>,
}

impl std::error::Error for MissingPrimaryKey {}

impl core::fmt::Display for MissingPrimaryKey {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "primary key cannot be found in `{}`", self.record)
    }
}

impl Error {
    /// Creates a missing primary key error.
    pub fn missing_primary_key(record: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MissingPrimaryKey(MissingPrimaryKey {
            record: record.into().into(),
        }))
    }

    /// Returns `true` if this error is a missing primary key error.
    pub fn is_missing_primary_key(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MissingPrimaryKey(_))
    }
}
