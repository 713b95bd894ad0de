use super::Error;

/// Error when an operation is requested for a record type that cannot support
/// it, e.g. batch patching a multi-account type that has no `Id` field.
#[derive(Debug)]
pub(super) struct Unsupported {
    message: Box<str>,
}

impl std::error::Error for Unsupported {}

impl core::fmt::Display for Unsupported {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unsupported: {}", self.message)
    }
}

impl Error {
    /// Creates an unsupported operation error.
    pub fn unsupported(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Unsupported(Unsupported {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an unsupported operation error.
    pub fn is_unsupported(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Unsupported(_))
    }
}
