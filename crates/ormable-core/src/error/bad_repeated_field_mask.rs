use super::Error;

/// Error when a batch patch receives a different number of field masks than
/// objects.
#[derive(Debug)]
pub(super) struct BadRepeatedFieldMask {
    masks: usize,
    objects: usize,
}

impl std::error::Error for BadRepeatedFieldMask {}

impl core::fmt::Display for BadRepeatedFieldMask {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "bad repeated field mask: {} masks supplied for {} objects",
            self.masks, self.objects
        )
    }
}

impl Error {
    /// Creates a bad repeated field mask error.
    pub fn bad_repeated_field_mask(masks: usize, objects: usize) -> Error {
        Error::from(super::ErrorKind::BadRepeatedFieldMask(BadRepeatedFieldMask {
            masks,
            objects,
        }))
    }

    /// Returns `true` if this error is a bad repeated field mask error.
    pub fn is_bad_repeated_field_mask(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::BadRepeatedFieldMask(_))
    }
}
