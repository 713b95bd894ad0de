#[macro_use]
mod error;
pub use error::Error;

pub mod mask;
pub use mask::{apply_mask, apply_mask_set, merge_with_mask};

pub mod schema;
pub use schema::Registry;

mod settings;
pub use settings::Settings;

pub mod value;
pub use value::{Record, Value};

/// A Result type alias that uses this crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
