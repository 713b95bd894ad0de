use super::{Builder, Message, RecordType};
use crate::{Error, Result, Settings};

use indexmap::IndexMap;

/// Every ormable record type of a schema, fully resolved.
///
/// Built in two passes by [`Registry::from_messages`]; afterwards it is only
/// handed out by shared reference.
#[derive(Debug, Clone)]
pub struct Registry {
    pub(crate) settings: Settings,

    /// Record types keyed by origin name, in message order
    pub(crate) types: IndexMap<String, RecordType>,
}

impl Registry {
    /// Registers every ormable message and resolves all associations.
    ///
    /// Resolution is all-or-nothing: the first conflict aborts the run.
    pub fn from_messages(settings: &Settings, messages: &[Message]) -> Result<Registry> {
        Builder::from_messages(settings, messages)
    }

    /// Like [`Registry::from_messages`], reading the messages from a JSON
    /// array.
    #[cfg(feature = "serde")]
    pub fn from_json(settings: &Settings, src: &str) -> Result<Registry> {
        let messages: Vec<Message> = serde_json::from_str(src)?;
        Self::from_messages(settings, &messages)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn types(&self) -> impl ExactSizeIterator<Item = &RecordType> + '_ {
        self.types.values()
    }

    /// Looks a record type up by origin name or by mapped name.
    pub fn get(&self, name: &str) -> Option<&RecordType> {
        self.types.get(name).or_else(|| {
            let origin = name.strip_suffix(self.settings.get_orm_suffix())?;
            self.types.get(origin)
        })
    }

    /// Like [`Registry::get`], failing for names that are not ormable.
    pub fn record(&self, name: &str) -> Result<&RecordType> {
        self.get(name).ok_or_else(|| Error::unknown_type(name))
    }

    pub fn is_ormable(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}
