use super::Value;

use indexmap::IndexMap;

/// A record instance: field values keyed by declared field name.
///
/// A field that is missing and a field holding [`Value::Null`] are both
/// treated as absent.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, handy when constructing nested values.
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Returns the value of `name`, or `None` when absent or null.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name).filter(|value| !value.is_null())
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.fields.get_mut(name).filter(|value| !value.is_null())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.fields.insert(name.to_string(), value.into());
    }

    /// Sets `name` to null.
    pub fn clear(&mut self, name: &str) {
        self.set(name, Value::Null);
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.fields.shift_remove(name)
    }

    pub fn record(&self, name: &str) -> Option<&Record> {
        self.get(name).and_then(Value::as_record)
    }

    pub fn record_mut(&mut self, name: &str) -> Option<&mut Record> {
        self.get_mut(name).and_then(Value::as_record_mut)
    }

    /// Returns the nested record `name`, replacing an absent or non-record
    /// value with an empty record first.
    pub fn record_or_default(&mut self, name: &str) -> &mut Record {
        let slot = self.fields.entry(name.to_string()).or_default();

        if !slot.is_record() {
            *slot = Value::Record(Record::new());
        }

        match slot {
            Value::Record(record) => record,
            _ => unreachable!(),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_reads_as_absent() {
        let mut record = Record::new().with("name", "Old");
        assert!(record.contains("name"));

        record.clear("name");
        assert!(!record.contains("name"));
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn record_or_default_replaces_non_records() {
        let mut record = Record::new().with("address", Value::Null);
        record.record_or_default("address").set("city", "A");

        assert_eq!(
            record.record("address"),
            Some(&Record::new().with("city", "A"))
        );
    }

    #[test]
    fn equality_ignores_field_order() {
        let a = Record::new().with("a", 1).with("b", 2);
        let b = Record::new().with("b", 2).with("a", 1);
        assert_eq!(a, b);
    }
}
