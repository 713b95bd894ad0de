/// Options controlling how a schema is resolved.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Settings {
    /// Appended to a message name to form the mapped type name
    orm_suffix: String,

    /// Suppress warnings
    quiet: bool,
}

impl Settings {
    pub fn new() -> Self {
        Self {
            orm_suffix: "ORM".to_string(),
            quiet: false,
        }
    }

    pub fn orm_suffix(&mut self, suffix: &str) -> &mut Self {
        self.orm_suffix = suffix.to_string();
        self
    }

    pub fn quiet(&mut self, quiet: bool) -> &mut Self {
        self.quiet = quiet;
        self
    }

    pub fn get_orm_suffix(&self) -> &str {
        &self.orm_suffix
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Mapped type name for the message `origin`.
    pub fn mapped_name(&self, origin: &str) -> String {
        format!("{origin}{}", self.orm_suffix)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.mapped_name("Order"), "OrderORM");
        assert!(!settings.is_quiet());
    }

    #[test]
    fn builder_setters() {
        let mut settings = Settings::new();
        settings.orm_suffix("Row").quiet(true);
        assert_eq!(settings.mapped_name("Order"), "OrderRow");
        assert!(settings.is_quiet());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_partial() {
        let settings: Settings = serde_json::from_str(r#"{ "quiet": true }"#).unwrap();
        assert_eq!(settings.get_orm_suffix(), "ORM");
        assert!(settings.is_quiet());
    }
}
