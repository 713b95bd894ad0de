/// Column metadata attached to a field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ColumnTag {
    /// Explicit column name
    pub column: Option<String>,

    /// Explicit SQL column type
    pub sql_type: Option<String>,

    pub size: Option<i32>,
    pub precision: Option<i32>,
    pub primary_key: bool,
    pub unique: bool,
    pub default: Option<String>,
    pub not_null: bool,
    pub auto_increment: bool,

    /// Index name; an empty string requests an unnamed index
    pub index: Option<String>,
    pub unique_index: Option<String>,

    /// Field is not persisted
    pub ignore: bool,
}

impl ColumnTag {
    pub fn primary_key() -> ColumnTag {
        ColumnTag {
            primary_key: true,
            ..ColumnTag::default()
        }
    }

    pub fn not_null() -> ColumnTag {
        ColumnTag {
            not_null: true,
            ..ColumnTag::default()
        }
    }
}
