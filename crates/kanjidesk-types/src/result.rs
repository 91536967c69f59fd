use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One dictionary entry returned by a query.
///
/// Only the fields the entry view reads are typed; the rest of the record
/// is kept as-is in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KanjiResult {
    /// The kanji itself
    pub c: String,
    #[serde(default)]
    pub r: KanjiReadings,
    /// Meanings in the database language
    #[serde(default)]
    pub m: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanjiReadings {
    #[serde(default)]
    pub on: Vec<String>,
    #[serde(default)]
    pub kun: Vec<String>,
    #[serde(default)]
    pub na: Vec<String>,
}

impl KanjiResult {
    pub fn new(c: impl Into<String>) -> Self {
        Self {
            c: c.into(),
            r: KanjiReadings::default(),
            m: Vec::new(),
            extra: Map::new(),
        }
    }
}
