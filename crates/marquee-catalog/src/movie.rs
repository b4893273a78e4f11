//! Movie model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A catalog entry as exchanged with the API.
///
/// Only the identifier and title are interpreted here; every other field
/// is kept as-is so a round trip through the client never drops data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Absent until the server has stored the movie
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Movie {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            details: Map::new(),
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}
