//! Content records as read from the external record store.

use serde::{Deserialize, Serialize};

/// A single published item (post or guide).
///
/// The external source owns the full record; only the identifier and title
/// are carried here. The id is unique within its content type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentRecord {
    pub id: String,
    /// Human-readable title, may be empty.
    #[serde(default)]
    pub title: String,
}

impl ContentRecord {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}
