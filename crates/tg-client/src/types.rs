//! Data types exchanged with the guide backend.

use serde::{Deserialize, Serialize};

/// A pre-registered table offered as a quick-start example.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleTable {
    /// Fully qualified table name, e.g. `tracking.AdClickEvent`.
    pub name: String,
    /// Human-readable title.
    #[serde(default)]
    pub title: String,
    /// Short description of the table's domain.
    #[serde(default)]
    pub description: String,
    /// Number of source documents backing the table.
    #[serde(default)]
    pub doc_count: u64,
}

impl ExampleTable {
    pub(crate) fn new(name: &str, title: &str, description: &str) -> Self {
        Self {
            name: name.to_owned(),
            title: title.to_owned(),
            description: description.to_owned(),
            doc_count: 0,
        }
    }
}

/// Example tables together with where they came from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExampleIndex {
    pub tables: Vec<ExampleTable>,
    /// `true` when the backend index was unusable and `tables` is the
    /// built-in list.
    pub fallback: bool,
}

/// A successfully generated guide.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GuideResult {
    /// Table the guide describes.
    pub table: String,
    /// Guide body as markdown, never empty.
    pub guide: String,
}

/// Body of `GET /api/fixtures_index`.
#[derive(Deserialize)]
pub(crate) struct IndexResponse {
    pub(crate) tables: Vec<ExampleTable>,
}

/// Body of a successful `GET /api/table_guide`.
///
/// Fields are untyped so a contract violation is reported as an invalid
/// response rather than a deserialization failure.
#[derive(Deserialize)]
pub(crate) struct GuideResponse {
    #[serde(default)]
    pub(crate) table: Option<serde_json::Value>,
    #[serde(default)]
    pub(crate) guide: Option<serde_json::Value>,
}

/// Body of a failed backend request.
#[derive(Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub(crate) detail: Option<serde_json::Value>,
}
