use crate::errors::ProcessError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The fixed set of document kinds the pipeline understands.
///
/// Derived once from the filename by [`crate::classify::classify_file`] and
/// immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pdf,
    WordDocument,
    Spreadsheet,
    Image,
}

/// One normalized line item requested in a procurement document.
///
/// `id` and `name` are always non-empty; everything else is best-effort,
/// AI-derived data. `confidence`, when present, is within `[0.0, 1.0]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedItem {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl ExtractedItem {
    /// Creates an item with a fresh id and the given name; all other
    /// fields start empty.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            quantity: None,
            brand: None,
            model: None,
            size: None,
            item_type: None,
            description: None,
            confidence: None,
        }
    }
}

/// The per-document result of a batch run: either the ordered item list or
/// the single unrecoverable error for that document. One document's failure
/// never aborts the rest of the batch.
#[derive(Debug)]
pub struct DocumentOutcome {
    /// The path the caller submitted for this document.
    pub source: String,
    pub result: Result<Vec<ExtractedItem>, ProcessError>,
}
