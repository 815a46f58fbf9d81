//! JSON rendering for loaded documents.

use crate::error::Result;
use crate::model::Document;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert loaded documents to a JSON array.
pub fn to_json(docs: &[Document], format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(docs)?,
        JsonFormat::Compact => serde_json::to_string(docs)?,
    };
    Ok(json)
}
