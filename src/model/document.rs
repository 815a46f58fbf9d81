//! Document-level types.

use super::{Metadata, MetadataValue};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single loaded document (or document element).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Extracted text
    pub page_content: String,

    /// Source, parser and element metadata
    pub metadata: Metadata,
}

impl Document {
    /// Create a new document.
    pub fn new(page_content: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            page_content: page_content.into(),
            metadata,
        }
    }

    /// Get a metadata value by key.
    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.metadata.get(key)
    }

    /// Get the `element_type` metadata value.
    pub fn element_type(&self) -> Option<&str> {
        self.metadata.get_str("element_type")
    }

    /// Get the `element_index` metadata value.
    pub fn element_index(&self) -> Option<i64> {
        self.metadata.get_int("element_index")
    }

    /// Check if the document has no content.
    pub fn is_empty(&self) -> bool {
        self.page_content.is_empty()
    }
}

/// Kind of unit a document represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    /// Whole file in single mode
    Document,
    /// Stand-in for an encrypted or invalid file
    Placeholder,
    /// Body text
    Body,
    /// A table
    Table,
    /// A footnote
    Footnote,
    /// An endnote
    Endnote,
    /// A memo (comment)
    Memo,
    /// A hyperlink
    Hyperlink,
    /// An embedded image
    Image,
}

impl ElementType {
    /// Metadata token for this element type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Document => "document",
            ElementType::Placeholder => "placeholder",
            ElementType::Body => "body",
            ElementType::Table => "table",
            ElementType::Footnote => "footnote",
            ElementType::Endnote => "endnote",
            ElementType::Memo => "memo",
            ElementType::Hyperlink => "hyperlink",
            ElementType::Image => "image",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File-level status reported by the parser before extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// Password protected
    Encrypted,
    /// Structurally invalid
    Invalid,
}

impl DocumentStatus {
    /// Metadata token for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Encrypted => "encrypted",
            DocumentStatus::Invalid => "invalid",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
