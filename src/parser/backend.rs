//! Parser backend abstraction layer.
//!
//! Provides a trait-based interface for HWP/HWPX readers, isolating the
//! concrete parsing library from the loading and normalization logic.

use std::path::Path;

use super::{ExtractOptions, ExtractionResult};
use crate::error::{Error, Result};

/// Entry point of a parsing library.
pub trait ParserBackend: Send + Sync {
    /// Identifier of the parsing library (e.g. "hwp-hwpx-parser").
    fn name(&self) -> &str;

    /// Version of the parsing library, if known.
    fn version(&self) -> Option<&str> {
        None
    }

    /// Open a reader for the given file.
    fn open(&self, path: &Path) -> Result<Box<dyn DocumentReader>>;

    /// `name/version` string recorded in document metadata.
    fn identifier(&self) -> String {
        format!("{}/{}", self.name(), self.version().unwrap_or("unknown"))
    }
}

/// File type as reported by a reader.
///
/// Parsers describe the type in different ways (a display label, an enum
/// variant name, a raw value); each is inspected in turn during
/// normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportedFileType {
    /// Display form (e.g. "FileType.HWP5")
    pub label: Option<String>,
    /// Variant name (e.g. "HWP5")
    pub name: Option<String>,
    /// Raw value (e.g. "hwp")
    pub value: Option<String>,
}

impl ReportedFileType {
    /// Create from a display label only.
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Default::default()
        }
    }

    /// Set the variant name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the raw value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Candidate tokens in inspection order.
    pub fn candidates(&self) -> impl Iterator<Item = &str> {
        [&self.label, &self.name, &self.value]
            .into_iter()
            .filter_map(|c| c.as_deref())
    }
}

/// An open HWP/HWPX document.
pub trait DocumentReader {
    /// File type reported by the parser.
    fn file_type(&self) -> Option<ReportedFileType> {
        None
    }

    /// Whether the document is password protected.
    fn is_encrypted(&self) -> bool {
        false
    }

    /// Whether the document passed the parser's structural checks.
    fn is_valid(&self) -> bool {
        true
    }

    /// Plain body text, used when structured extraction yields none.
    fn text(&self) -> Result<String> {
        Ok(String::new())
    }

    /// Run structured extraction of body text, tables, notes, memos and links.
    fn extract_text_with_notes(&self, options: Option<&ExtractOptions>) -> Result<ExtractionResult>;

    /// Enumerate tables independently of structured extraction.
    fn tables(&self) -> Result<Vec<Box<dyn TableHandle>>> {
        Ok(Vec::new())
    }

    /// Enumerate embedded images.
    fn images(&self) -> Result<Vec<Box<dyn ImageHandle>>> {
        Ok(Vec::new())
    }
}

/// A table produced by the parser.
///
/// Rendering capabilities are optional; callers check `supports_*` before
/// invoking the matching `to_*` method.
pub trait TableHandle {
    /// Number of rows, if known.
    fn row_count(&self) -> Option<i64> {
        None
    }

    /// Number of columns, if known.
    fn col_count(&self) -> Option<i64> {
        None
    }

    /// Whether the table can render as delimited text.
    fn supports_csv(&self) -> bool {
        false
    }

    /// Render as delimited text.
    fn to_csv(&self, _delimiter: &str) -> Result<String> {
        Err(unsupported("to_csv"))
    }

    /// Whether the table can render inline (`A:1, B:2`).
    fn supports_inline(&self) -> bool {
        false
    }

    /// Render inline.
    fn to_inline(&self) -> Result<String> {
        Err(unsupported("to_inline"))
    }

    /// Whether the table can render as a Markdown table.
    fn supports_markdown(&self) -> bool {
        false
    }

    /// Render as a Markdown table.
    fn to_markdown(&self) -> Result<String> {
        Err(unsupported("to_markdown"))
    }

    /// Raw textual form of the row data (or the handle itself).
    fn raw_text(&self) -> String;
}

/// An embedded image produced by the parser.
pub trait ImageHandle {
    /// Original file name, if the document records one.
    fn filename(&self) -> Option<String> {
        None
    }

    /// Image format (e.g. "png").
    fn format(&self) -> Option<String> {
        None
    }

    /// Whether the image bytes can be written out.
    fn supports_save(&self) -> bool {
        false
    }

    /// Write the image to `path`.
    fn save(&self, _path: &Path) -> Result<()> {
        Err(unsupported("save"))
    }
}

fn unsupported(capability: &str) -> Error {
    Error::backend(
        "NotImplementedError",
        format!("{} is not supported by this handle", capability),
    )
}
