//! Extraction options passed through to the parser.

use serde::{Deserialize, Serialize};

/// Options for structured extraction.
///
/// Handed to [`DocumentReader::extract_text_with_notes`] unchanged, and
/// consulted by the loader when rendering tables.
///
/// [`DocumentReader::extract_text_with_notes`]: super::DocumentReader::extract_text_with_notes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// How tables should be rendered
    pub table_style: Option<TableStyle>,

    /// Cell delimiter for CSV-style tables
    pub table_delimiter: Option<String>,

    /// Separator placed between rendered tables
    pub paragraph_separator: Option<String>,
}

impl ExtractOptions {
    /// Create new extraction options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the table style.
    pub fn with_table_style(mut self, style: TableStyle) -> Self {
        self.table_style = Some(style);
        self
    }

    /// Set the CSV delimiter.
    pub fn with_table_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.table_delimiter = Some(delimiter.into());
        self
    }

    /// Set the separator between tables.
    pub fn with_paragraph_separator(mut self, separator: impl Into<String>) -> Self {
        self.paragraph_separator = Some(separator.into());
        self
    }

    /// Upper-cased table style name, empty when unset.
    pub fn table_style_name(&self) -> String {
        self.table_style
            .as_ref()
            .map(|style| style.name().to_uppercase())
            .unwrap_or_default()
    }

    /// CSV delimiter, `,` when unset or blank.
    pub fn csv_delimiter(&self) -> &str {
        match self.table_delimiter.as_deref().map(str::trim) {
            Some(d) if !d.is_empty() => d,
            _ => ",",
        }
    }

    /// Separator between rendered tables, a blank line when unset or blank.
    pub fn table_separator(&self) -> &str {
        match self.paragraph_separator.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s,
            _ => "\n\n",
        }
    }
}

/// Table rendering style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TableStyle {
    /// Markdown table
    Markdown,
    /// Delimited rows
    Csv,
    /// `header:value` pairs on one line
    Inline,
    /// Any other style the parser understands
    Named(String),
}

impl TableStyle {
    /// Style name as the parser spells it.
    pub fn name(&self) -> &str {
        match self {
            TableStyle::Markdown => "MARKDOWN",
            TableStyle::Csv => "CSV",
            TableStyle::Inline => "INLINE",
            TableStyle::Named(name) => name,
        }
    }
}

impl From<String> for TableStyle {
    fn from(name: String) -> Self {
        match name.to_uppercase().as_str() {
            "MARKDOWN" => TableStyle::Markdown,
            "CSV" => TableStyle::Csv,
            "INLINE" => TableStyle::Inline,
            _ => TableStyle::Named(name),
        }
    }
}

impl From<&str> for TableStyle {
    fn from(name: &str) -> Self {
        TableStyle::from(name.to_string())
    }
}

impl From<TableStyle> for String {
    fn from(style: TableStyle) -> Self {
        style.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delimiter_defaults() {
        let options = ExtractOptions::new();
        assert_eq!(options.csv_delimiter(), ",");
        assert_eq!(options.table_separator(), "\n\n");
        assert_eq!(options.table_style_name(), "");

        let options = ExtractOptions::new()
            .with_table_delimiter("  ")
            .with_paragraph_separator("\n\n");
        assert_eq!(options.csv_delimiter(), ",");
        assert_eq!(options.table_separator(), "\n\n");
    }

    #[test]
    fn test_custom_delimiters_are_trimmed() {
        let options = ExtractOptions::new()
            .with_table_delimiter(" ; ")
            .with_paragraph_separator("\n---\n");
        assert_eq!(options.csv_delimiter(), ";");
        assert_eq!(options.table_separator(), "---");
    }

    #[test]
    fn test_table_style_names() {
        assert_eq!(TableStyle::from("csv"), TableStyle::Csv);
        let named = TableStyle::from("csv_quoted");
        assert_eq!(named, TableStyle::Named("csv_quoted".to_string()));

        let options = ExtractOptions::new().with_table_style(named);
        assert_eq!(options.table_style_name(), "CSV_QUOTED");
    }

    #[test]
    fn test_deserialize_from_json() {
        let options: ExtractOptions =
            serde_json::from_str(r#"{"table_style": "inline", "table_delimiter": "|"}"#).unwrap();
        assert_eq!(options.table_style, Some(TableStyle::Inline));
        assert_eq!(options.csv_delimiter(), "|");
        assert!(options.paragraph_separator.is_none());
    }
}
