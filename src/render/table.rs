//! Table rendering.

use crate::error::Result;
use crate::parser::{ExtractOptions, TableHandle};

/// Render a table as text.
///
/// The style named in `options` picks the renderer: a name containing
/// "CSV" uses delimited output, one containing "INLINE" uses inline output,
/// provided the table supports them. Otherwise Markdown is used when
/// available, and the table's raw text as a last resort. Output is trimmed.
pub fn render_table(table: &dyn TableHandle, options: Option<&ExtractOptions>) -> Result<String> {
    let style = options
        .map(ExtractOptions::table_style_name)
        .unwrap_or_default();

    let rendered = if style.contains("CSV") && table.supports_csv() {
        let delimiter = options.map(ExtractOptions::csv_delimiter).unwrap_or(",");
        table.to_csv(delimiter)?
    } else if style.contains("INLINE") && table.supports_inline() {
        table.to_inline()?
    } else if table.supports_markdown() {
        table.to_markdown()?
    } else {
        table.raw_text()
    };

    Ok(rendered.trim().to_string())
}
