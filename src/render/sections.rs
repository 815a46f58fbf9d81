//! Headed sections for single-mode documents.
//!
//! Each renderer returns an empty string when there is nothing to show, so
//! callers can drop the section entirely.

use super::render_table;
use crate::error::Result;
use crate::parser::{ExtractOptions, Hyperlink, Memo, Note, TableHandle};

/// Render all tables under a `## Tables` heading.
///
/// Tables are joined by the extraction options' paragraph separator.
pub fn render_tables_section(
    tables: &[Box<dyn TableHandle>],
    options: Option<&ExtractOptions>,
) -> Result<String> {
    if tables.is_empty() {
        return Ok(String::new());
    }

    let separator = options.map(ExtractOptions::table_separator).unwrap_or("\n\n");
    let rendered = tables
        .iter()
        .map(|table| render_table(table.as_ref(), options))
        .collect::<Result<Vec<_>>>()?;

    Ok(format!("## Tables\n{}", rendered.join(separator)))
}

/// Render notes as `[kind:number] text` lines under `## Notes`.
pub fn render_notes_section(notes: &[Note]) -> String {
    if notes.is_empty() {
        return String::new();
    }

    let mut lines = vec!["## Notes".to_string()];
    for note in notes {
        let kind = note.kind();
        let marker = match note.number {
            Some(number) => format!("[{}:{}]", kind, number),
            None => format!("[{}]", kind),
        };
        lines.push(format!("{} {}", marker, note.trimmed_text()).trim().to_string());
    }
    lines.join("\n")
}

/// Render memos as `[memo:N] (author) text` lines under `## Memos`.
pub fn render_memos_section(memos: &[Memo]) -> String {
    if memos.is_empty() {
        return String::new();
    }

    let mut lines = vec!["## Memos".to_string()];
    for (idx, memo) in memos.iter().enumerate() {
        let mut label = format!("[memo:{}]", idx + 1);
        let author = memo.author.as_deref().unwrap_or("").trim();
        if !author.is_empty() {
            label = format!("{} ({})", label, author);
        }
        lines.push(format!("{} {}", label, memo.trimmed_text()).trim().to_string());
    }
    lines.join("\n")
}

/// Render hyperlinks as list items under `## Hyperlinks`.
///
/// Links with neither text nor URL produce no line.
pub fn render_hyperlinks_section(hyperlinks: &[Hyperlink]) -> String {
    if hyperlinks.is_empty() {
        return String::new();
    }

    let mut lines = vec!["## Hyperlinks".to_string()];
    for hyperlink in hyperlinks {
        let (text, url) = hyperlink.normalize();
        match (text.is_empty(), url.is_empty()) {
            (false, false) => lines.push(format!("- {}: {}", text, url)),
            (true, false) => lines.push(format!("- {}", url)),
            (false, true) => lines.push(format!("- {}", text)),
            (true, true) => {}
        }
    }
    lines.join("\n")
}

/// Render image descriptions under `## Images`.
pub fn render_images_section(entries: &[String]) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let mut lines = vec!["## Images".to_string()];
    lines.extend(entries.iter().cloned());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::TableStyle;

    struct CsvTable(&'static str);

    impl TableHandle for CsvTable {
        fn supports_csv(&self) -> bool {
            true
        }

        fn to_csv(&self, delimiter: &str) -> Result<String> {
            Ok(format!("{}{}x", self.0, delimiter))
        }

        fn raw_text(&self) -> String {
            self.0.to_string()
        }
    }

    #[test]
    fn test_tables_section_separator() {
        let tables: Vec<Box<dyn TableHandle>> = vec![Box::new(CsvTable("a")), Box::new(CsvTable("b"))];
        let options = ExtractOptions::new()
            .with_table_style(TableStyle::Csv)
            .with_paragraph_separator("\n\n");

        let section = render_tables_section(&tables, Some(&options)).unwrap();
        assert_eq!(section, "## Tables\na,x\n\nb,x");

        let options = options.with_paragraph_separator("***");
        let section = render_tables_section(&tables, Some(&options)).unwrap();
        assert_eq!(section, "## Tables\na,x***b,x");
    }

    #[test]
    fn test_tables_section_empty() {
        assert_eq!(render_tables_section(&[], None).unwrap(), "");
    }

    #[test]
    fn test_notes_section() {
        let notes = vec![
            Note::footnote(1, " 각주 내용 "),
            Note::endnote(2, "미주 내용"),
            Note {
                text: Some("unnumbered".to_string()),
                ..Default::default()
            },
        ];
        assert_eq!(
            render_notes_section(&notes),
            "## Notes\n[footnote:1] 각주 내용\n[endnote:2] 미주 내용\n[footnote] unnumbered"
        );
    }

    #[test]
    fn test_memos_section() {
        let memos = vec![
            Memo::new("메모 내용").with_author("tester"),
            Memo::new("second").with_author("  "),
        ];
        assert_eq!(
            render_memos_section(&memos),
            "## Memos\n[memo:1] (tester) 메모 내용\n[memo:2] second"
        );
    }

    #[test]
    fn test_hyperlinks_section() {
        let links = vec![
            Hyperlink::from(("사이트", "https://example.com")),
            Hyperlink::Record {
                text: None,
                url: Some("https://only.url".to_string()),
            },
            Hyperlink::Tuple(vec!["only text".to_string()]),
            Hyperlink::Tuple(vec![" ".to_string(), String::new()]),
        ];
        assert_eq!(
            render_hyperlinks_section(&links),
            "## Hyperlinks\n- 사이트: https://example.com\n- https://only.url\n- only text"
        );
    }

    #[test]
    fn test_empty_sections_render_nothing() {
        assert_eq!(render_notes_section(&[]), "");
        assert_eq!(render_memos_section(&[]), "");
        assert_eq!(render_hyperlinks_section(&[]), "");
        assert_eq!(render_images_section(&[]), "");
    }
}
