//! Records returned by structured extraction.

use super::TableHandle;
use std::collections::HashMap;

/// Output of [`DocumentReader::extract_text_with_notes`].
///
/// Every field is optional; an absent field behaves like an empty one.
///
/// [`DocumentReader::extract_text_with_notes`]: super::DocumentReader::extract_text_with_notes
#[derive(Default)]
pub struct ExtractionResult {
    /// Body text
    pub text: Option<String>,

    /// Tables found during extraction
    pub tables: Option<Vec<Box<dyn TableHandle>>>,

    /// Footnotes and endnotes
    pub notes: Option<Vec<Note>>,

    /// Memos (comments)
    pub memos: Option<Vec<Memo>>,

    /// Hyperlinks
    pub hyperlinks: Option<Vec<Hyperlink>>,
}

impl ExtractionResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set body text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set tables.
    pub fn with_tables(mut self, tables: Vec<Box<dyn TableHandle>>) -> Self {
        self.tables = Some(tables);
        self
    }

    /// Set notes.
    pub fn with_notes(mut self, notes: Vec<Note>) -> Self {
        self.notes = Some(notes);
        self
    }

    /// Set memos.
    pub fn with_memos(mut self, memos: Vec<Memo>) -> Self {
        self.memos = Some(memos);
        self
    }

    /// Set hyperlinks.
    pub fn with_hyperlinks(mut self, hyperlinks: Vec<Hyperlink>) -> Self {
        self.hyperlinks = Some(hyperlinks);
        self
    }

    /// Notes, empty when absent.
    pub fn notes(&self) -> &[Note] {
        self.notes.as_deref().unwrap_or_default()
    }

    /// Memos, empty when absent.
    pub fn memos(&self) -> &[Memo] {
        self.memos.as_deref().unwrap_or_default()
    }

    /// Hyperlinks, empty when absent.
    pub fn hyperlinks(&self) -> &[Hyperlink] {
        self.hyperlinks.as_deref().unwrap_or_default()
    }
}

impl std::fmt::Debug for ExtractionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractionResult")
            .field("text", &self.text)
            .field("tables", &self.tables.as_ref().map(Vec::len))
            .field("notes", &self.notes)
            .field("memos", &self.memos)
            .field("hyperlinks", &self.hyperlinks)
            .finish()
    }
}

/// A footnote or endnote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Note {
    /// Note kind ("footnote" or "endnote"), footnote when absent
    pub note_type: Option<String>,
    /// Sequential number
    pub number: Option<i64>,
    /// Note text
    pub text: Option<String>,
}

impl Note {
    /// Create a footnote.
    pub fn footnote(number: i64, text: impl Into<String>) -> Self {
        Self {
            note_type: Some("footnote".to_string()),
            number: Some(number),
            text: Some(text.into()),
        }
    }

    /// Create an endnote.
    pub fn endnote(number: i64, text: impl Into<String>) -> Self {
        Self {
            note_type: Some("endnote".to_string()),
            number: Some(number),
            text: Some(text.into()),
        }
    }

    /// Lower-cased note kind.
    pub fn kind(&self) -> String {
        self.note_type
            .as_deref()
            .unwrap_or("footnote")
            .to_lowercase()
    }

    /// Whether this note is an endnote.
    pub fn is_endnote(&self) -> bool {
        self.kind() == "endnote"
    }

    /// Trimmed note text.
    pub fn trimmed_text(&self) -> &str {
        self.text.as_deref().unwrap_or("").trim()
    }
}

/// A memo (comment) attached to the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Memo {
    /// Identifier
    pub id: Option<String>,
    /// Alternative identifier some parsers use
    pub memo_id: Option<String>,
    /// Author
    pub author: Option<String>,
    /// Text the memo is anchored to
    pub referenced_text: Option<String>,
    /// Memo text
    pub text: Option<String>,
}

impl Memo {
    /// Create a memo with text only.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Set the identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the referenced text.
    pub fn with_referenced_text(mut self, text: impl Into<String>) -> Self {
        self.referenced_text = Some(text.into());
        self
    }

    /// Identifying fields that are present and non-empty, in metadata order.
    pub fn attributes(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("id", &self.id),
            ("memo_id", &self.memo_id),
            ("author", &self.author),
            ("referenced_text", &self.referenced_text),
        ]
        .into_iter()
        .filter_map(|(key, value)| match value.as_deref() {
            Some(v) if !v.is_empty() => Some((key, v)),
            _ => None,
        })
    }

    /// Trimmed memo text.
    pub fn trimmed_text(&self) -> &str {
        self.text.as_deref().unwrap_or("").trim()
    }
}

/// A hyperlink in whichever shape the parser reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hyperlink {
    /// Positional `(text, url)`; missing positions count as empty
    Tuple(Vec<String>),
    /// Keyed by `"text"` and `"url"`
    Map(HashMap<String, String>),
    /// Named fields
    Record {
        /// Display text
        text: Option<String>,
        /// Target URL
        url: Option<String>,
    },
}

impl Hyperlink {
    /// Create a record-shaped hyperlink.
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        Hyperlink::Record {
            text: Some(text.into()),
            url: Some(url.into()),
        }
    }

    /// Canonical `(text, url)` pair, both trimmed.
    pub fn normalize(&self) -> (String, String) {
        let (text, url) = match self {
            Hyperlink::Tuple(parts) => (parts.first(), parts.get(1)),
            Hyperlink::Map(map) => (map.get("text"), map.get("url")),
            Hyperlink::Record { text, url } => (text.as_ref(), url.as_ref()),
        };
        (
            text.map(|t| t.trim().to_string()).unwrap_or_default(),
            url.map(|u| u.trim().to_string()).unwrap_or_default(),
        )
    }
}

impl<T: Into<String>, U: Into<String>> From<(T, U)> for Hyperlink {
    fn from((text, url): (T, U)) -> Self {
        Hyperlink::Tuple(vec![text.into(), url.into()])
    }
}

impl From<HashMap<String, String>> for Hyperlink {
    fn from(map: HashMap<String, String>) -> Self {
        Hyperlink::Map(map)
    }
}
