//! Shared fake parser backend for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use hwp_loader::error::{Error, Result};
use hwp_loader::parser::{
    DocumentReader, ExtractOptions, ExtractionResult, Hyperlink, ImageHandle, Memo, Note,
    ParserBackend, ReportedFileType, TableHandle,
};

/// Table offering every rendering capability.
#[derive(Debug, Clone)]
pub struct FakeTable;

impl TableHandle for FakeTable {
    fn row_count(&self) -> Option<i64> {
        Some(2)
    }

    fn col_count(&self) -> Option<i64> {
        Some(2)
    }

    fn supports_csv(&self) -> bool {
        true
    }

    fn to_csv(&self, delimiter: &str) -> Result<String> {
        Ok(format!("A{d}B\n1{d}2", d = delimiter))
    }

    fn supports_inline(&self) -> bool {
        true
    }

    fn to_inline(&self) -> Result<String> {
        Ok("A:1, B:2".to_string())
    }

    fn supports_markdown(&self) -> bool {
        true
    }

    fn to_markdown(&self) -> Result<String> {
        Ok("|A|B|\n|---|---|\n|1|2|".to_string())
    }

    fn raw_text(&self) -> String {
        "[['A', 'B'], ['1', '2']]".to_string()
    }
}

/// Image that writes a few bytes when saved.
#[derive(Debug, Clone)]
pub struct FakeImage {
    pub filename: Option<String>,
    pub format: Option<String>,
}

impl FakeImage {
    pub fn new(filename: &str, format: &str) -> Self {
        Self {
            filename: Some(filename.to_string()),
            format: Some(format.to_string()),
        }
    }
}

impl ImageHandle for FakeImage {
    fn filename(&self) -> Option<String> {
        self.filename.clone()
    }

    fn format(&self) -> Option<String> {
        self.format.clone()
    }

    fn supports_save(&self) -> bool {
        true
    }

    fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, b"img")?;
        Ok(())
    }
}

/// Everything a fake reader reports for one file.
#[derive(Debug, Clone)]
pub struct FakeDocument {
    pub file_type: Option<ReportedFileType>,
    pub encrypted: bool,
    pub valid: bool,
    pub raw_text: String,
    pub text: Option<String>,
    pub notes: Vec<Note>,
    pub memos: Vec<Memo>,
    pub hyperlinks: Vec<Hyperlink>,
    pub tables: usize,
    pub images: Vec<FakeImage>,
    pub fail_extract: Option<&'static str>,
    pub fail_open: Option<&'static str>,
}

impl Default for FakeDocument {
    fn default() -> Self {
        Self {
            file_type: Some(ReportedFileType::labeled("FileType.HWP5")),
            encrypted: false,
            valid: true,
            raw_text: "본문 텍스트".to_string(),
            text: Some("본문 [footnote:1]".to_string()),
            notes: vec![Note::footnote(1, "각주 내용"), Note::endnote(2, "미주 내용")],
            memos: vec![Memo::new("메모 내용").with_id("m1").with_author("tester")],
            hyperlinks: vec![Hyperlink::from(("사이트", "https://example.com"))],
            tables: 1,
            images: vec![FakeImage::new("diagram.png", "png")],
            fail_extract: None,
            fail_open: None,
        }
    }
}

impl FakeDocument {
    /// A document with body text only.
    pub fn body(text: &str) -> Self {
        Self {
            file_type: None,
            text: Some(text.to_string()),
            notes: Vec::new(),
            memos: Vec::new(),
            hyperlinks: Vec::new(),
            tables: 0,
            images: Vec::new(),
            ..Self::default()
        }
    }

    pub fn encrypted(mut self) -> Self {
        self.encrypted = true;
        self
    }

    pub fn invalid(mut self) -> Self {
        self.valid = false;
        self
    }

    pub fn failing(mut self, kind: &'static str) -> Self {
        self.fail_extract = Some(kind);
        self
    }
}

/// Backend serving [`FakeDocument`]s, optionally per file name.
pub struct FakeBackend {
    default: FakeDocument,
    by_name: HashMap<String, FakeDocument>,
    opened: AtomicUsize,
}

impl FakeBackend {
    pub fn new(default: FakeDocument) -> Self {
        Self {
            default,
            by_name: HashMap::new(),
            opened: AtomicUsize::new(0),
        }
    }

    pub fn with_file(mut self, name: &str, doc: FakeDocument) -> Self {
        self.by_name.insert(name.to_string(), doc);
        self
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Number of readers opened so far.
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self::new(FakeDocument::default())
    }
}

impl ParserBackend for FakeBackend {
    fn name(&self) -> &str {
        "fake-parser"
    }

    fn version(&self) -> Option<&str> {
        Some("0.1.0")
    }

    fn open(&self, path: &Path) -> Result<Box<dyn DocumentReader>> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let doc = self.by_name.get(&name).unwrap_or(&self.default).clone();
        if let Some(kind) = doc.fail_open {
            return Err(Error::backend(kind, "cannot open"));
        }
        Ok(Box::new(FakeReader { doc }))
    }
}

pub struct FakeReader {
    doc: FakeDocument,
}

impl DocumentReader for FakeReader {
    fn file_type(&self) -> Option<ReportedFileType> {
        self.doc.file_type.clone()
    }

    fn is_encrypted(&self) -> bool {
        self.doc.encrypted
    }

    fn is_valid(&self) -> bool {
        self.doc.valid
    }

    fn text(&self) -> Result<String> {
        Ok(self.doc.raw_text.clone())
    }

    fn extract_text_with_notes(&self, _options: Option<&ExtractOptions>) -> Result<ExtractionResult> {
        if let Some(kind) = self.doc.fail_extract {
            return Err(Error::backend(kind, "parse-fail"));
        }
        let mut result = ExtractionResult::new()
            .with_notes(self.doc.notes.clone())
            .with_memos(self.doc.memos.clone())
            .with_hyperlinks(self.doc.hyperlinks.clone());
        result.text = self.doc.text.clone();
        Ok(result)
    }

    fn tables(&self) -> Result<Vec<Box<dyn TableHandle>>> {
        Ok((0..self.doc.tables)
            .map(|_| Box::new(FakeTable) as Box<dyn TableHandle>)
            .collect())
    }

    fn images(&self) -> Result<Vec<Box<dyn ImageHandle>>> {
        Ok(self
            .doc
            .images
            .iter()
            .cloned()
            .map(|image| Box::new(image) as Box<dyn ImageHandle>)
            .collect())
    }
}

/// Write a dummy file and return its path.
pub fn touch(dir: &Path, relative: &str) -> PathBuf {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, "dummy").unwrap();
    path
}
