//! Single-file loader.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;

use super::image::materialize_image;
use super::{DocumentLoader, ErrorPolicy, LoaderOptions, Mode, StatusPolicy};
use crate::detect::{is_supported_extension, normalize_file_type};
use crate::error::{Error, Result};
use crate::model::{Document, DocumentStatus, ElementType, Metadata};
use crate::parser::{
    DocumentReader, ExtractionResult, Hyperlink, ImageHandle, Memo, Note, ParserBackend,
    TableHandle,
};
use crate::render::{
    render_hyperlinks_section, render_images_section, render_memos_section,
    render_notes_section, render_table, render_tables_section,
};

/// Loader identifier recorded in the `loader` metadata key.
pub const LOADER_ID: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Loads a single `.hwp` or `.hwpx` file.
///
/// # Example
///
/// ```no_run
/// use hwp_loader::loader::{DocumentLoader, HwpLoader, LoaderOptions};
/// use hwp_loader::parser::ParserBackend;
/// use std::sync::Arc;
///
/// fn first_document(backend: Arc<dyn ParserBackend>) -> hwp_loader::Result<()> {
///     let loader = HwpLoader::new("minutes.hwp", LoaderOptions::default(), backend);
///     let docs = loader.load()?;
///     println!("{}", docs[0].page_content);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct HwpLoader {
    path: PathBuf,
    options: Arc<LoaderOptions>,
    backend: Arc<dyn ParserBackend>,
}

impl HwpLoader {
    /// Create a loader for `path`.
    pub fn new(
        path: impl Into<PathBuf>,
        options: LoaderOptions,
        backend: Arc<dyn ParserBackend>,
    ) -> Self {
        Self::with_shared_options(path, Arc::new(options), backend)
    }

    /// Create a loader that shares options with other loaders.
    pub fn with_shared_options(
        path: impl Into<PathBuf>,
        options: Arc<LoaderOptions>,
        backend: Arc<dyn ParserBackend>,
    ) -> Self {
        Self {
            path: path.into(),
            options,
            backend,
        }
    }

    /// Path of the file this loader reads.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loader options.
    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }
}

impl std::fmt::Debug for HwpLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HwpLoader")
            .field("path", &self.path)
            .field("options", &self.options)
            .field("backend", &self.backend.identifier())
            .finish()
    }
}

impl DocumentLoader for HwpLoader {
    type Stream = FileDocuments;

    fn lazy_load(&self) -> Result<FileDocuments> {
        if !is_supported_extension(&self.path) {
            return Err(Error::UnsupportedExtension(self.path.clone()));
        }
        if !self.path.exists() {
            return Err(Error::NotFound(self.path.clone()));
        }

        Ok(FileDocuments {
            path: self.path.clone(),
            options: Arc::clone(&self.options),
            backend: Arc::clone(&self.backend),
            state: StreamState::Initial,
        })
    }
}

/// Internal state for the file stream.
enum StreamState {
    /// Nothing parsed yet
    Initial,
    /// Emitting element documents
    Elements(Box<ElementCursor>),
    /// Stream exhausted
    Done,
}

/// Outcome of the encrypted/invalid status check.
enum StatusGate {
    /// Extract normally
    Proceed,
    /// Produce nothing for this file
    Skip,
    /// Produce this document and nothing else
    Placeholder(Document),
}

/// Lazily produced documents of one file.
///
/// Parsing starts on the first call to `next`. Runtime failures are handled
/// by the `on_error` policy: `raise` yields one wrapped error, `skip` and
/// `warn` end the stream quietly (with a log line for `warn`).
pub struct FileDocuments {
    path: PathBuf,
    options: Arc<LoaderOptions>,
    backend: Arc<dyn ParserBackend>,
    state: StreamState,
}

impl FileDocuments {
    /// Path of the file being loaded.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the stream is exhausted.
    pub fn is_done(&self) -> bool {
        matches!(self.state, StreamState::Done)
    }

    fn start(&mut self) -> Result<Option<Document>> {
        let reader = self.backend.open(&self.path)?;
        let base = self.base_metadata(reader.as_ref());
        log::debug!(
            "Opened {} as {}",
            self.path.display(),
            base.get_str("file_type").unwrap_or_default()
        );

        match self.check_status(reader.as_ref(), &base)? {
            StatusGate::Proceed => {}
            StatusGate::Skip => return Ok(None),
            StatusGate::Placeholder(doc) => return Ok(Some(doc)),
        }

        let result = reader.extract_text_with_notes(self.options.extract_options.as_ref())?;

        match self.options.mode {
            Mode::Single => self.single_document(reader.as_ref(), result, base).map(Some),
            Mode::Elements => {
                let mut cursor = Box::new(ElementCursor::new(reader, result, base));
                let doc = cursor.next_document(&self.path, &self.options)?;
                if doc.is_some() {
                    self.state = StreamState::Elements(cursor);
                }
                Ok(doc)
            }
        }
    }

    fn base_metadata(&self, reader: &dyn DocumentReader) -> Metadata {
        let mut metadata = Metadata::new();
        metadata.insert("source", self.path.to_string_lossy().into_owned());
        metadata.insert("file_name", file_name(&self.path));
        metadata.insert(
            "file_type",
            normalize_file_type(reader.file_type().as_ref(), &self.path),
        );
        metadata.insert("loader", LOADER_ID);
        metadata.insert("parser", self.backend.identifier());
        if self.options.include_extracted_at {
            metadata.insert("extracted_at", Utc::now().to_rfc3339());
        }
        metadata.extend(&self.options.extra_metadata);
        metadata
    }

    fn check_status(&self, reader: &dyn DocumentReader, base: &Metadata) -> Result<StatusGate> {
        if reader.is_encrypted() {
            return self.resolve_status(self.options.on_encrypted, DocumentStatus::Encrypted, base);
        }
        if !reader.is_valid() {
            return self.resolve_status(self.options.on_invalid, DocumentStatus::Invalid, base);
        }
        Ok(StatusGate::Proceed)
    }

    fn resolve_status(
        &self,
        policy: StatusPolicy,
        status: DocumentStatus,
        base: &Metadata,
    ) -> Result<StatusGate> {
        log::debug!("{} is {} (policy: {})", self.path.display(), status, policy);
        match policy {
            StatusPolicy::Raise => Err(Error::Status {
                status,
                path: self.path.clone(),
            }),
            StatusPolicy::Skip => Ok(StatusGate::Skip),
            StatusPolicy::Placeholder => {
                let mut metadata = base.clone();
                metadata.insert("status", status.as_str());
                metadata.insert("element_type", ElementType::Placeholder.as_str());
                let content = format!(
                    "[{}] {} cannot be parsed by policy.",
                    status.as_str().to_uppercase(),
                    file_name(&self.path)
                );
                Ok(StatusGate::Placeholder(Document::new(content, metadata)))
            }
        }
    }

    fn single_document(
        &self,
        reader: &dyn DocumentReader,
        mut result: ExtractionResult,
        base: Metadata,
    ) -> Result<Document> {
        let options = &self.options;
        let extract_options = options.extract_options.as_ref();
        let mut chunks = vec![body_text(reader, &result)?];

        if options.include_tables {
            let tables = collect_tables(reader, &mut result)?;
            chunks.push(render_tables_section(&tables, extract_options)?);
        }
        if options.include_notes {
            chunks.push(render_notes_section(result.notes()));
        }
        if options.include_memos {
            chunks.push(render_memos_section(result.memos()));
        }
        if options.include_hyperlinks {
            chunks.push(render_hyperlinks_section(result.hyperlinks()));
        }
        if options.include_images {
            let entries = reader
                .images()?
                .iter()
                .enumerate()
                .map(|(i, image)| {
                    let mut scratch = Metadata::new();
                    materialize_image(image.as_ref(), i, &self.path, options, &mut scratch)
                })
                .collect::<Result<Vec<_>>>()?;
            chunks.push(render_images_section(&entries));
        }

        let content = chunks
            .into_iter()
            .filter(|chunk| !chunk.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");

        let mut metadata = base;
        metadata.insert("element_type", ElementType::Document.as_str());
        Ok(Document::new(content.trim(), metadata))
    }

    /// Apply the `on_error` policy to a failure and end the stream.
    fn contain(&mut self, err: Error) -> Option<Result<Document>> {
        self.state = StreamState::Done;
        if err.is_structured() {
            return Some(Err(err));
        }
        match self.options.on_error {
            ErrorPolicy::Raise => Some(Err(err.into_parse(&self.path))),
            ErrorPolicy::Skip => None,
            ErrorPolicy::Warn => {
                log::warn!(
                    "Failed to parse {}: {} ({})",
                    self.path.display(),
                    err.kind(),
                    err
                );
                None
            }
        }
    }
}

impl Iterator for FileDocuments {
    type Item = Result<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        let outcome = match std::mem::replace(&mut self.state, StreamState::Done) {
            StreamState::Initial => self.start(),
            StreamState::Elements(mut cursor) => {
                let outcome = cursor.next_document(&self.path, &self.options);
                if matches!(outcome, Ok(Some(_))) {
                    self.state = StreamState::Elements(cursor);
                }
                outcome
            }
            StreamState::Done => return None,
        };

        match outcome {
            Ok(doc) => doc.map(Ok),
            Err(err) => self.contain(err),
        }
    }
}

/// Feature stages in elements mode, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Body,
    Tables,
    Notes,
    Memos,
    Hyperlinks,
    Images,
    Finished,
}

/// A discovered element waiting to be turned into a document.
enum Pending {
    Body(String),
    Table(Box<dyn TableHandle>),
    Note(Note),
    Memo(Memo),
    Hyperlink(Hyperlink),
    Image(usize, Box<dyn ImageHandle>),
}

/// Walks the features of one extraction result, one element at a time.
///
/// Each feature is collected only when the previous ones are exhausted, and
/// image materialization happens as its document is requested.
struct ElementCursor {
    reader: Box<dyn DocumentReader>,
    result: ExtractionResult,
    base: Metadata,
    stage: Stage,
    queue: VecDeque<Pending>,
    next_index: i64,
}

impl ElementCursor {
    fn new(reader: Box<dyn DocumentReader>, result: ExtractionResult, base: Metadata) -> Self {
        Self {
            reader,
            result,
            base,
            stage: Stage::Body,
            queue: VecDeque::new(),
            next_index: 0,
        }
    }

    fn next_document(&mut self, path: &Path, options: &LoaderOptions) -> Result<Option<Document>> {
        loop {
            if let Some(pending) = self.queue.pop_front() {
                match self.render(pending, path, options)? {
                    Some(doc) => return Ok(Some(doc)),
                    None => continue,
                }
            }

            match self.stage {
                Stage::Body => {
                    self.stage = Stage::Tables;
                    let body = body_text(self.reader.as_ref(), &self.result)?;
                    if !body.is_empty() {
                        self.queue.push_back(Pending::Body(body));
                    }
                }
                Stage::Tables => {
                    self.stage = Stage::Notes;
                    if options.include_tables {
                        let tables = collect_tables(self.reader.as_ref(), &mut self.result)?;
                        self.queue.extend(tables.into_iter().map(Pending::Table));
                    }
                }
                Stage::Notes => {
                    self.stage = Stage::Memos;
                    if options.include_notes {
                        let notes = self.result.notes.take().unwrap_or_default();
                        self.queue.extend(notes.into_iter().map(Pending::Note));
                    }
                }
                Stage::Memos => {
                    self.stage = Stage::Hyperlinks;
                    if options.include_memos {
                        let memos = self.result.memos.take().unwrap_or_default();
                        self.queue.extend(memos.into_iter().map(Pending::Memo));
                    }
                }
                Stage::Hyperlinks => {
                    self.stage = Stage::Images;
                    if options.include_hyperlinks {
                        let links = self.result.hyperlinks.take().unwrap_or_default();
                        self.queue.extend(links.into_iter().map(Pending::Hyperlink));
                    }
                }
                Stage::Images => {
                    self.stage = Stage::Finished;
                    if options.include_images {
                        let images = self.reader.images()?;
                        log::debug!("{} images in {}", images.len(), path.display());
                        self.queue.extend(
                            images
                                .into_iter()
                                .enumerate()
                                .map(|(i, image)| Pending::Image(i, image)),
                        );
                    }
                }
                Stage::Finished => return Ok(None),
            }
        }
    }

    /// Render one element; `None` means the element was dropped.
    fn render(
        &mut self,
        pending: Pending,
        path: &Path,
        options: &LoaderOptions,
    ) -> Result<Option<Document>> {
        let (element_type, content, extra) = match pending {
            Pending::Body(text) => (ElementType::Body, text, Metadata::new()),
            Pending::Table(table) => {
                let content = render_table(table.as_ref(), options.extract_options.as_ref())?;
                let mut extra = Metadata::new();
                if let Some(rows) = table.row_count() {
                    extra.insert("row_count", rows);
                }
                if let Some(cols) = table.col_count() {
                    extra.insert("col_count", cols);
                }
                (ElementType::Table, content, extra)
            }
            Pending::Note(note) => {
                let element_type = if note.is_endnote() {
                    ElementType::Endnote
                } else {
                    ElementType::Footnote
                };
                let mut extra = Metadata::new();
                extra.insert("note_type", note.kind());
                if let Some(number) = note.number {
                    extra.insert("note_number", number);
                }
                (element_type, note.trimmed_text().to_string(), extra)
            }
            Pending::Memo(memo) => {
                let extra: Metadata = memo.attributes().collect();
                (ElementType::Memo, memo.trimmed_text().to_string(), extra)
            }
            Pending::Hyperlink(link) => {
                let (text, url) = link.normalize();
                if text.is_empty() && url.is_empty() {
                    return Ok(None);
                }
                let mut extra = Metadata::new();
                if !url.is_empty() {
                    extra.insert("url", url.as_str());
                }
                if !text.is_empty() {
                    extra.insert("text", text.as_str());
                }
                let content = if text.is_empty() { url } else { text };
                (ElementType::Hyperlink, content, extra)
            }
            Pending::Image(image_index, image) => {
                let mut extra = Metadata::new();
                let content =
                    materialize_image(image.as_ref(), image_index, path, options, &mut extra)?;
                (ElementType::Image, content, extra)
            }
        };

        let mut metadata = self.base.clone();
        metadata.insert("element_type", element_type.as_str());
        metadata.insert("element_index", self.next_index);
        metadata.extend(&extra);
        self.next_index += 1;

        Ok(Some(Document::new(content, metadata)))
    }
}

/// Body text from the extraction result, falling back to the reader's raw text.
fn body_text(reader: &dyn DocumentReader, result: &ExtractionResult) -> Result<String> {
    let text = result.text.as_deref().unwrap_or("").trim();
    if !text.is_empty() {
        return Ok(text.to_string());
    }
    Ok(reader.text()?.trim().to_string())
}

/// Tables from the extraction result, or from the reader when it has none.
fn collect_tables(
    reader: &dyn DocumentReader,
    result: &mut ExtractionResult,
) -> Result<Vec<Box<dyn TableHandle>>> {
    match result.tables.take() {
        Some(tables) => Ok(tables),
        None => reader.tables(),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
