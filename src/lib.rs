//! # hwp-loader
//!
//! HWP/HWPX document loading for retrieval and indexing pipelines.
//!
//! This library turns word-processor files into uniform [`Document`]s: text
//! content plus flat metadata. Parsing the file format itself is delegated to
//! a [`ParserBackend`]; the loader decides how each extracted feature is
//! rendered and how encrypted, invalid and failing files are handled.
//!
//! ## Quick Start
//!
//! ```no_run
//! use hwp_loader::{load_file, LoaderOptions, ParserBackend};
//! use std::sync::Arc;
//!
//! fn run(backend: Arc<dyn ParserBackend>) -> hwp_loader::Result<()> {
//!     let docs = load_file("report.hwpx", LoaderOptions::default(), backend)?;
//!     println!("{}", docs[0].page_content);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Two output modes**: one aggregated document per file, or one per element
//! - **Feature sections**: tables, footnotes/endnotes, memos, hyperlinks, images
//! - **Status policies**: raise, skip or placeholder for encrypted/invalid files
//! - **Error policies**: raise, skip or warn for runtime failures
//! - **Directory loading**: deterministic order, glob and extension filters
//! - **Lazy streams**: documents are produced as they are pulled

pub mod detect;
pub mod error;
pub mod loader;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use detect::{is_supported_extension, normalize_file_type, FileType, SUPPORTED_EXTENSIONS};
pub use error::{Error, Result};
pub use loader::{
    DirectoryLoader, DirectoryOptions, DocumentLoader, ErrorPolicy, HwpLoader, ImageDocumentMode,
    LoaderOptions, Mode, StatusPolicy,
};
pub use model::{Document, DocumentStatus, ElementType, Metadata, MetadataValue};
pub use parser::{
    DocumentReader, ExtractOptions, ExtractionResult, ParserBackend, TableHandle, TableStyle,
};
pub use render::JsonFormat;

use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Load every document from a single file.
///
/// # Example
///
/// ```no_run
/// use hwp_loader::{load_file, LoaderOptions, ParserBackend, StatusPolicy};
/// use std::sync::Arc;
///
/// # fn run(backend: Arc<dyn ParserBackend>) -> hwp_loader::Result<()> {
/// let options = LoaderOptions::new()
///     .elements()
///     .on_encrypted(StatusPolicy::Placeholder);
/// for doc in load_file("minutes.hwp", options, backend)? {
///     println!("{:?}", doc.element_type());
/// }
/// # Ok(())
/// # }
/// ```
pub fn load_file<P: AsRef<Path>>(
    path: P,
    options: LoaderOptions,
    backend: Arc<dyn ParserBackend>,
) -> Result<Vec<Document>> {
    HwpLoader::new(path.as_ref(), options, backend).load()
}

/// Load every matching file under a directory with default matching rules.
///
/// All `.hwp` and `.hwpx` files are loaded recursively; the directory error
/// policy follows the per-file `on_error`.
pub fn load_directory<P: AsRef<Path>>(
    root: P,
    options: LoaderOptions,
    backend: Arc<dyn ParserBackend>,
) -> Result<Vec<Document>> {
    load_directory_with_options(root, DirectoryOptions::default(), options, backend)
}

/// Load every matching file under a directory.
///
/// # Example
///
/// ```no_run
/// use hwp_loader::{load_directory_with_options, DirectoryOptions, ErrorPolicy};
/// use hwp_loader::{LoaderOptions, ParserBackend};
/// use std::sync::Arc;
///
/// # fn run(backend: Arc<dyn ParserBackend>) -> hwp_loader::Result<()> {
/// let directory = DirectoryOptions::new()
///     .with_recursive(false)
///     .on_error(ErrorPolicy::Warn);
/// let docs = load_directory_with_options("./docs", directory, LoaderOptions::default(), backend)?;
/// println!("{} documents", docs.len());
/// # Ok(())
/// # }
/// ```
pub fn load_directory_with_options<P: AsRef<Path>>(
    root: P,
    directory: DirectoryOptions,
    options: LoaderOptions,
    backend: Arc<dyn ParserBackend>,
) -> Result<Vec<Document>> {
    DirectoryLoader::new(root.as_ref(), directory, options, backend)?.load()
}

/// Load a single file and convert its documents to JSON.
///
/// # Example
///
/// ```no_run
/// use hwp_loader::{to_json, JsonFormat, LoaderOptions, ParserBackend};
/// use std::sync::Arc;
///
/// # fn run(backend: Arc<dyn ParserBackend>) -> hwp_loader::Result<()> {
/// let json = to_json("report.hwp", LoaderOptions::default(), backend, JsonFormat::Pretty)?;
/// std::fs::write("report.json", json)?;
/// # Ok(())
/// # }
/// ```
pub fn to_json<P: AsRef<Path>>(
    path: P,
    options: LoaderOptions,
    backend: Arc<dyn ParserBackend>,
    format: JsonFormat,
) -> Result<String> {
    let docs = load_file(path, options, backend)?;
    render::to_json(&docs, format)
}

/// Builder for loading HWP/HWPX documents.
///
/// # Example
///
/// ```no_run
/// use hwp_loader::{HwpLoad, ParserBackend};
/// use std::sync::Arc;
///
/// # fn run(backend: Arc<dyn ParserBackend>) -> hwp_loader::Result<()> {
/// let docs = HwpLoad::new(backend)
///     .elements()
///     .with_images(true)
///     .with_images_dir("./images")
///     .with_metadata("collection", "minutes")
///     .file("minutes.hwpx")?;
/// # Ok(())
/// # }
/// ```
pub struct HwpLoad {
    options: LoaderOptions,
    directory: DirectoryOptions,
    backend: Arc<dyn ParserBackend>,
}

impl HwpLoad {
    /// Create a builder around a parser backend.
    pub fn new(backend: Arc<dyn ParserBackend>) -> Self {
        Self {
            options: LoaderOptions::default(),
            directory: DirectoryOptions::default(),
            backend,
        }
    }

    /// Produce one document per element.
    pub fn elements(mut self) -> Self {
        self.options = self.options.elements();
        self
    }

    /// Set extraction options passed to the parser.
    pub fn with_extract_options(mut self, extract: ExtractOptions) -> Self {
        self.options = self.options.with_extract_options(extract);
        self
    }

    /// Enable image extraction.
    pub fn with_images(mut self, include: bool) -> Self {
        self.options = self.options.with_images(include);
        self
    }

    /// Save images to `dir` and reference them from the content.
    pub fn with_images_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options = self
            .options
            .with_images_dir(dir)
            .with_image_document_mode(ImageDocumentMode::SaveAndReference);
        self
    }

    /// Set the policy for encrypted and invalid files.
    pub fn with_status_policy(mut self, policy: StatusPolicy) -> Self {
        self.options = self.options.on_encrypted(policy).on_invalid(policy);
        self
    }

    /// Set the runtime error policy.
    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.options = self.options.on_error(policy);
        self
    }

    /// Add a metadata entry to every document.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.options = self.options.with_metadata(key, value);
        self
    }

    /// Omit the `extracted_at` timestamp.
    pub fn without_timestamp(mut self) -> Self {
        self.options = self.options.with_extracted_at(false);
        self
    }

    /// Restrict directory loading to the top level.
    pub fn non_recursive(mut self) -> Self {
        self.directory = self.directory.with_recursive(false);
        self
    }

    /// Set the directory glob pattern.
    pub fn with_glob(mut self, glob: impl Into<String>) -> Self {
        self.directory = self.directory.with_glob(glob);
        self
    }

    /// Loader options built so far.
    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    /// Load a single file.
    pub fn file<P: AsRef<Path>>(self, path: P) -> Result<Vec<Document>> {
        load_file(path, self.options, self.backend)
    }

    /// Load every matching file under a directory.
    pub fn directory<P: AsRef<Path>>(self, root: P) -> Result<Vec<Document>> {
        load_directory_with_options(root, self.directory, self.options, self.backend)
    }
}
