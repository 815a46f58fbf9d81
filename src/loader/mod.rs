//! Document loaders.
//!
//! [`HwpLoader`] turns one file into documents; [`DirectoryLoader`] walks a
//! directory and feeds every matching file through an `HwpLoader`. Both
//! produce documents lazily through [`DocumentLoader::lazy_load`].
//!
//! # Example
//!
//! ```no_run
//! use hwp_loader::loader::{DocumentLoader, HwpLoader, LoaderOptions, StatusPolicy};
//! use hwp_loader::parser::ParserBackend;
//! use std::sync::Arc;
//!
//! fn run(backend: Arc<dyn ParserBackend>) -> hwp_loader::Result<()> {
//!     let options = LoaderOptions::new()
//!         .elements()
//!         .on_encrypted(StatusPolicy::Placeholder);
//!     let loader = HwpLoader::new("report.hwpx", options, backend);
//!
//!     for doc in loader.lazy_load()? {
//!         let doc = doc?;
//!         println!("{:?}: {}", doc.element_type(), doc.page_content);
//!     }
//!     Ok(())
//! }
//! ```

mod directory;
mod file;
mod image;
mod options;

pub use directory::{DirectoryDocuments, DirectoryLoader, DirectoryOptions};
pub use file::{FileDocuments, HwpLoader, LOADER_ID};
pub use options::{ErrorPolicy, ImageDocumentMode, LoaderOptions, Mode, StatusPolicy};

use crate::error::Result;
use crate::model::Document;

/// Trait for document loaders.
///
/// `lazy_load` checks preconditions immediately and returns a stream that
/// does the actual parsing as it is pulled. A stream is finite and cannot
/// be restarted; calling `lazy_load` again parses again. Dropping a stream
/// early has no side effects.
pub trait DocumentLoader {
    /// Stream of loaded documents.
    type Stream: Iterator<Item = Result<Document>>;

    /// Start loading.
    fn lazy_load(&self) -> Result<Self::Stream>;

    /// Load every document, stopping at the first error.
    fn load(&self) -> Result<Vec<Document>> {
        self.lazy_load()?.collect()
    }
}
