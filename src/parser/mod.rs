//! Parser collaborator contract.
//!
//! hwp-loader does not read HWP or HWPX bytes itself. A [`ParserBackend`]
//! opens files and hands back a [`DocumentReader`]; everything the loader
//! needs from the format lives behind these traits.

mod backend;
mod options;
mod records;

pub use backend::{DocumentReader, ImageHandle, ParserBackend, ReportedFileType, TableHandle};
pub use options::{ExtractOptions, TableStyle};
pub use records::{ExtractionResult, Hyperlink, Memo, Note};
