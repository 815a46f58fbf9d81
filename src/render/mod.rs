//! Rendering of extracted features into flat text.
//!
//! Tables render through whichever capability the table handle offers;
//! notes, memos, hyperlinks and images render as headed sections for
//! single-mode documents.

mod json;
mod sections;
mod table;

pub use json::{to_json, JsonFormat};
pub use sections::{
    render_hyperlinks_section, render_images_section, render_memos_section,
    render_notes_section, render_tables_section,
};
pub use table::render_table;
