//! Document model types for loader output.
//!
//! This module defines the uniform representation handed to retrieval and
//! indexing pipelines. Every produced unit is a [`Document`]: text content
//! plus a flat, deterministic metadata map.

mod document;
mod metadata;

pub use document::{Document, DocumentStatus, ElementType};
pub use metadata::{Metadata, MetadataValue};
