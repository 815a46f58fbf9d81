//! Error types for hwp-loader.

use crate::model::DocumentStatus;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for hwp-loader operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading HWP/HWPX documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An option was given a value outside its declared choices.
    #[error("{0}")]
    Config(String),

    /// The input path does not exist.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A directory loader was pointed at something other than a directory.
    #[error("Expected directory path: {}", .0.display())]
    NotADirectory(PathBuf),

    /// The file extension is not `.hwp` or `.hwpx`.
    #[error("Unsupported extension for {}. Use .hwp or .hwpx", .0.display())]
    UnsupportedExtension(PathBuf),

    /// The document was flagged encrypted or invalid and the policy is `raise`.
    #[error("Document skipped because it is {status}: {}", .path.display())]
    Status {
        /// Reported status
        status: DocumentStatus,
        /// Offending file
        path: PathBuf,
    },

    /// A runtime failure while parsing a single file.
    #[error("Failed to parse {}: {kind}", .path.display())]
    Parse {
        /// Offending file
        path: PathBuf,
        /// Class of the underlying failure
        kind: String,
        /// Underlying failure
        #[source]
        source: Box<Error>,
    },

    /// A runtime failure surfaced while loading a directory.
    #[error("Failed to load file {}: {kind}", .path.display())]
    Load {
        /// Offending file
        path: PathBuf,
        /// Class of the underlying failure
        kind: String,
        /// Underlying failure
        #[source]
        source: Box<Error>,
    },

    /// Failure reported by the parser backend.
    #[error("{kind}: {message}")]
    Backend {
        /// Failure class named by the backend (e.g. "DecodeError")
        kind: String,
        /// Backend message
        message: String,
    },

    /// Invalid glob pattern for directory matching.
    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a backend failure.
    pub fn backend(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Backend {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Name of the failure class, used when wrapping errors.
    pub fn kind(&self) -> &str {
        match self {
            Error::Io(_) => "Io",
            Error::Config(_) => "Config",
            Error::NotFound(_) => "NotFound",
            Error::NotADirectory(_) => "NotADirectory",
            Error::UnsupportedExtension(_) => "UnsupportedExtension",
            Error::Status { .. } => "Status",
            Error::Parse { .. } => "Parse",
            Error::Load { .. } => "Load",
            Error::Backend { kind, .. } => kind,
            Error::Pattern(_) => "Pattern",
            Error::Serialization(_) => "Serialization",
        }
    }

    /// Whether this error already carries loader context.
    ///
    /// Structured errors propagate unchanged through every containment layer.
    pub fn is_structured(&self) -> bool {
        matches!(
            self,
            Error::Status { .. } | Error::Parse { .. } | Error::Load { .. }
        )
    }

    /// Wrap a single-file runtime failure, leaving structured errors as they are.
    pub(crate) fn into_parse(self, path: impl Into<PathBuf>) -> Self {
        if self.is_structured() {
            return self;
        }
        Error::Parse {
            path: path.into(),
            kind: self.kind().to_string(),
            source: Box::new(self),
        }
    }

    /// Wrap a directory-level failure, leaving structured errors as they are.
    pub(crate) fn into_load(self, path: impl Into<PathBuf>) -> Self {
        if self.is_structured() {
            return self;
        }
        Error::Load {
            path: path.into(),
            kind: self.kind().to_string(),
            source: Box::new(self),
        }
    }
}
