//! HWP/HWPX format detection and file type normalization.

use crate::parser::ReportedFileType;
use std::fmt;
use std::path::Path;

/// Extensions the single-file loader accepts, with leading dot.
pub const SUPPORTED_EXTENSIONS: [&str; 2] = [".hwp", ".hwpx"];

/// Normalized document file type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    /// HWP 5.x binary document
    Hwp,
    /// HWPX (OWPML) package
    Hwpx,
}

impl FileType {
    /// Metadata token for this file type.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Hwp => "hwp",
            FileType::Hwpx => "hwpx",
        }
    }

    /// Classify a single token (type label, variant name, extension).
    fn from_token(token: &str) -> Option<Self> {
        let lowered = token.to_lowercase();
        if lowered.contains("hwpx") {
            return Some(FileType::Hwpx);
        }
        if lowered.contains("hwp5") || lowered == "hwp" {
            return Some(FileType::Hwp);
        }
        if lowered.ends_with(".hwpx") {
            return Some(FileType::Hwpx);
        }
        if lowered.ends_with(".hwp") {
            return Some(FileType::Hwp);
        }
        None
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lower-cased extension of `path` with a leading dot, empty if none.
pub fn dotted_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// Check whether `path` has a supported extension (case-insensitive).
pub fn is_supported_extension(path: &Path) -> bool {
    let ext = dotted_extension(path);
    SUPPORTED_EXTENSIONS.contains(&ext.as_str())
}

/// Normalize the file type token recorded in metadata.
///
/// The reader's reported type is inspected first (label, name, value), then
/// the path extension. When nothing is recognized, the bare lower-cased
/// extension is returned.
///
/// # Example
/// ```
/// use hwp_loader::detect::normalize_file_type;
/// use hwp_loader::parser::ReportedFileType;
/// use std::path::Path;
///
/// let reported = ReportedFileType::labeled("FileType.HWP5");
/// assert_eq!(normalize_file_type(Some(&reported), Path::new("a.hwpx")), "hwp");
/// assert_eq!(normalize_file_type(None, Path::new("a.HWPX")), "hwpx");
/// ```
pub fn normalize_file_type(reported: Option<&ReportedFileType>, path: &Path) -> String {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_default();

    let detected = reported
        .into_iter()
        .flat_map(|r| r.candidates())
        .chain(std::iter::once(extension.as_str()))
        .find_map(FileType::from_token);

    match detected {
        Some(file_type) => file_type.as_str().to_string(),
        None => extension.to_lowercase(),
    }
}
