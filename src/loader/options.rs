//! Loader options and policies.

use crate::error::{Error, Result};
use crate::model::{Metadata, MetadataValue};
use crate::parser::ExtractOptions;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Options for loading HWP/HWPX documents.
///
/// All options are fixed when a loader is built. Enumerated options parsed
/// from text (via [`FromStr`] or [`LoaderOptions::from_json`]) are checked
/// against their legal values at that point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderOptions {
    /// One document per file, or one per element
    pub mode: Mode,

    /// Options handed to the parser's structured extraction
    pub extract_options: Option<ExtractOptions>,

    /// Include tables
    pub include_tables: bool,

    /// Include footnotes and endnotes
    pub include_notes: bool,

    /// Include memos
    pub include_memos: bool,

    /// Include hyperlinks
    pub include_hyperlinks: bool,

    /// Include embedded images
    pub include_images: bool,

    /// Directory images are saved to in `save_and_reference` mode
    pub images_dir: Option<PathBuf>,

    /// What to do with embedded images
    pub image_document_mode: ImageDocumentMode,

    /// Policy for encrypted documents
    pub on_encrypted: StatusPolicy,

    /// Policy for invalid documents
    pub on_invalid: StatusPolicy,

    /// Policy for runtime parsing failures
    pub on_error: ErrorPolicy,

    /// Metadata applied on top of the loader's own keys
    pub extra_metadata: Metadata,

    /// Record the extraction time as `extracted_at`
    pub include_extracted_at: bool,
}

impl LoaderOptions {
    /// Create new loader options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from a JSON object.
    ///
    /// Unknown keys and out-of-range enumerated values are rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    /// Set the output mode.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Emit one document per element.
    pub fn elements(mut self) -> Self {
        self.mode = Mode::Elements;
        self
    }

    /// Set extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract_options = Some(options);
        self
    }

    /// Include or exclude tables.
    pub fn with_tables(mut self, include: bool) -> Self {
        self.include_tables = include;
        self
    }

    /// Include or exclude notes.
    pub fn with_notes(mut self, include: bool) -> Self {
        self.include_notes = include;
        self
    }

    /// Include or exclude memos.
    pub fn with_memos(mut self, include: bool) -> Self {
        self.include_memos = include;
        self
    }

    /// Include or exclude hyperlinks.
    pub fn with_hyperlinks(mut self, include: bool) -> Self {
        self.include_hyperlinks = include;
        self
    }

    /// Include or exclude images.
    pub fn with_images(mut self, include: bool) -> Self {
        self.include_images = include;
        self
    }

    /// Set the image output directory.
    pub fn with_images_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.images_dir = Some(dir.into());
        self
    }

    /// Set the image document mode.
    pub fn with_image_document_mode(mut self, mode: ImageDocumentMode) -> Self {
        self.image_document_mode = mode;
        self
    }

    /// Set the policy for encrypted documents.
    pub fn on_encrypted(mut self, policy: StatusPolicy) -> Self {
        self.on_encrypted = policy;
        self
    }

    /// Set the policy for invalid documents.
    pub fn on_invalid(mut self, policy: StatusPolicy) -> Self {
        self.on_invalid = policy;
        self
    }

    /// Set the policy for runtime failures.
    pub fn on_error(mut self, policy: ErrorPolicy) -> Self {
        self.on_error = policy;
        self
    }

    /// Add a metadata overlay entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.extra_metadata.insert(key, value);
        self
    }

    /// Enable or disable the `extracted_at` timestamp.
    pub fn with_extracted_at(mut self, include: bool) -> Self {
        self.include_extracted_at = include;
        self
    }
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            mode: Mode::Single,
            extract_options: None,
            include_tables: true,
            include_notes: true,
            include_memos: true,
            include_hyperlinks: true,
            include_images: false,
            images_dir: None,
            image_document_mode: ImageDocumentMode::MetadataOnly,
            on_encrypted: StatusPolicy::Raise,
            on_invalid: StatusPolicy::Raise,
            on_error: ErrorPolicy::Raise,
            extra_metadata: Metadata::new(),
            include_extracted_at: true,
        }
    }
}

/// Check `value` against `choices`, reporting the legal values on failure.
fn parse_choice<T: Copy>(name: &str, value: &str, choices: &[(&str, T)]) -> Result<T> {
    if let Some((_, choice)) = choices.iter().find(|(label, _)| *label == value) {
        return Ok(*choice);
    }
    let mut labels: Vec<&str> = choices.iter().map(|(label, _)| *label).collect();
    labels.sort_unstable();
    Err(Error::Config(format!(
        "Invalid {}='{}'. Expected one of: {}",
        name,
        value,
        labels.join(", ")
    )))
}

/// Output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Mode {
    /// One aggregated document per file
    #[default]
    Single,
    /// One document per discovered element
    Elements,
}

impl Mode {
    const CHOICES: [(&'static str, Mode); 2] = [("single", Mode::Single), ("elements", Mode::Elements)];

    /// Option value for this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Single => "single",
            Mode::Elements => "elements",
        }
    }
}

/// Policy for files flagged encrypted or invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum StatusPolicy {
    /// Fail the load
    #[default]
    Raise,
    /// Produce nothing for the file
    Skip,
    /// Produce a single placeholder document
    Placeholder,
}

impl StatusPolicy {
    const CHOICES: [(&'static str, StatusPolicy); 3] = [
        ("raise", StatusPolicy::Raise),
        ("skip", StatusPolicy::Skip),
        ("placeholder", StatusPolicy::Placeholder),
    ];

    /// Option value for this policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusPolicy::Raise => "raise",
            StatusPolicy::Skip => "skip",
            StatusPolicy::Placeholder => "placeholder",
        }
    }
}

/// Policy for runtime failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum ErrorPolicy {
    /// Surface a wrapped error
    #[default]
    Raise,
    /// Stop silently
    Skip,
    /// Log a warning and stop
    Warn,
}

impl ErrorPolicy {
    const CHOICES: [(&'static str, ErrorPolicy); 3] = [
        ("raise", ErrorPolicy::Raise),
        ("skip", ErrorPolicy::Skip),
        ("warn", ErrorPolicy::Warn),
    ];

    /// Option value for this policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorPolicy::Raise => "raise",
            ErrorPolicy::Skip => "skip",
            ErrorPolicy::Warn => "warn",
        }
    }
}

/// How embedded images become document content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum ImageDocumentMode {
    /// Describe the image only
    #[default]
    MetadataOnly,
    /// Save the image to `images_dir` and reference the saved path
    SaveAndReference,
}

impl ImageDocumentMode {
    const CHOICES: [(&'static str, ImageDocumentMode); 2] = [
        ("metadata_only", ImageDocumentMode::MetadataOnly),
        ("save_and_reference", ImageDocumentMode::SaveAndReference),
    ];

    /// Option value for this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageDocumentMode::MetadataOnly => "metadata_only",
            ImageDocumentMode::SaveAndReference => "save_and_reference",
        }
    }
}

macro_rules! impl_choice {
    ($ty:ty, $name:literal) => {
        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                parse_choice($name, s, &Self::CHOICES)
            }
        }

        impl TryFrom<String> for $ty {
            type Error = Error;

            fn try_from(s: String) -> Result<Self> {
                s.parse()
            }
        }

        impl From<$ty> for &'static str {
            fn from(value: $ty) -> Self {
                value.as_str()
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

impl_choice!(Mode, "mode");
impl_choice!(StatusPolicy, "status policy");
impl_choice!(ErrorPolicy, "on_error");
impl_choice!(ImageDocumentMode, "image_document_mode");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = LoaderOptions::default();
        assert_eq!(options.mode, Mode::Single);
        assert!(options.include_tables);
        assert!(options.include_notes);
        assert!(options.include_memos);
        assert!(options.include_hyperlinks);
        assert!(!options.include_images);
        assert_eq!(options.image_document_mode, ImageDocumentMode::MetadataOnly);
        assert_eq!(options.on_encrypted, StatusPolicy::Raise);
        assert_eq!(options.on_invalid, StatusPolicy::Raise);
        assert_eq!(options.on_error, ErrorPolicy::Raise);
        assert!(options.include_extracted_at);
    }

    #[test]
    fn test_loader_options_builder() {
        let options = LoaderOptions::new()
            .elements()
            .with_images(true)
            .with_images_dir("./images")
            .on_encrypted(StatusPolicy::Placeholder)
            .on_error(ErrorPolicy::Warn)
            .with_metadata("team", "search")
            .with_extracted_at(false);

        assert_eq!(options.mode, Mode::Elements);
        assert!(options.include_images);
        assert_eq!(options.images_dir, Some(PathBuf::from("./images")));
        assert_eq!(options.on_encrypted, StatusPolicy::Placeholder);
        assert_eq!(options.on_error, ErrorPolicy::Warn);
        assert_eq!(options.extra_metadata.get_str("team"), Some("search"));
        assert!(!options.include_extracted_at);
    }

    #[test]
    fn test_parse_valid_choices() {
        assert_eq!("elements".parse::<Mode>().unwrap(), Mode::Elements);
        assert_eq!(
            "placeholder".parse::<StatusPolicy>().unwrap(),
            StatusPolicy::Placeholder
        );
        assert_eq!("warn".parse::<ErrorPolicy>().unwrap(), ErrorPolicy::Warn);
        assert_eq!(
            "save_and_reference".parse::<ImageDocumentMode>().unwrap(),
            ImageDocumentMode::SaveAndReference
        );
    }

    #[test]
    fn test_invalid_choice_lists_sorted_options() {
        let err = "pages".parse::<Mode>().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(
            err.to_string(),
            "Invalid mode='pages'. Expected one of: elements, single"
        );

        let err = "ignore".parse::<ErrorPolicy>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid on_error='ignore'. Expected one of: raise, skip, warn"
        );
    }

    #[test]
    fn test_from_json() {
        let options = LoaderOptions::from_json(
            r#"{
                "mode": "elements",
                "on_encrypted": "skip",
                "include_images": true,
                "extract_options": {"table_style": "CSV", "table_delimiter": ";"},
                "extra_metadata": {"tenant": "acme", "priority": 2}
            }"#,
        )
        .unwrap();

        assert_eq!(options.mode, Mode::Elements);
        assert_eq!(options.on_encrypted, StatusPolicy::Skip);
        assert_eq!(options.on_invalid, StatusPolicy::Raise);
        assert!(options.include_images);
        assert!(options.include_tables);
        assert_eq!(options.extra_metadata.get_int("priority"), Some(2));
        let extract = options.extract_options.unwrap();
        assert_eq!(extract.csv_delimiter(), ";");
    }

    #[test]
    fn test_from_json_rejects_invalid_policy() {
        let err = LoaderOptions::from_json(r#"{"on_invalid": "ignore"}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("Invalid status policy='ignore'"));
    }

    #[test]
    fn test_from_json_rejects_unknown_keys() {
        let err = LoaderOptions::from_json(r#"{"mode": "single", "pages": 3}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_options_serialize_as_option_values() {
        let json = serde_json::to_string(&LoaderOptions::new().elements()).unwrap();
        assert!(json.contains(r#""mode":"elements""#));
        assert!(json.contains(r#""image_document_mode":"metadata_only""#));
    }
}
