//! Embedded image materialization.

use super::{ImageDocumentMode, LoaderOptions};
use crate::error::Result;
use crate::model::Metadata;
use crate::parser::ImageHandle;
use std::fs;
use std::path::Path;

/// Turn an image into document content, recording its details in `metadata`.
///
/// `image_index` is the image's position among the file's images and only
/// names images the document left unnamed (`image_000.png`). In
/// `save_and_reference` mode with an image directory configured, the image
/// is written out and the returned text points at the saved path; otherwise
/// the returned text only describes the image.
pub(crate) fn materialize_image(
    image: &dyn ImageHandle,
    image_index: usize,
    source: &Path,
    options: &LoaderOptions,
    metadata: &mut Metadata,
) -> Result<String> {
    let filename = image.filename().unwrap_or_default().trim().to_string();
    let mut format = image
        .format()
        .unwrap_or_default()
        .trim()
        .to_lowercase();
    if format.is_empty() {
        format = "bin".to_string();
    }
    let generated = format!("image_{:03}.{}", image_index, format);
    let name = if filename.is_empty() {
        generated.clone()
    } else {
        filename
    };

    metadata.insert("filename", name.as_str());
    metadata.insert("image_format", format.as_str());

    if options.image_document_mode == ImageDocumentMode::SaveAndReference {
        if let Some(ref dir) = options.images_dir {
            fs::create_dir_all(dir)?;
            // Only the final component of the reported name lands in `images_dir`.
            let file_name = Path::new(&name)
                .file_name()
                .map(|n| n.to_os_string())
                .unwrap_or_else(|| generated.into());
            let mut output = dir.join(file_name);
            if output.extension().is_none() {
                output.set_extension(&format);
            }
            if image.supports_save() {
                image.save(&output)?;
                log::debug!("Saved image {} to {}", name, output.display());
                metadata.insert("saved_path", output.to_string_lossy().into_owned());
                return Ok(format!("{} -> {}", name, output.display()));
            }
        }
    }

    let source_name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(format!("{} ({}) from {}", name, format, source_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;

    #[derive(Default)]
    struct FakeImage {
        filename: Option<String>,
        format: Option<String>,
        saved: RefCell<Option<PathBuf>>,
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
            *self.saved.borrow_mut() = Some(path.to_path_buf());
            Ok(())
        }
    }

    struct UnsavableImage;

    impl ImageHandle for UnsavableImage {
        fn format(&self) -> Option<String> {
            Some("PNG".to_string())
        }
    }

    #[test]
    fn test_metadata_only_describes_image() {
        let image = FakeImage {
            filename: Some("diagram.png".to_string()),
            format: Some("PNG".to_string()),
            ..Default::default()
        };
        let mut metadata = Metadata::new();
        let content = materialize_image(
            &image,
            0,
            Path::new("/docs/sample.hwp"),
            &LoaderOptions::default(),
            &mut metadata,
        )
        .unwrap();

        assert_eq!(content, "diagram.png (png) from sample.hwp");
        assert_eq!(metadata.get_str("filename"), Some("diagram.png"));
        assert_eq!(metadata.get_str("image_format"), Some("png"));
        assert!(image.saved.borrow().is_none());
    }

    #[test]
    fn test_generated_name_and_default_format() {
        let image = FakeImage::default();
        let mut metadata = Metadata::new();
        let content = materialize_image(
            &image,
            7,
            Path::new("a.hwpx"),
            &LoaderOptions::default(),
            &mut metadata,
        )
        .unwrap();

        assert_eq!(content, "image_007.bin (bin) from a.hwpx");
        assert_eq!(metadata.get_str("filename"), Some("image_007.bin"));
    }

    #[test]
    fn test_save_and_reference_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let images_dir = dir.path().join("nested").join("images");
        let options = LoaderOptions::new()
            .with_image_document_mode(ImageDocumentMode::SaveAndReference)
            .with_images_dir(&images_dir);

        let image = FakeImage {
            filename: Some("figure".to_string()),
            format: Some("jpg".to_string()),
            ..Default::default()
        };
        let mut metadata = Metadata::new();
        let content =
            materialize_image(&image, 0, Path::new("a.hwp"), &options, &mut metadata).unwrap();

        let expected = images_dir.join("figure.jpg");
        assert!(expected.exists());
        assert_eq!(content, format!("figure -> {}", expected.display()));
        assert_eq!(
            metadata.get_str("saved_path"),
            Some(&*expected.to_string_lossy())
        );
    }

    #[test]
    fn test_save_and_reference_stays_inside_images_dir() {
        let dir = tempfile::tempdir().unwrap();
        let images_dir = dir.path().join("images");
        let options = LoaderOptions::new()
            .with_image_document_mode(ImageDocumentMode::SaveAndReference)
            .with_images_dir(&images_dir);

        let absolute = dir.path().join("escaped.png");
        let cases = [
            (absolute.to_string_lossy().into_owned(), "escaped.png"),
            ("../up.png".to_string(), "up.png"),
            ("nested/../../deep.png".to_string(), "deep.png"),
            ("..".to_string(), "image_003.png"),
        ];

        for (reported, expected) in cases {
            let image = FakeImage {
                filename: Some(reported.clone()),
                format: Some("png".to_string()),
                ..Default::default()
            };
            let mut metadata = Metadata::new();
            materialize_image(&image, 3, Path::new("a.hwp"), &options, &mut metadata).unwrap();

            let saved = image.saved.borrow().clone().unwrap();
            assert_eq!(saved, images_dir.join(expected), "reported {}", reported);
            assert_eq!(metadata.get_str("filename"), Some(reported.as_str()));
        }

        assert!(!dir.path().join("escaped.png").exists());
        assert!(!dir.path().join("up.png").exists());
    }

    #[test]
    fn test_save_mode_without_save_capability_describes_image() {
        let dir = tempfile::tempdir().unwrap();
        let options = LoaderOptions::new()
            .with_image_document_mode(ImageDocumentMode::SaveAndReference)
            .with_images_dir(dir.path().join("out"));

        let mut metadata = Metadata::new();
        let content =
            materialize_image(&UnsavableImage, 2, Path::new("b.hwp"), &options, &mut metadata)
                .unwrap();

        assert_eq!(content, "image_002.png (png) from b.hwp");
        assert!(dir.path().join("out").is_dir());
        assert!(!metadata.contains_key("saved_path"));
    }

    #[test]
    fn test_save_mode_without_directory_has_no_side_effects() {
        let options =
            LoaderOptions::new().with_image_document_mode(ImageDocumentMode::SaveAndReference);
        let image = FakeImage::default();
        let mut metadata = Metadata::new();
        materialize_image(&image, 0, Path::new("c.hwp"), &options, &mut metadata).unwrap();
        assert!(image.saved.borrow().is_none());
    }
}
