//! Directory loader.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::vec;

use serde::{Deserialize, Serialize};

use super::{DocumentLoader, ErrorPolicy, FileDocuments, HwpLoader, LoaderOptions};
use crate::detect::{dotted_extension, SUPPORTED_EXTENSIONS};
use crate::error::{Error, Result};
use crate::model::Document;
use crate::parser::ParserBackend;

/// File matching options for [`DirectoryLoader`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DirectoryOptions {
    /// Glob pattern relative to the root
    pub glob: String,

    /// Descend into subdirectories
    pub recursive: bool,

    /// Accepted extensions; normalized to lower-case with a leading dot
    pub extensions: Vec<String>,

    /// Directory-level error policy; the per-file `on_error` when unset
    pub on_error: Option<ErrorPolicy>,
}

impl DirectoryOptions {
    /// Create default directory options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the glob pattern.
    pub fn with_glob(mut self, glob: impl Into<String>) -> Self {
        self.glob = glob.into();
        self
    }

    /// Enable or disable recursion.
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Replace the accepted extensions.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Set the directory-level error policy.
    pub fn on_error(mut self, policy: ErrorPolicy) -> Self {
        self.on_error = Some(policy);
        self
    }

    /// Effective pattern, with recursive wildcards removed when not recursive.
    fn effective_glob(&self) -> String {
        if self.recursive {
            self.glob.clone()
        } else {
            self.glob.replace("**/", "").replace("**", "*")
        }
    }
}

impl Default for DirectoryOptions {
    fn default() -> Self {
        Self {
            glob: "**/*".to_string(),
            recursive: true,
            extensions: SUPPORTED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            on_error: None,
        }
    }
}

/// Loads every matching file under a directory.
///
/// Files are visited one at a time in ascending order of their full path,
/// each through an [`HwpLoader`] sharing the same options and backend.
#[derive(Clone)]
pub struct DirectoryLoader {
    root: PathBuf,
    pattern: String,
    extensions: BTreeSet<String>,
    on_error: ErrorPolicy,
    options: Arc<LoaderOptions>,
    backend: Arc<dyn ParserBackend>,
}

impl DirectoryLoader {
    /// Create a directory loader.
    ///
    /// Fails with [`Error::Config`] for an empty extension and
    /// [`Error::Pattern`] for an invalid glob.
    pub fn new(
        root: impl Into<PathBuf>,
        directory: DirectoryOptions,
        options: LoaderOptions,
        backend: Arc<dyn ParserBackend>,
    ) -> Result<Self> {
        let extensions = directory
            .extensions
            .iter()
            .map(|ext| normalize_extension(ext))
            .collect::<Result<BTreeSet<_>>>()?;

        let pattern = directory.effective_glob();
        glob::Pattern::new(&pattern)?;

        Ok(Self {
            root: root.into(),
            pattern,
            extensions,
            on_error: directory.on_error.unwrap_or(options.on_error),
            options: Arc::new(options),
            backend,
        })
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Normalized accepted extensions.
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }

    /// Effective directory-level error policy.
    pub fn error_policy(&self) -> ErrorPolicy {
        self.on_error
    }

    /// Matching files in load order.
    pub fn files(&self) -> Result<Vec<PathBuf>> {
        if !self.root.exists() {
            return Err(Error::NotFound(self.root.clone()));
        }
        if !self.root.is_dir() {
            return Err(Error::NotADirectory(self.root.clone()));
        }

        let escaped = glob::Pattern::escape(&self.root.to_string_lossy());
        let full = Path::new(&escaped).join(&self.pattern);

        let mut files = Vec::new();
        for entry in glob::glob(&full.to_string_lossy())? {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    log::debug!("Skipping unreadable entry {}: {}", e.path().display(), e);
                    continue;
                }
            };
            if path.is_file() && self.extensions.contains(&dotted_extension(&path)) {
                files.push(path);
            }
        }

        files.sort_by_cached_key(|p| p.to_string_lossy().into_owned());
        log::debug!("{} files matched under {}", files.len(), self.root.display());
        Ok(files)
    }
}

impl std::fmt::Debug for DirectoryLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryLoader")
            .field("root", &self.root)
            .field("pattern", &self.pattern)
            .field("extensions", &self.extensions)
            .field("on_error", &self.on_error)
            .field("backend", &self.backend.identifier())
            .finish()
    }
}

impl DocumentLoader for DirectoryLoader {
    type Stream = DirectoryDocuments;

    fn lazy_load(&self) -> Result<DirectoryDocuments> {
        let files = self.files()?;
        Ok(DirectoryDocuments {
            files: files.into_iter(),
            current: None,
            on_error: self.on_error,
            options: Arc::clone(&self.options),
            backend: Arc::clone(&self.backend),
            done: false,
        })
    }
}

/// Documents of every matching file, in file order.
pub struct DirectoryDocuments {
    files: vec::IntoIter<PathBuf>,
    current: Option<FileDocuments>,
    on_error: ErrorPolicy,
    options: Arc<LoaderOptions>,
    backend: Arc<dyn ParserBackend>,
    done: bool,
}

impl DirectoryDocuments {
    /// Number of files not yet started.
    pub fn remaining_files(&self) -> usize {
        self.files.len()
    }

    /// Apply the directory-level policy; `Some` ends the stream.
    fn contain(&mut self, path: &Path, err: Error) -> Option<Result<Document>> {
        self.current = None;
        match self.on_error {
            ErrorPolicy::Raise => {
                self.done = true;
                Some(Err(err.into_load(path)))
            }
            ErrorPolicy::Skip => None,
            ErrorPolicy::Warn => {
                log::warn!(
                    "Failed to load file {}: {} ({})",
                    path.display(),
                    err.kind(),
                    err
                );
                None
            }
        }
    }
}

impl Iterator for DirectoryDocuments {
    type Item = Result<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            if let Some(stream) = self.current.as_mut() {
                match stream.next() {
                    Some(Ok(doc)) => return Some(Ok(doc)),
                    Some(Err(err)) => {
                        let path = stream.path().to_path_buf();
                        if let Some(item) = self.contain(&path, err) {
                            return Some(item);
                        }
                    }
                    None => self.current = None,
                }
                continue;
            }

            let path = match self.files.next() {
                Some(path) => path,
                None => {
                    self.done = true;
                    break;
                }
            };

            let loader = HwpLoader::with_shared_options(
                &path,
                Arc::clone(&self.options),
                Arc::clone(&self.backend),
            );
            match loader.lazy_load() {
                Ok(stream) => self.current = Some(stream),
                Err(err) => {
                    if let Some(item) = self.contain(&path, err) {
                        return Some(item);
                    }
                }
            }
        }
        None
    }
}

/// Normalize an extension to lower case with a single leading dot added
/// when missing.
fn normalize_extension(ext: &str) -> Result<String> {
    let ext = ext.trim().to_lowercase();
    if ext.is_empty() {
        return Err(Error::Config(
            "extensions must not contain empty values".to_string(),
        ));
    }
    if ext.starts_with('.') {
        Ok(ext)
    } else {
        Ok(format!(".{}", ext))
    }
}
