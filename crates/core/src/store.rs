//! Page and asset storage.
//!
//! [`PageStore`] implements list/read/write/upload/delete on top of a single root directory.
//! Each operation first hands the caller's path to [`crate::validation::validate`], then performs
//! plain synchronous filesystem I/O. The store keeps no state beyond its configuration: the
//! directory tree is the only source of truth and nothing is cached between calls.
//!
//! # Layout
//!
//! ```text
//! <pages_root>/
//! ├── index.html
//! ├── css/
//! │   └── site.css
//! └── assets/          # default upload folder
//!     └── logo.png
//! ```
//!
//! Directories are created on demand and never removed, even once emptied.

use crate::config::CoreConfig;
use crate::constants::DEFAULT_ASSET_FOLDER;
use crate::kind::FileKind;
use crate::validation::{sanitize_filename, to_posix, validate, validate_folder};
use crate::{PagesError, PagesResult};
use chrono::{DateTime, Utc};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A file found while listing the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Path relative to the root, always with forward slashes.
    pub path: String,
    /// Size in bytes.
    pub size: u64,
    /// Last modification time reported by the filesystem.
    pub updated_at: DateTime<Utc>,
}

/// Text content read back from a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    pub path: String,
    pub content: String,
}

/// Location of an uploaded asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAsset {
    /// Path relative to the root, e.g. `assets/logo.png`.
    pub path: String,
    /// URL under which the static mount serves the asset.
    pub url: String,
}

/// File-backed store for pages and assets confined to one root directory.
///
/// Cloning is cheap; clones share the same configuration.
#[derive(Clone, Debug)]
pub struct PageStore {
    cfg: Arc<CoreConfig>,
}

impl PageStore {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.cfg
    }

    pub fn root(&self) -> &Path {
        self.cfg.pages_root()
    }

    /// Creates the root directory if it is missing. Safe to call concurrently.
    ///
    /// # Errors
    ///
    /// Returns `PagesError::RootCreation` if the directory cannot be created.
    pub fn ensure_root(&self) -> PagesResult<()> {
        fs::create_dir_all(self.root()).map_err(PagesError::RootCreation)
    }

    /// Validates `raw_path` for `kind` and returns the canonical target.
    pub fn resolve(&self, kind: FileKind, raw_path: &str) -> PagesResult<PathBuf> {
        self.ensure_root()?;
        validate(raw_path, kind.allowed_extensions(), self.root())
    }

    /// Lists every regular file of `kind` under the root, sorted by relative path.
    ///
    /// Files of other kinds and symlinks are skipped without error.
    ///
    /// # Errors
    ///
    /// Returns an error if the root cannot be created or a directory cannot be read.
    pub fn list(&self, kind: FileKind) -> PagesResult<Vec<FileRecord>> {
        self.ensure_root()?;
        let root = self.root().canonicalize().map_err(PagesError::Canonicalise)?;

        let mut files = Vec::new();
        collect_files(&root, &root, kind, &mut files)?;
        files.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(files)
    }

    /// Reads a whole file of `kind` as UTF-8 text.
    ///
    /// # Errors
    ///
    /// - Any validation rejection from [`validate`].
    /// - `NotFound` if the target is not an existing regular file.
    /// - `InvalidUtf8` if the content is not valid UTF-8.
    pub fn read_text(&self, kind: FileKind, raw_path: &str) -> PagesResult<PageContent> {
        let target = self.resolve(kind, raw_path)?;

        if !target.is_file() {
            return Err(PagesError::NotFound);
        }

        let bytes = fs::read(&target).map_err(|e| match e.kind() {
            ErrorKind::NotFound => PagesError::NotFound,
            _ => PagesError::FileRead(e),
        })?;
        let content = String::from_utf8(bytes).map_err(PagesError::InvalidUtf8)?;

        Ok(PageContent {
            path: raw_path.trim().to_string(),
            content,
        })
    }

    /// Creates or overwrites a text file of `kind`.
    ///
    /// Returns the accepted relative path.
    ///
    /// # Errors
    ///
    /// - Any validation rejection from [`validate`].
    /// - `TooLarge` if the UTF-8 encoding of `content` exceeds the kind's cap.
    /// - `DirCreation` / `FileWrite` on I/O failure.
    pub fn write_text(&self, kind: FileKind, raw_path: &str, content: &str) -> PagesResult<String> {
        self.write_bytes(kind, raw_path, content.as_bytes())?;
        Ok(raw_path.trim().to_string())
    }

    /// Stores an uploaded asset at `folder/filename`.
    ///
    /// `filename` is reduced to its final component and `folder` (default `assets`) is validated
    /// on its own before the two are joined and validated again as an asset path.
    ///
    /// # Errors
    ///
    /// - `MissingFilename` if the filename has no usable final component.
    /// - `InvalidPath` if the folder is absolute or traverses upwards.
    /// - `InvalidFileType` if the filename is not an image.
    /// - `TooLarge` if `content` exceeds the asset cap.
    pub fn upload(
        &self,
        folder: Option<&str>,
        filename: &str,
        content: &[u8],
    ) -> PagesResult<StoredAsset> {
        let filename = sanitize_filename(filename)?;
        let folder = folder
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .unwrap_or(DEFAULT_ASSET_FOLDER);
        let folder = validate_folder(folder)?;

        let relative = if folder.is_empty() {
            filename
        } else {
            format!("{folder}/{filename}")
        };

        self.write_bytes(FileKind::Asset, &relative, content)?;

        Ok(StoredAsset {
            url: self.cfg.static_url_for(&relative),
            path: relative,
        })
    }

    /// Deletes a file of `kind`. Parent directories are left in place.
    ///
    /// Returns the deleted relative path.
    ///
    /// # Errors
    ///
    /// - Any validation rejection from [`validate`].
    /// - `NotFound` if the target is not an existing regular file.
    pub fn delete(&self, kind: FileKind, raw_path: &str) -> PagesResult<String> {
        let target = self.resolve(kind, raw_path)?;

        if !target.is_file() {
            return Err(PagesError::NotFound);
        }

        fs::remove_file(&target).map_err(|e| match e.kind() {
            ErrorKind::NotFound => PagesError::NotFound,
            _ => PagesError::FileDelete(e),
        })?;

        tracing::info!("deleted {} {}", kind, target.display());
        Ok(raw_path.trim().to_string())
    }

    fn write_bytes(&self, kind: FileKind, raw_path: &str, content: &[u8]) -> PagesResult<PathBuf> {
        let target = self.resolve(kind, raw_path)?;

        if target.is_dir() {
            return Err(PagesError::InvalidPath("target is a directory".into()));
        }

        let limit = kind.max_size_bytes();
        if content.len() as u64 > limit {
            return Err(PagesError::TooLarge { limit });
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(PagesError::DirCreation)?;
        }
        fs::write(&target, content).map_err(PagesError::FileWrite)?;

        tracing::info!(
            "saved {} {} ({} bytes)",
            kind,
            target.display(),
            content.len()
        );
        Ok(target)
    }
}

fn collect_files(
    dir: &Path,
    root: &Path,
    kind: FileKind,
    files: &mut Vec<FileRecord>,
) -> PagesResult<()> {
    for entry in fs::read_dir(dir).map_err(PagesError::FileRead)? {
        let entry = entry.map_err(PagesError::FileRead)?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(PagesError::Metadata)?;

        if file_type.is_dir() {
            collect_files(&path, root, kind, files)?;
            continue;
        }

        if !file_type.is_file() || !kind.matches(&path) {
            continue;
        }

        let metadata = match entry.metadata() {
            Ok(m) => m,
            // Removed between read_dir and stat.
            Err(e) if e.kind() == ErrorKind::NotFound => continue,
            Err(e) => return Err(PagesError::Metadata(e)),
        };
        let modified = metadata.modified().map_err(PagesError::Metadata)?;

        let Ok(relative) = path.strip_prefix(root) else {
            tracing::warn!("skipping {} outside pages root", path.display());
            continue;
        };

        files.push(FileRecord {
            path: to_posix(relative),
            size: metadata.len(),
            updated_at: DateTime::<Utc>::from(modified),
        });
    }

    Ok(())
}
