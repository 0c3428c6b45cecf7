//! File kinds and the policy data attached to each.

use crate::constants::{
    ASSET_EXTENSIONS, MAX_ASSET_SIZE_BYTES, MAX_PAGE_SIZE_BYTES, PAGE_EXTENSIONS,
};
use std::path::Path;

/// The two kinds of file the store manages.
///
/// Both kinds share one validation algorithm; they differ only in the extension allowlist and
/// the size cap returned here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// Text content: HTML, CSS and JavaScript.
    Page,
    /// Binary images.
    Asset,
}

impl FileKind {
    /// Lowercase extensions (with leading dot) accepted for this kind.
    pub fn allowed_extensions(self) -> &'static [&'static str] {
        match self {
            FileKind::Page => PAGE_EXTENSIONS,
            FileKind::Asset => ASSET_EXTENSIONS,
        }
    }

    /// Maximum content size in bytes.
    pub fn max_size_bytes(self) -> u64 {
        match self {
            FileKind::Page => MAX_PAGE_SIZE_BYTES,
            FileKind::Asset => MAX_ASSET_SIZE_BYTES,
        }
    }

    /// Human-readable list of accepted extensions, e.g. `.html, .css, .js`.
    pub fn allowed_description(self) -> String {
        self.allowed_extensions().join(", ")
    }

    /// Returns `true` if `path` has an extension (compared case-insensitively) in this kind's
    /// allowlist.
    pub fn matches(self, path: &Path) -> bool {
        has_allowed_extension(path, self.allowed_extensions())
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileKind::Page => write!(f, "page"),
            FileKind::Asset => write!(f, "asset"),
        }
    }
}

/// Checks the lowercased extension of `path` against `allowed`.
///
/// Entries in `allowed` are lowercase and carry a leading dot. A path without an extension never
/// matches.
pub fn has_allowed_extension(path: &Path, allowed: &[&str]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    let dotted = format!(".{}", ext.to_ascii_lowercase());
    allowed.iter().any(|a| *a == dotted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_policy() {
        assert_eq!(FileKind::Page.max_size_bytes(), 1_000_000);
        assert!(FileKind::Page.matches(Path::new("index.html")));
        assert!(FileKind::Page.matches(Path::new("css/site.CSS")));
        assert!(!FileKind::Page.matches(Path::new("logo.png")));
    }

    #[test]
    fn asset_policy() {
        assert_eq!(FileKind::Asset.max_size_bytes(), 10_000_000);
        for name in ["a.png", "a.JPG", "a.jpeg", "a.gif", "a.webp", "a.svg", "a.ico", "a.avif"] {
            assert!(FileKind::Asset.matches(Path::new(name)), "{name}");
        }
        assert!(!FileKind::Asset.matches(Path::new("a.html")));
    }

    #[test]
    fn no_extension_never_matches() {
        assert!(!FileKind::Page.matches(Path::new("html")));
        assert!(!FileKind::Page.matches(Path::new(".")));
        assert!(!FileKind::Asset.matches(Path::new("")));
    }
}
