//! Path validation.
//!
//! Every filesystem target the store touches is derived from untrusted input. This module turns
//! that input into a canonical absolute path that is guaranteed to sit inside the pages root and
//! to carry an allowed extension, or rejects it with a typed [`PagesError`].
//!
//! Pages and assets go through the same [`validate`] routine; only the extension allowlist
//! differs.

use crate::kind::has_allowed_extension;
use crate::{PagesError, PagesResult};
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// Validates a caller-supplied relative path against `root` and an extension allowlist.
///
/// # Arguments
///
/// * `raw_path` - Untrusted relative path, e.g. `"blog/index.html"`.
/// * `allowed_extensions` - Lowercase extensions with a leading dot.
/// * `root` - The pages root. It must already exist.
///
/// # Returns
///
/// The canonical absolute target path. The target itself does not need to exist; symlinks along
/// the existing part of the path are resolved before the containment check.
///
/// # Errors
///
/// - `MissingPath` if `raw_path` is empty or whitespace.
/// - `InvalidPath` if the path is absolute, contains a `..` segment, or resolves outside `root`.
/// - `InvalidFileType` if the resolved extension is not in `allowed_extensions`.
/// - `Canonicalise` if the root or an existing ancestor cannot be resolved.
pub fn validate(raw_path: &str, allowed_extensions: &[&str], root: &Path) -> PagesResult<PathBuf> {
    let trimmed = raw_path.trim();
    if trimmed.is_empty() {
        return Err(PagesError::MissingPath);
    }

    let relative = parse_relative(trimmed)?;

    let canonical_root = root.canonicalize().map_err(PagesError::Canonicalise)?;
    let full_path = resolve_under(&canonical_root, &relative)?;

    if full_path != canonical_root && !full_path.starts_with(&canonical_root) {
        return Err(PagesError::InvalidPath(
            "path resolves outside the pages root".into(),
        ));
    }

    if !has_allowed_extension(&full_path, allowed_extensions) {
        return Err(PagesError::InvalidFileType(allowed_extensions.join(", ")));
    }

    Ok(full_path)
}

/// Validates the `folder` field of an upload independently of the filename.
///
/// Returns the folder in normalised forward-slash form. `.` and empty segments are dropped, so
/// the result may be empty, meaning the pages root itself.
///
/// # Errors
///
/// Returns `InvalidPath` if the folder is absolute or contains a `..` segment.
pub fn validate_folder(raw_folder: &str) -> PagesResult<String> {
    let relative = parse_relative(raw_folder.trim())
        .map_err(|_| PagesError::InvalidPath("invalid folder".into()))?;
    Ok(to_posix(&relative))
}

/// Reduces an uploaded filename to its final path component.
///
/// Both `/` and `\` are treated as separators, so `"../evil.png"` and `"..\\evil.png"` become
/// `"evil.png"`.
///
/// # Errors
///
/// Returns `MissingFilename` if no usable name remains.
pub fn sanitize_filename(raw_filename: &str) -> PagesResult<String> {
    let base = raw_filename
        .trim()
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    if base.is_empty() || base == "." || base == ".." {
        return Err(PagesError::MissingFilename);
    }

    Ok(base.to_string())
}

/// Renders a relative path with forward slashes regardless of platform.
pub fn to_posix(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Parses `trimmed` as a relative path, keeping only its normal components.
fn parse_relative(trimmed: &str) -> PagesResult<PathBuf> {
    // Backslash is not a separator on every platform; check it anyway so `..\x` is refused
    // everywhere.
    if trimmed.split(['/', '\\']).any(|segment| segment == "..") {
        return Err(PagesError::InvalidPath(
            "parent directory segments are not allowed".into(),
        ));
    }

    let path = Path::new(trimmed);
    if path.is_absolute() || path.has_root() {
        return Err(PagesError::InvalidPath(
            "absolute paths are not allowed".into(),
        ));
    }

    let mut relative = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                return Err(PagesError::InvalidPath(
                    "parent directory segments are not allowed".into(),
                ))
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(PagesError::InvalidPath(
                    "absolute paths are not allowed".into(),
                ))
            }
        }
    }

    Ok(relative)
}

/// Resolves `relative` beneath `canonical_root`, following symlinks for every component that
/// exists and appending the rest verbatim.
fn resolve_under(canonical_root: &Path, relative: &Path) -> PagesResult<PathBuf> {
    let mut resolved = canonical_root.to_path_buf();
    let mut components = relative.components();

    while let Some(component) = components.next() {
        let candidate = resolved.join(component);
        match candidate.canonicalize() {
            Ok(real) => resolved = real,
            // A regular file in the middle of the path means nothing below it exists either.
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
                // A dangling symlink has no resolvable target; writing through it could land
                // anywhere.
                if fs::symlink_metadata(&candidate).is_ok() {
                    return Err(PagesError::InvalidPath(
                        "path passes through a dangling symlink".into(),
                    ));
                }
                resolved = candidate;
                resolved.extend(components);
                break;
            }
            Err(e) => return Err(PagesError::Canonicalise(e)),
        }
    }

    Ok(resolved)
}
