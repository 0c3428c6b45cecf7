//! Constants used throughout the WebPages core crate.
//!
//! Directory names, URL prefixes and per-kind policy data live here so the validator and the
//! store read them from one place.

/// Default root directory for pages and assets when no explicit directory is configured.
pub const DEFAULT_PAGES_ROOT: &str = "static/pages";

/// URL prefix under which the root directory is served read-only.
pub const STATIC_URL_PREFIX: &str = "/webpages/static/pages";

/// Folder used for uploads when the caller does not name one.
pub const DEFAULT_ASSET_FOLDER: &str = "assets";

/// Extensions accepted for text pages (lowercase, with leading dot).
pub const PAGE_EXTENSIONS: &[&str] = &[".html", ".css", ".js"];

/// Extensions accepted for binary assets (lowercase, with leading dot).
pub const ASSET_EXTENSIONS: &[&str] = &[
    ".png", ".jpg", ".jpeg", ".gif", ".webp", ".svg", ".ico", ".avif",
];

/// Maximum encoded size of a page, in bytes.
pub const MAX_PAGE_SIZE_BYTES: u64 = 1_000_000;

/// Maximum size of an uploaded asset, in bytes.
pub const MAX_ASSET_SIZE_BYTES: u64 = 10_000_000;
