//! # WebPages Core
//!
//! Core logic for the WebPages content manager.
//!
//! This crate contains pure data operations and file/folder management:
//! - Path validation that confines every target to one root directory
//! - Listing, reading, writing, uploading and deleting pages and assets under that root
//!
//! **No API concerns**: Authentication, HTTP servers, or request/response models belong in
//! `api-rest` or `api-shared`.

pub mod config;
pub mod constants;
pub mod error;
pub mod kind;
pub mod store;
pub mod validation;

pub use config::{pages_root_from_env_value, CoreConfig};
pub use constants::{DEFAULT_ASSET_FOLDER, DEFAULT_PAGES_ROOT, STATIC_URL_PREFIX};
pub use error::{PagesError, PagesResult};
pub use kind::FileKind;
pub use store::{FileRecord, PageContent, PageStore, StoredAsset};
pub use validation::validate;
