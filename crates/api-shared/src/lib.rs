//! # API Shared
//!
//! Shared utilities and definitions for the WebPages API.
//!
//! Contains:
//! - Request/response models with OpenAPI schemas (`models` module)
//! - Shared services like `HealthService`
//! - The admin API-key check
//!
//! Used by `api-rest` and the main binary.

pub mod auth;
pub mod health;
pub mod models;

pub use auth::{validate_api_key, AuthError, API_KEY_HEADER};
pub use health::HealthService;
pub use models::*;
