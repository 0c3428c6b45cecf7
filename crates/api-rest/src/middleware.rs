//! Request middleware: the admin gate and the static-file allowlist.

use crate::{error::ApiError, AppState};
use api_shared::{validate_api_key, API_KEY_HEADER};
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::path::Path;
use webpages_core::FileKind;

/// Rejects requests that do not carry the configured admin API key.
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let provided = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    if let Err(e) = validate_api_key(provided, state.admin_key()) {
        tracing::warn!("{} {}: {}", req.method(), req.uri().path(), e);
        return Err(e.into());
    }

    Ok(next.run(req).await)
}

/// Lets the static mount serve only page and asset files.
///
/// Anything else under the root (stray text files, dotfiles, editor backups) answers 404 as if it
/// did not exist.
pub async fn static_allowlist(req: Request, next: Next) -> Response {
    let path = Path::new(req.uri().path());
    if FileKind::Page.matches(path) || FileKind::Asset.matches(path) {
        next.run(req).await
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}
