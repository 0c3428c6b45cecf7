//! Error → HTTP response mapping.

use api_shared::{AuthError, ErrorRes};
use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use webpages_core::PagesError;

/// Everything a handler can fail with.
#[derive(Debug)]
pub enum ApiError {
    Pages(PagesError),
    Auth(AuthError),
    Multipart(MultipartError),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Pages(e) => match e {
                PagesError::MissingPath
                | PagesError::InvalidPath(_)
                | PagesError::InvalidFileType(_)
                | PagesError::MissingFilename => StatusCode::BAD_REQUEST,
                PagesError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
                PagesError::NotFound => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
            ApiError::Multipart(e) => e.status(),
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorRes {
        let (detail, code) = match self {
            ApiError::Pages(e) if e.is_rejection() => (e.to_string(), e.code()),
            ApiError::Auth(e) => (e.to_string(), "unauthorized"),
            ApiError::Multipart(e) => (e.body_text(), "bad_request"),
            ApiError::Pages(_) | ApiError::Internal(_) => ("Internal error".to_string(), "internal"),
        };
        ErrorRes {
            detail,
            code: code.to_string(),
        }
    }
}

impl From<PagesError> for ApiError {
    fn from(e: PagesError) -> Self {
        ApiError::Pages(e)
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        ApiError::Auth(e)
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        ApiError::Multipart(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {:?}", self);
        } else {
            tracing::warn!("request rejected ({}): {:?}", status, self);
        }
        (status, Json(self.body())).into_response()
    }
}
