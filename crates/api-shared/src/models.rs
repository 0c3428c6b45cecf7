//! Request and response bodies for the WebPages API.
//!
//! These types carry serde and OpenAPI schema derives and nothing else. Conversion from core
//! types happens at the API boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// One file in a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FileInfo {
    /// Path relative to the pages root, with forward slashes.
    pub path: String,
    /// Size in bytes.
    pub size: u64,
    /// Last modification time (UTC).
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FileListRes {
    pub files: Vec<FileInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageContentRes {
    pub path: String,
    pub content: String,
}

/// Body of a page save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SavePageReq {
    pub path: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SavePageRes {
    pub path: String,
}

/// Multipart form accepted by the asset upload route.
///
/// Only used for the OpenAPI document; the handler reads the parts directly.
#[derive(Debug, Clone, ToSchema)]
pub struct UploadAssetForm {
    /// The image to store. Its filename is reduced to the final path component.
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    /// Target folder under the pages root (default `assets`).
    pub folder: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UploadAssetRes {
    pub path: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteRes {
    pub deleted: String,
}

/// Error body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    /// Human-readable message.
    pub detail: String,
    /// Machine-readable kind, e.g. `invalid_path`.
    pub code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_page_content_defaults_to_empty() {
        let req: SavePageReq = serde_json::from_str(r#"{"path":"index.html"}"#).unwrap();
        assert_eq!(req.path, "index.html");
        assert_eq!(req.content, "");
    }

    #[test]
    fn file_info_serialises_timestamp_as_rfc3339() {
        let info = FileInfo {
            path: "index.html".into(),
            size: 14,
            updated_at: "2024-01-01T00:00:00Z".parse().unwrap(),
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["path"], "index.html");
        assert_eq!(json["size"], 14);
        assert_eq!(json["updated_at"], "2024-01-01T00:00:00Z");
    }
}
