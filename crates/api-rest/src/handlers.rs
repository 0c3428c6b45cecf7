//! HTTP handlers for the pages and assets API.
//!
//! Handlers are thin: they pull inputs out of the request, run the matching [`PageStore`]
//! operation on the blocking pool, and shape the result into a response model. Path safety is
//! entirely the store's concern.

use crate::{error::ApiError, AppState};
use api_shared::{
    DeleteRes, FileInfo, FileListRes, HealthRes, HealthService, PageContentRes, SavePageReq,
    SavePageRes, UploadAssetRes,
};
use axum::{
    extract::{Multipart, Path as AxumPath, State},
    response::Json,
};
use webpages_core::{FileKind, FileRecord, PageStore, PagesError, PagesResult};

/// Runs a store operation on the blocking thread pool.
async fn run_blocking<T, F>(store: &PageStore, op: F) -> Result<T, ApiError>
where
    F: FnOnce(PageStore) -> PagesResult<T> + Send + 'static,
    T: Send + 'static,
{
    let store = store.clone();
    tokio::task::spawn_blocking(move || op(store))
        .await
        .map_err(|e| ApiError::Internal(format!("store task failed: {e}")))?
        .map_err(ApiError::from)
}

fn file_list(records: Vec<FileRecord>) -> FileListRes {
    FileListRes {
        files: records
            .into_iter()
            .map(|r| FileInfo {
                path: r.path,
                size: r.size,
                updated_at: r.updated_at,
            })
            .collect(),
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used by monitoring and load balancers; not behind the admin gate.
pub async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/webpages/api/v1/pages",
    responses(
        (status = 200, description = "All pages, sorted by path", body = FileListRes),
        (status = 401, description = "Missing or invalid API key", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    ),
    security(("api_key" = []))
)]
/// List every page (`.html`, `.css`, `.js`) under the pages root.
#[axum::debug_handler]
pub async fn list_pages(State(state): State<AppState>) -> Result<Json<FileListRes>, ApiError> {
    let records = run_blocking(state.store(), |store| store.list(FileKind::Page)).await?;
    Ok(Json(file_list(records)))
}

#[utoipa::path(
    get,
    path = "/webpages/api/v1/pages/assets",
    responses(
        (status = 200, description = "All assets, sorted by path", body = FileListRes),
        (status = 401, description = "Missing or invalid API key", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    ),
    security(("api_key" = []))
)]
/// List every image asset under the pages root.
#[axum::debug_handler]
pub async fn list_assets(State(state): State<AppState>) -> Result<Json<FileListRes>, ApiError> {
    let records = run_blocking(state.store(), |store| store.list(FileKind::Asset)).await?;
    Ok(Json(file_list(records)))
}

#[utoipa::path(
    get,
    path = "/webpages/api/v1/pages/content/{path}",
    params(("path" = String, Path, description = "Page path relative to the pages root")),
    responses(
        (status = 200, description = "Page content", body = PageContentRes),
        (status = 400, description = "Invalid path or file type", body = ErrorRes),
        (status = 401, description = "Missing or invalid API key", body = ErrorRes),
        (status = 404, description = "File not found", body = ErrorRes)
    ),
    security(("api_key" = []))
)]
/// Read a page's full text content.
#[axum::debug_handler]
pub async fn get_page(
    State(state): State<AppState>,
    AxumPath(path): AxumPath<String>,
) -> Result<Json<PageContentRes>, ApiError> {
    let page = run_blocking(state.store(), move |store| {
        store.read_text(FileKind::Page, &path)
    })
    .await?;

    Ok(Json(PageContentRes {
        path: page.path,
        content: page.content,
    }))
}

#[utoipa::path(
    post,
    path = "/webpages/api/v1/pages",
    request_body = SavePageReq,
    responses(
        (status = 200, description = "Page saved", body = SavePageRes),
        (status = 400, description = "Invalid path or file type", body = ErrorRes),
        (status = 401, description = "Missing or invalid API key", body = ErrorRes),
        (status = 413, description = "Content exceeds 1,000,000 bytes", body = ErrorRes)
    ),
    security(("api_key" = []))
)]
/// Create or overwrite a page.
///
/// Parent directories are created as needed. The last write wins.
#[axum::debug_handler]
pub async fn save_page(
    State(state): State<AppState>,
    Json(req): Json<SavePageReq>,
) -> Result<Json<SavePageRes>, ApiError> {
    let path = run_blocking(state.store(), move |store| {
        store.write_text(FileKind::Page, &req.path, &req.content)
    })
    .await?;

    Ok(Json(SavePageRes { path }))
}

#[utoipa::path(
    post,
    path = "/webpages/api/v1/pages/assets",
    request_body(content = UploadAssetForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Asset stored", body = UploadAssetRes),
        (status = 400, description = "Missing filename, invalid folder or file type", body = ErrorRes),
        (status = 401, description = "Missing or invalid API key", body = ErrorRes),
        (status = 413, description = "File exceeds 10,000,000 bytes", body = ErrorRes)
    ),
    security(("api_key" = []))
)]
/// Upload an image asset.
///
/// Reads the `file` part (its filename is reduced to the final path component) and the optional
/// `folder` field, which defaults to `assets`.
#[axum::debug_handler]
pub async fn upload_asset(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadAssetRes>, ApiError> {
    let mut folder: Option<String> = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().map(str::to_owned).unwrap_or_default();
                let data = field.bytes().await?;
                file = Some((filename, data.to_vec()));
            }
            Some("folder") => folder = Some(field.text().await?),
            _ => {}
        }
    }

    let Some((filename, data)) = file else {
        return Err(PagesError::MissingFilename.into());
    };

    let stored = run_blocking(state.store(), move |store| {
        store.upload(folder.as_deref(), &filename, &data)
    })
    .await?;

    Ok(Json(UploadAssetRes {
        path: stored.path,
        url: stored.url,
    }))
}

#[utoipa::path(
    delete,
    path = "/webpages/api/v1/pages/{path}",
    params(("path" = String, Path, description = "Page path relative to the pages root")),
    responses(
        (status = 200, description = "Page deleted", body = DeleteRes),
        (status = 400, description = "Invalid path or file type", body = ErrorRes),
        (status = 401, description = "Missing or invalid API key", body = ErrorRes),
        (status = 404, description = "File not found", body = ErrorRes)
    ),
    security(("api_key" = []))
)]
/// Delete a page. Emptied directories are left in place.
#[axum::debug_handler]
pub async fn delete_page(
    State(state): State<AppState>,
    AxumPath(path): AxumPath<String>,
) -> Result<Json<DeleteRes>, ApiError> {
    let deleted = run_blocking(state.store(), move |store| {
        store.delete(FileKind::Page, &path)
    })
    .await?;

    Ok(Json(DeleteRes { deleted }))
}

#[utoipa::path(
    delete,
    path = "/webpages/api/v1/pages/content/{path}",
    params(("path" = String, Path, description = "Page path below the `content` folder")),
    responses(
        (status = 200, description = "Page deleted", body = DeleteRes),
        (status = 400, description = "Invalid path or file type", body = ErrorRes),
        (status = 401, description = "Missing or invalid API key", body = ErrorRes),
        (status = 404, description = "File not found", body = ErrorRes)
    ),
    security(("api_key" = []))
)]
/// Delete a page stored under the `content` folder.
///
/// `/pages/content/...` is also the read route, so deletes of such pages land here rather than
/// on [`delete_page`].
#[axum::debug_handler]
pub async fn delete_content_page(
    State(state): State<AppState>,
    AxumPath(path): AxumPath<String>,
) -> Result<Json<DeleteRes>, ApiError> {
    let full = format!("content/{path}");
    let deleted = run_blocking(state.store(), move |store| {
        store.delete(FileKind::Page, &full)
    })
    .await?;

    Ok(Json(DeleteRes { deleted }))
}

#[utoipa::path(
    delete,
    path = "/webpages/api/v1/pages/assets/{path}",
    params(("path" = String, Path, description = "Asset path relative to the pages root")),
    responses(
        (status = 200, description = "Asset deleted", body = DeleteRes),
        (status = 400, description = "Invalid path or file type", body = ErrorRes),
        (status = 401, description = "Missing or invalid API key", body = ErrorRes),
        (status = 404, description = "File not found", body = ErrorRes)
    ),
    security(("api_key" = []))
)]
/// Delete an asset. The path is relative to the pages root, e.g. `assets/logo.png`.
#[axum::debug_handler]
pub async fn delete_asset(
    State(state): State<AppState>,
    AxumPath(path): AxumPath<String>,
) -> Result<Json<DeleteRes>, ApiError> {
    let deleted = run_blocking(state.store(), move |store| {
        store.delete(FileKind::Asset, &path)
    })
    .await?;

    Ok(Json(DeleteRes { deleted }))
}
