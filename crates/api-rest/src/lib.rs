//! # API REST
//!
//! REST API implementation for WebPages.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - The admin gate in front of every management route
//! - The read-only static mount over the pages root
//! - OpenAPI/Swagger documentation
//!
//! Uses `api-shared` for request/response models and `webpages-core` for storage.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod handlers;
pub mod middleware;

use api_shared::API_KEY_HEADER;
use axum::{
    extract::DefaultBodyLimit,
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;
use webpages_core::{constants::MAX_ASSET_SIZE_BYTES, PageStore};

pub use error::ApiError;

/// Prefix under which the management API is mounted.
pub const API_PREFIX: &str = "/webpages/api/v1";

/// Request body ceiling. Leaves room for multipart framing around a maximum-size asset so the
/// store, not the transport, decides what is too large.
pub const MAX_REQUEST_BODY_BYTES: usize = MAX_ASSET_SIZE_BYTES as usize + 1024 * 1024;

/// Application state for the REST API server
///
/// Shared by all request handlers: the page store and the admin key the gate compares against.
#[derive(Clone)]
pub struct AppState {
    store: PageStore,
    admin_key: Arc<str>,
}

impl AppState {
    pub fn new(store: PageStore, admin_key: impl Into<Arc<str>>) -> Self {
        Self {
            store,
            admin_key: admin_key.into(),
        }
    }

    pub fn store(&self) -> &PageStore {
        &self.store
    }

    pub fn admin_key(&self) -> &str {
        &self.admin_key
    }
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(API_KEY_HEADER))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::list_pages,
        handlers::list_assets,
        handlers::get_page,
        handlers::save_page,
        handlers::upload_asset,
        handlers::delete_page,
        handlers::delete_content_page,
        handlers::delete_asset,
    ),
    components(schemas(
        api_shared::HealthRes,
        api_shared::FileInfo,
        api_shared::FileListRes,
        api_shared::PageContentRes,
        api_shared::SavePageReq,
        api_shared::SavePageRes,
        api_shared::UploadAssetForm,
        api_shared::UploadAssetRes,
        api_shared::DeleteRes,
        api_shared::ErrorRes,
    )),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Builds the complete application router.
///
/// - `/health` and the Swagger UI are open.
/// - Everything under [`API_PREFIX`] passes the admin gate first.
/// - The store's static URL prefix serves the pages root read-only, limited to page and asset
///   extensions.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/pages",
            get(handlers::list_pages).post(handlers::save_page),
        )
        .route(
            "/pages/assets",
            get(handlers::list_assets).post(handlers::upload_asset),
        )
        .route(
            "/pages/content/*path",
            get(handlers::get_page).delete(handlers::delete_content_page),
        )
        .route("/pages/assets/*path", delete(handlers::delete_asset))
        .route("/pages/*path", delete(handlers::delete_page))
        .route_layer(from_fn_with_state(state.clone(), middleware::require_admin));

    let static_prefix = state.store().config().static_url_prefix().to_string();
    let static_files = ServiceBuilder::new()
        .layer(from_fn(middleware::static_allowlist))
        .service(ServeDir::new(state.store().root()));

    Router::new()
        .route("/health", get(handlers::health))
        .nest(API_PREFIX, api)
        .nest_service(&static_prefix, static_files)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
