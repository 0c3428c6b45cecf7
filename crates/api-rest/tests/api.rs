use api_rest::{router, AppState};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;
use webpages_core::{CoreConfig, PageStore};

const KEY: &str = "test-admin-key";
const BOUNDARY: &str = "----webpages-test-boundary";

fn app(temp: &TempDir) -> Router {
    let cfg = CoreConfig::new(temp.path().join("pages")).expect("valid config");
    let store = PageStore::new(Arc::new(cfg));
    store.ensure_root().expect("root created");
    router(AppState::new(store, KEY))
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.clone().oneshot(req).await.expect("infallible");
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn send_raw(app: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let res = app.clone().oneshot(req).await.expect("infallible");
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("x-api-key", KEY)
        .body(Body::empty())
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header("x-api-key", KEY)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("x-api-key", KEY)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn upload(folder: Option<&str>, filename: Option<&str>, data: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    if let Some(folder) = folder {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"folder\"\r\n\r\n{folder}\r\n"
            )
            .as_bytes(),
        );
    }
    let disposition = match filename {
        Some(name) => format!("form-data; name=\"file\"; filename=\"{name}\""),
        None => "form-data; name=\"file\"".to_string(),
    };
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: {disposition}\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri("/webpages/api/v1/pages/assets")
        .header("x-api-key", KEY)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn save(app: &Router, path: &str, content: &str) -> (StatusCode, Value) {
    send(
        app,
        post_json(
            "/webpages/api/v1/pages",
            json!({ "path": path, "content": content }),
        ),
    )
    .await
}

#[tokio::test]
async fn health_is_open() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp);

    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn api_requires_admin_key() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp);

    let req = Request::builder()
        .uri("/webpages/api/v1/pages")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");

    let req = Request::builder()
        .uri("/webpages/api/v1/pages")
        .header("x-api-key", "wrong")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let req = Request::builder()
        .method(Method::DELETE)
        .uri("/webpages/api/v1/pages/index.html")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn save_list_get_page() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp);

    let (status, body) = save(&app, "index.html", "<h1>Hello</h1>").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "path": "index.html" }));

    let (status, body) = send(&app, get("/webpages/api/v1/pages/content/index.html")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["path"], "index.html");
    assert_eq!(body["content"], "<h1>Hello</h1>");

    let (status, body) = send(&app, get("/webpages/api/v1/pages")).await;
    assert_eq!(status, StatusCode::OK);
    let files = body["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["path"], "index.html");
    assert_eq!(files[0]["size"], 14);
    assert!(files[0]["updated_at"].is_string());
}

#[tokio::test]
async fn nested_page_paths() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp);

    let (status, _) = save(&app, "blog/2024/post.html", "<p>post</p>").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        get("/webpages/api/v1/pages/content/blog/2024/post.html"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["path"], "blog/2024/post.html");

    let (status, body) = send(&app, delete("/webpages/api/v1/pages/blog/2024/post.html")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], "blog/2024/post.html");
}

#[tokio::test]
async fn delete_page_then_not_found() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp);

    save(&app, "landing.html", "ok").await;

    let (status, body) = send(&app, delete("/webpages/api/v1/pages/landing.html")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "deleted": "landing.html" }));

    let (status, body) = send(&app, get("/webpages/api/v1/pages/content/landing.html")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");

    let (status, _) = send(&app, delete("/webpages/api/v1/pages/landing.html")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_page_under_content_folder() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp);

    let (status, _) = save(&app, "content/about.html", "about").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, delete("/webpages/api/v1/pages/content/about.html")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "deleted": "content/about.html" }));
    assert!(!temp.path().join("pages/content/about.html").exists());

    let (status, body) = send(&app, delete("/webpages/api/v1/pages/content/about.html")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[tokio::test]
async fn missing_path_below_a_file_is_not_found() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp);

    save(&app, "index.html", "x").await;

    let (status, body) = send(
        &app,
        get("/webpages/api/v1/pages/content/index.html/child.html"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");

    let (status, _) = send(&app, delete("/webpages/api/v1/pages/index.html/child.html")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn rejects_path_traversal() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp);

    let (status, body) = save(&app, "../bad.html", "x").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_path");
    assert!(!temp.path().join("bad.html").exists());

    let (status, body) = send(
        &app,
        get("/webpages/api/v1/pages/content/a/%2E%2E/%2E%2E/secret.html"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_path");
}

#[tokio::test]
async fn rejects_disallowed_extension() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp);

    let (status, body) = save(&app, "bad.py", "print('x')").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_file_type");
}

#[tokio::test]
async fn rejects_missing_path() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp);

    let (status, body) = save(&app, "   ", "x").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "missing_path");
}

#[tokio::test]
async fn page_size_limit() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp);

    let (status, _) = save(&app, "exact.js", &"a".repeat(1_000_000)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = save(&app, "over.js", &"a".repeat(1_000_001)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["code"], "too_large");
}

#[tokio::test]
async fn upload_list_delete_asset() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp);

    let (status, body) = send(&app, upload(None, Some("logo.png"), b"\x89PNG")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["path"], "assets/logo.png");
    assert_eq!(body["url"], "/webpages/static/pages/assets/logo.png");

    let (status, body) = send(&app, get("/webpages/api/v1/pages/assets")).await;
    assert_eq!(status, StatusCode::OK);
    let files = body["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["path"], "assets/logo.png");
    assert_eq!(files[0]["size"], 4);

    let (status, body) = send(&app, get("/webpages/api/v1/pages")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["files"].as_array().unwrap().is_empty());

    let (status, body) = send(
        &app,
        delete("/webpages/api/v1/pages/assets/assets/logo.png"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], "assets/logo.png");

    let (status, _) = send(
        &app,
        delete("/webpages/api/v1/pages/assets/assets/logo.png"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn upload_strips_directory_from_filename() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp);

    let (status, body) = send(&app, upload(Some("img"), Some("../evil.png"), b"x")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["path"], "img/evil.png");
    assert!(temp.path().join("pages/img/evil.png").is_file());
    assert!(!temp.path().join("pages/evil.png").exists());
    assert!(!temp.path().join("evil.png").exists());
}

#[tokio::test]
async fn upload_rejections() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp);

    let (status, body) = send(&app, upload(Some("../up"), Some("a.png"), b"x")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_path");

    let (status, body) = send(&app, upload(None, None, b"x")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "missing_filename");

    let (status, body) = send(&app, upload(None, Some("page.html"), b"x")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_file_type");
}

#[tokio::test]
async fn upload_size_limit() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp);

    let (status, body) = send(&app, upload(None, Some("big.gif"), &vec![0u8; 10_000_001])).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["code"], "too_large");
}

#[tokio::test]
async fn static_mount_serves_allowlisted_files_only() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp);

    save(&app, "index.html", "<h1>Hello</h1>").await;
    std::fs::write(temp.path().join("pages/notes.txt"), "private").unwrap();

    let req = Request::builder()
        .uri("/webpages/static/pages/index.html")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send_raw(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"<h1>Hello</h1>");

    let req = Request::builder()
        .uri("/webpages/static/pages/notes.txt")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send_raw(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn openapi_document_lists_routes() {
    let temp = TempDir::new().unwrap();
    let app = app(&temp);

    let req = Request::builder()
        .uri("/api-docs/openapi.json")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/webpages/api/v1/pages"].is_object());
    assert!(body["paths"]["/webpages/api/v1/pages/assets"].is_object());
}
