use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use chatlift_api::{build_router, config::Config, state::AppState};
use chatlift_fetch::{FetchError, FetchedFile, FileFetcher};
use chatlift_import::{Actor, BaseUrlLinkBuilder, Importer};
use chatlift_persist::{PersistClient, Repository};

const CONFIG: &str = r#"
    [server]
    host = "127.0.0.1"
    port = 0

    [cors]
    enabled = false
    origins = []

    [storage]
    backend = "memory"
    database = "chatlift_test"

    [fetch]
    base_url = "http://unused.test"
    timeout_ms = 1000

    [links]
    public_base_url = "http://chat.test"

    [import]
    default_actor_id = "importer"

    [logging]
    level = "debug"
    format = "pretty"
"#;

struct FakeFetcher {
    files: HashMap<String, FetchedFile>,
}

#[async_trait]
impl FileFetcher for FakeFetcher {
    async fn fetch(&self, file_id: &str) -> Result<FetchedFile, FetchError> {
        self.files.get(file_id).cloned().ok_or_else(|| FetchError::Status {
            file_id: file_id.to_string(),
            status: 404,
            body: String::new(),
        })
    }
}

fn app() -> (Router, PersistClient) {
    let config: Config = toml::from_str(CONFIG).unwrap();
    let persist = PersistClient::in_memory();

    let mut files = HashMap::new();
    files.insert("img-1".to_string(), FetchedFile::new(b"\x89PNG".to_vec(), "image/png"));

    let importer = Importer::builder()
        .persist(&persist)
        .fetcher(Arc::new(FakeFetcher { files }))
        .link_builder(Arc::new(BaseUrlLinkBuilder::new(config.links.public_base_url.clone())))
        .actor_provider(Arc::new(Actor::new(config.import.default_actor_id.clone())))
        .build()
        .unwrap();

    let state = Arc::new(AppState::new(config, persist.clone(), importer));
    (build_router(state), persist)
}

fn post_import(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/imports")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let (app, _) = app();

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["storage"], "connected (memory)");
}

#[tokio::test]
async fn test_import_then_download_file() {
    let (app, _) = app();
    let batch = json!([
        {"sourceName": "Alice", "sourceWxId": "wx-a", "content": {"text": "hello"}},
        {"sourceName": "Alice", "sourceWxId": "wx-a", "content": {"type": "image", "fileId": "img-1", "fileName": "cat.png"}}
    ]);

    let response = app.clone().oneshot(post_import(batch.to_string())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let replies = body["replies"].as_array().unwrap();
    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0]["content"], "hello");
    assert_eq!(replies[0]["imported_by"], "importer");

    let image = replies[1]["content"].as_str().unwrap();
    let link = image
        .strip_prefix("![cat.png](")
        .and_then(|rest| rest.strip_suffix("#middle)"))
        .unwrap();
    let path = link.strip_prefix("http://chat.test").unwrap();

    let response = app.oneshot(get(path)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"\x89PNG");
}

#[tokio::test]
async fn test_actor_headers_are_used() {
    let (app, persist) = app();
    let mut request = post_import(
        json!([{"sourceName": "Bob", "sourceWxId": "wx-b", "content": {"type": "image", "fileId": "img-1", "fileName": "a.png"}}])
            .to_string(),
    );
    request.headers_mut().insert("x-actor-id", "mod-7".parse().unwrap());

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["replies"][0]["imported_by"], "mod-7");

    let files = persist.files().find_all().await.unwrap();
    assert_eq!(files[0].owner_id, "mod-7");
}

#[tokio::test]
async fn test_body_that_is_not_an_array_is_rejected() {
    let (app, _) = app();

    let response = app.oneshot(post_import(r#"{"sourceName": "x"}"#)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_message_reports_index() {
    let (app, _) = app();
    let batch = json!([
        {"sourceName": "Alice", "sourceWxId": "wx-a", "content": {"text": "ok"}},
        {"sourceName": "Bob", "sourceWxId": "wx-b", "content": {"type": "location"}}
    ]);

    let response = app.oneshot(post_import(batch.to_string())).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["failed_index"], 1);
    assert_eq!(body["imported"], 1);
}

#[tokio::test]
async fn test_fetch_failure_is_bad_gateway() {
    let (app, _) = app();
    let batch = json!([
        {"sourceName": "Alice", "sourceWxId": "wx-a", "content": {"type": "file", "fileId": "gone", "fileName": "a.pdf"}}
    ]);

    let response = app.oneshot(post_import(batch.to_string())).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = json_body(response).await;
    assert_eq!(body["failed_index"], 0);
    assert_eq!(body["imported"], 0);
}

#[tokio::test]
async fn test_unknown_file_is_not_found() {
    let (app, _) = app();

    let response = app.oneshot(get("/files/does-not-exist")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_accounts() {
    let (app, _) = app();
    let batch = json!([
        {"sourceName": "Alice", "sourceWxId": "wx-a", "content": {"text": "1"}},
        {"sourceName": "Bob", "sourceWxId": "wx-b", "content": {"text": "2"}},
        {"sourceName": "Alice", "sourceWxId": "wx-a", "content": {"text": "3"}}
    ]);
    let response = app.clone().oneshot(post_import(batch.to_string())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/accounts")).await.unwrap();
    let body = json_body(response).await;
    let names: Vec<_> = body["accounts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["display_name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Alice", "Bob"]);
}
