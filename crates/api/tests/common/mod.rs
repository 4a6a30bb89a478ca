#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use stitchflow_api::activity::ActivityRecorder;
use stitchflow_api::auth::google::GoogleOAuth;
use stitchflow_api::auth::session::{issue_session_token, SessionConfig};
use stitchflow_api::config::{DatabaseConfig, GoogleOAuthConfig, ServerConfig};
use stitchflow_api::router::build_app_router;
use stitchflow_api::state::AppState;
use stitchflow_api::storage::{BlobStore, StorageError};
use stitchflow_core::inventory::StockPolicy;
use stitchflow_core::types::DbId;

pub const FRONTEND_URL: &str = "http://localhost:3000";

/// Build a test `ServerConfig` with safe defaults. OAuth and storage are
/// off; tests that need them switch them on.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![FRONTEND_URL.to_string()],
        frontend_url: FRONTEND_URL.to_string(),
        backend_url: "http://localhost:5000".to_string(),
        request_timeout_secs: 30,
        max_upload_bytes: 1024 * 1024,
        stock_policy: StockPolicy::Permissive,
        database: DatabaseConfig {
            url: None,
            user: "postgres".to_string(),
            password: "password".to_string(),
            host: "localhost".to_string(),
            port: 5432,
            name: "stitchflow_test".to_string(),
            max_connections: 5,
        },
        session: SessionConfig {
            secret: "test_secret".to_string(),
            expiry_hours: 1,
        },
        google: None,
        storage: None,
    }
}

/// In-memory blob store recording every object it receives.
#[derive(Default)]
pub struct MemoryStore {
    pub objects: Mutex<Vec<(String, String, usize)>>,
}

#[async_trait]
impl BlobStore for MemoryStore {
    async fn put(
        &self,
        object_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StorageError> {
        self.objects.lock().unwrap().push((
            object_name.to_string(),
            content_type.to_string(),
            bytes.len(),
        ));
        Ok(format!("https://blobs.test/{object_name}"))
    }
}

/// Build state from an explicit config and optional blob store.
pub fn test_state(
    pool: PgPool,
    config: ServerConfig,
    blob_store: Option<Arc<dyn BlobStore>>,
) -> AppState {
    let oauth = config
        .google
        .clone()
        .map(|google| Arc::new(GoogleOAuth::new(google, config.google_callback_url())));
    AppState {
        activity: ActivityRecorder::new(pool.clone()),
        pool,
        config: Arc::new(config),
        blob_store,
        oauth,
    }
}

/// Full application router over `pool` with the default test config.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    build_app_router(test_state(pool, config.clone(), None), &config)
}

/// Router with a custom config.
pub fn build_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    build_app_router(test_state(pool, config.clone(), None), &config)
}

/// Router with Google sign-in configured against dummy credentials.
pub fn build_app_with_oauth(pool: PgPool) -> Router {
    let mut config = test_config();
    config.google = Some(GoogleOAuthConfig {
        client_id: "test-client-id".to_string(),
        client_secret: "test-client-secret".to_string(),
    });
    build_app_with_config(pool, config)
}

/// Router with an in-memory blob store; the store is returned for inspection.
pub fn build_app_with_store(pool: PgPool) -> (Router, Arc<MemoryStore>) {
    let config = test_config();
    let store = Arc::new(MemoryStore::default());
    let app = build_app_router(
        test_state(pool, config.clone(), Some(store.clone() as Arc<dyn BlobStore>)),
        &config,
    );
    (app, store)
}

/// Session token for `user_id`, signed with the test secret.
pub fn token_for(user_id: DbId) -> String {
    issue_session_token(user_id, &test_config().session).unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::get(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn send_json(
    app: Router,
    method: &str,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, "POST", uri, body, None).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, "PUT", uri, body, None).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send_json(app, "PUT", uri, body, Some(token)).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, "PATCH", uri, body, None).await
}

pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    let request = Request::post(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::delete(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

/// POST a multipart body with a single file field.
pub async fn post_multipart(
    app: Router,
    uri: &str,
    field: &str,
    filename: &str,
    bytes: &[u8],
) -> Response<Body> {
    let boundary = "stitchflow-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = Request::post(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// `Location` header of a redirect.
pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a client over HTTP and return its id.
pub async fn create_client(pool: &PgPool, name: &str) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/clients",
        serde_json::json!({ "name": name }),
    )
    .await;
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a fabric with `meters` in stock over HTTP and return its id.
pub async fn create_fabric(pool: &PgPool, name: &str, meters: f64) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/fabrics",
        serde_json::json!({ "name": name, "color": "Red", "metersAvailable": meters }),
    )
    .await;
    body_json(response).await["id"].as_i64().unwrap()
}
