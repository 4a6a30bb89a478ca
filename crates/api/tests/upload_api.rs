//! HTTP-level tests for `/api/upload`.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_multipart};
use sqlx::PgPool;

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake-image";

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_returns_public_url(pool: PgPool) {
    let (app, store) = common::build_app_with_store(pool);

    let response = post_multipart(app, "/api/upload", "image", "swatch.png", PNG_BYTES).await;

    assert_eq!(response.status(), StatusCode::OK);
    let url = body_json(response).await["url"].as_str().unwrap().to_string();
    assert!(url.starts_with("https://blobs.test/"));
    assert!(url.ends_with(".png"));

    let objects = store.objects.lock().unwrap();
    assert_eq!(objects.len(), 1);
    assert_eq!(objects[0].1, "image/png");
    assert_eq!(objects[0].2, PNG_BYTES.len());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_without_image_field_returns_400(pool: PgPool) {
    let (app, store) = common::build_app_with_store(pool);

    let response = post_multipart(app, "/api/upload", "document", "swatch.png", PNG_BYTES).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "No file uploaded");
    assert!(store.objects.lock().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_rejects_non_images(pool: PgPool) {
    let (app, _store) = common::build_app_with_store(pool);

    let response = post_multipart(app, "/api/upload", "image", "invoice.pdf", b"%PDF").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_without_store_returns_500(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_multipart(app, "/api/upload", "image", "swatch.png", PNG_BYTES).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["message"], "Storage not configured");
}
