//! HTTP-level tests for `/api/fabrics`.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, patch_json, post_json, put_json};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_fabric_returns_201(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/fabrics",
        serde_json::json!({ "name": "Cotton", "color": "White", "metersAvailable": 42.5 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Cotton");
    assert_eq!(json["metersAvailable"].as_f64(), Some(42.5));
    assert_eq!(json["status"], "In Stock");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_negative_initial_stock_is_rejected(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/fabrics",
        serde_json::json!({ "name": "Cotton", "metersAvailable": -1 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_values_beyond_column_limits_are_rejected(pool: PgPool) {
    let bodies = [
        serde_json::json!({ "name": "x".repeat(256) }),
        serde_json::json!({ "name": "Cotton", "color": "c".repeat(101) }),
        serde_json::json!({ "name": "Cotton", "metersAvailable": 1.0e9 }),
        serde_json::json!({ "name": "Cotton", "pricePerMeter": 123456789 }),
    ];
    for body in bodies {
        let response = post_json(common::build_test_app(pool.clone()), "/api/fabrics", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }

    let id = common::create_fabric(&pool, "Cotton", 5.0).await;
    let response = patch_json(
        common::build_test_app(pool),
        &format!("/api/fabrics/{id}/stock"),
        serde_json::json!({ "metersAvailable": 1.0e9 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_orders_by_scarcity(pool: PgPool) {
    common::create_fabric(&pool, "Plenty", 80.0).await;
    common::create_fabric(&pool, "Scarce", 4.0).await;

    let response = get(common::build_test_app(pool), "/api/fabrics").await;
    let json = body_json(response).await;
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Scarce", "Plenty"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_set_stock(pool: PgPool) {
    let id = common::create_fabric(&pool, "Linen", 5.0).await;

    let response = patch_json(
        common::build_test_app(pool),
        &format!("/api/fabrics/{id}/stock"),
        serde_json::json!({ "metersAvailable": 60 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["metersAvailable"].as_f64(), Some(60.0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_set_negative_stock_is_rejected(pool: PgPool) {
    let id = common::create_fabric(&pool, "Linen", 5.0).await;

    let response = patch_json(
        common::build_test_app(pool),
        &format!("/api/fabrics/{id}/stock"),
        serde_json::json!({ "metersAvailable": -3 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_set_stock_on_missing_fabric_returns_404(pool: PgPool) {
    let response = patch_json(
        common::build_test_app(pool),
        "/api/fabrics/999999/stock",
        serde_json::json!({ "metersAvailable": 3 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_fabric_partial(pool: PgPool) {
    let id = common::create_fabric(&pool, "Velvet", 12.0).await;

    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/fabrics/{id}"),
        serde_json::json!({ "pricePerMeter": 250 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Velvet");
    assert_eq!(json["pricePerMeter"].as_f64(), Some(250.0));
    assert_eq!(json["metersAvailable"].as_f64(), Some(12.0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_fabric_in_use_is_rejected(pool: PgPool) {
    let client_id = common::create_client(&pool, "Asha").await;
    let silk = common::create_fabric(&pool, "Silk", 30.0).await;
    post_json(
        common::build_test_app(pool.clone()),
        "/api/orders",
        serde_json::json!({
            "clientId": client_id,
            "items": [{ "dressName": "Kurta", "fabricId": silk, "fabricRequired": 2 }]
        }),
    )
    .await;

    let response = delete(common::build_test_app(pool), &format!("/api/fabrics/{silk}")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "Cannot delete fabric because it is used in existing orders."
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_unused_fabric(pool: PgPool) {
    let id = common::create_fabric(&pool, "Spare", 1.0).await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/fabrics/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(common::build_test_app(pool), &format!("/api/fabrics/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
