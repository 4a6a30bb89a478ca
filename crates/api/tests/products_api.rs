//! HTTP-level tests for `/api/products`.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_product_with_default_fabric(pool: PgPool) {
    let silk = common::create_fabric(&pool, "Silk", 10.0).await;

    let response = post_json(
        common::build_test_app(pool),
        "/api/products",
        serde_json::json!({ "name": "Anarkali", "defaultFabricId": silk, "basePrice": 2500 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Anarkali");
    assert_eq!(json["defaultFabricName"], "Silk");
    assert_eq!(json["basePrice"].as_f64(), Some(2500.0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_product_name_returns_400(pool: PgPool) {
    let body = serde_json::json!({ "name": "Lehenga" });
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/products", body.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(common::build_test_app(pool.clone()), "/api/products", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Product already exists");
    assert_eq!(json["code"], "DUPLICATE");

    let response = get(common::build_test_app(pool), "/api/products").await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_default_fabric_returns_400(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/products",
        serde_json::json!({ "name": "Sherwani", "defaultFabricId": 999999 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_values_beyond_column_limits_are_rejected(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/products",
        serde_json::json!({ "name": "Sherwani", "basePrice": 1.0e9 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response = post_json(
        common::build_test_app(pool),
        "/api/products",
        serde_json::json!({ "name": "n".repeat(256) }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_products_by_name(pool: PgPool) {
    for name in ["Saree", "Blouse", "Kurta"] {
        post_json(
            common::build_test_app(pool.clone()),
            "/api/products",
            serde_json::json!({ "name": name }),
        )
        .await;
    }

    let response = get(common::build_test_app(pool), "/api/products").await;
    let json = body_json(response).await;
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Blouse", "Kurta", "Saree"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_and_delete_product(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/products",
        serde_json::json!({ "name": "Gown", "basePrice": 100 }),
    )
    .await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/products/{id}"),
        serde_json::json!({ "basePrice": 180 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Gown");
    assert_eq!(json["basePrice"].as_f64(), Some(180.0));

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/products/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(common::build_test_app(pool), &format!("/api/products/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
