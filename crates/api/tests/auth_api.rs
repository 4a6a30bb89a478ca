//! HTTP-level tests for sign-in, session and profile endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, location, post_empty, put_json_auth, FRONTEND_URL};
use sqlx::PgPool;
use stitchflow_db::models::user::{ExternalProfile, User};
use stitchflow_db::repositories::UserRepo;

async fn seed_user(pool: &PgPool) -> User {
    UserRepo::create_from_profile(
        pool,
        &ExternalProfile {
            google_id: "google-123".to_string(),
            email: "owner@example.com".to_string(),
            name: "Shop Owner".to_string(),
            avatar_url: Some("https://img.test/a.png".to_string()),
        },
    )
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_without_token_returns_401(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/auth/me").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["message"], "Not authenticated");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_with_garbage_token_returns_401(pool: PgPool) {
    let response = get_auth(common::build_test_app(pool), "/api/auth/me", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_with_valid_token_returns_user(pool: PgPool) {
    let user = seed_user(&pool).await;
    let token = common::token_for(user.id);

    let response = get_auth(common::build_test_app(pool), "/api/auth/me", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], user.id);
    assert_eq!(json["email"], "owner@example.com");
    assert_eq!(json["googleId"], "google-123");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_token_for_deleted_user_returns_401(pool: PgPool) {
    let token = common::token_for(424242);
    let response = get_auth(common::build_test_app(pool), "/api/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_logout(pool: PgPool) {
    let response = post_empty(common::build_test_app(pool), "/api/auth/logout").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Logged out");
}

// ---------------------------------------------------------------------------
// Google redirects
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_google_login_unconfigured_returns_503(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/auth/google").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_google_login_redirects_to_consent_screen(pool: PgPool) {
    let response = get(common::build_app_with_oauth(pool), "/auth/google").await;

    assert_eq!(response.status(), StatusCode::FOUND);
    let target = location(&response);
    assert!(target.starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
    assert!(target.contains("client_id=test-client-id"));
    assert!(target.contains("state="));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_callback_with_forged_state_redirects_to_login(pool: PgPool) {
    let response = get(
        common::build_app_with_oauth(pool),
        "/auth/google/callback?code=abc&state=forged",
    )
    .await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), format!("{FRONTEND_URL}/login?error=failed"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_callback_with_provider_error_redirects_to_login(pool: PgPool) {
    let response = get(
        common::build_app_with_oauth(pool),
        "/auth/google/callback?error=access_denied",
    )
    .await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), format!("{FRONTEND_URL}/login?error=failed"));
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_profile_requires_auth(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/users/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_profile(pool: PgPool) {
    let user = seed_user(&pool).await;
    let token = common::token_for(user.id);

    let response = put_json_auth(
        common::build_test_app(pool),
        "/api/users/me",
        serde_json::json!({
            "nickname": "Boss",
            "preferences": { "showRevenueChart": false }
        }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["nickname"], "Boss");
    assert_eq!(json["name"], "Shop Owner");
    assert_eq!(json["preferences"]["showRevenueChart"], false);
}
