//! Route definitions for sign-in and session endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Browser-facing OAuth routes mounted at `/auth`.
///
/// ```text
/// GET /google           -> google_login
/// GET /google/callback  -> google_callback
/// ```
pub fn oauth_router() -> Router<AppState> {
    Router::new()
        .route("/google", get(auth::google_login))
        .route("/google/callback", get(auth::google_callback))
}

/// Session routes mounted at `/api/auth`.
///
/// ```text
/// GET  /me      -> current_user (requires auth)
/// POST /logout  -> logout
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(auth::current_user))
        .route("/logout", post(auth::logout))
}
