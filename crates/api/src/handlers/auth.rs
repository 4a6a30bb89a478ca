//! Google sign-in and session endpoints.
//!
//! The browser is sent to Google from `/auth/google`; the callback resolves
//! (or creates) the local account, issues a session token and hands it to
//! the frontend through a redirect.

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use stitchflow_core::error::CoreError;
use stitchflow_db::models::user::{ExternalProfile, User};
use stitchflow_db::repositories::UserRepo;

use crate::auth::session::{issue_oauth_state, issue_session_token, verify_oauth_state};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Query parameters Google appends to the callback URL.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// GET /auth/google
///
/// 302 to Google's consent screen. 503 when sign-in is not configured.
pub async fn google_login(State(state): State<AppState>) -> AppResult<Response> {
    let oauth = state
        .oauth
        .as_ref()
        .ok_or_else(|| AppError::ServiceUnavailable("Google sign-in is not configured".into()))?;

    let csrf_state = issue_oauth_state(&state.config.session)
        .map_err(|e| AppError::InternalError(format!("Failed to sign OAuth state: {e}")))?;

    Ok(found(&oauth.authorize_url(&csrf_state)))
}

/// GET /auth/google/callback
///
/// Always answers with a redirect to the frontend: `/auth/callback?token=`
/// on success, `/login?error=failed` otherwise.
pub async fn google_callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Response {
    let frontend = state.config.frontend_url.trim_end_matches('/');
    match complete_sign_in(&state, params).await {
        Ok(token) => found(&format!("{frontend}/auth/callback?token={token}")),
        Err(e) => {
            tracing::warn!(error = %e, "Google sign-in failed");
            found(&format!("{frontend}/login?error=failed"))
        }
    }
}

async fn complete_sign_in(state: &AppState, params: CallbackParams) -> Result<String, AppError> {
    if let Some(error) = params.error {
        return Err(AppError::BadRequest(format!("Provider returned error: {error}")));
    }
    let oauth = state
        .oauth
        .as_ref()
        .ok_or_else(|| AppError::ServiceUnavailable("Google sign-in is not configured".into()))?;

    let csrf_state = params.state.unwrap_or_default();
    if !verify_oauth_state(&csrf_state, &state.config.session) {
        return Err(AppError::BadRequest("Invalid OAuth state".into()));
    }
    let code = params
        .code
        .ok_or_else(|| AppError::BadRequest("Missing authorization code".into()))?;

    let profile = oauth
        .authenticate(&code)
        .await
        .map_err(|e| AppError::InternalError(format!("Google token exchange failed: {e}")))?;
    let user = resolve_user(state, &profile).await?;
    tracing::info!(user_id = user.id, "User signed in with Google");

    issue_session_token(user.id, &state.config.session)
        .map_err(|e| AppError::InternalError(format!("Failed to issue session token: {e}")))
}

/// Match the profile to an account by Google id, then by email. An email
/// match gets the Google id linked; no match creates a new account.
async fn resolve_user(state: &AppState, profile: &ExternalProfile) -> AppResult<User> {
    let existing =
        UserRepo::find_by_google_or_email(&state.pool, &profile.google_id, &profile.email).await?;

    let user = match existing {
        Some(user) if user.google_id.as_deref() == Some(profile.google_id.as_str()) => user,
        Some(user) => UserRepo::link_google(&state.pool, user.id, profile).await?,
        None => UserRepo::create_from_profile(&state.pool, profile).await?,
    };
    Ok(user)
}

/// GET /api/auth/me
///
/// 401 "Not authenticated" without a valid session.
pub async fn current_user(auth: AuthUser, State(state): State<AppState>) -> AppResult<Json<User>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| CoreError::Unauthorized("Not authenticated".into()))?;
    Ok(Json(user))
}

/// POST /api/auth/logout
///
/// Session tokens are stateless; the client discards its copy.
pub async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse::new("Logged out"))
}
