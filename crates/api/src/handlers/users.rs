//! Handlers for the signed-in user's own profile.

use axum::extract::State;
use axum::Json;
use serde_json::json;
use stitchflow_core::activity::{ActivityAction, EntityKind};
use stitchflow_core::error::CoreError;
use stitchflow_core::validation::{max_length_if_present, require_text_if_present, NAME_MAX_LEN};
use stitchflow_db::models::user::{UpdateUser, User};
use stitchflow_db::repositories::UserRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/users/me
pub async fn get_me(auth: AuthUser, State(state): State<AppState>) -> AppResult<Json<User>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| CoreError::not_found("User", auth.user_id))?;
    Ok(Json(user))
}

/// PUT /api/users/me
///
/// Name, email, avatar, nickname and preferences; omitted fields are kept.
pub async fn update_me(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<User>> {
    require_text_if_present("name", input.name.as_deref())?;
    require_text_if_present("email", input.email.as_deref())?;
    for (field, value) in [
        ("name", input.name.as_deref()),
        ("email", input.email.as_deref()),
        ("nickname", input.nickname.as_deref()),
    ] {
        max_length_if_present(field, value, NAME_MAX_LEN)?;
    }

    let user = UserRepo::update_profile(&state.pool, auth.user_id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("User", auth.user_id))?;

    state.activity.record(
        ActivityAction::Update,
        EntityKind::User,
        user.id,
        json!({ "name": user.name, "nickname": user.nickname }),
    );

    Ok(Json(user))
}
