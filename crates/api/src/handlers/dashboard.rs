use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use stitchflow_core::reporting::TrendRange;
use stitchflow_db::models::dashboard::DashboardSnapshot;
use stitchflow_db::models::user::User;
use stitchflow_db::repositories::{DashboardRepo, UserRepo};

use crate::error::AppResult;
use crate::middleware::auth::MaybeAuthUser;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct DashboardParams {
    /// `7d`, `30d`, `6m` or `1y`; anything else means `7d`.
    pub range: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub user: Option<User>,
    #[serde(flatten)]
    pub snapshot: DashboardSnapshot,
}

/// GET /api/dashboard/stats
///
/// Headline totals are all-time; `range` only windows the trend chart. The
/// `user` field is the signed-in user, or the first account when the request
/// carries no valid session.
pub async fn get_stats(
    MaybeAuthUser(auth): MaybeAuthUser,
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
) -> AppResult<Json<DashboardStats>> {
    let range = TrendRange::parse(params.range.as_deref());

    let user = match auth {
        Some(auth) => UserRepo::find_by_id(&state.pool, auth.user_id).await?,
        None => None,
    };
    let user = match user {
        Some(user) => Some(user),
        None => UserRepo::find_first(&state.pool).await?,
    };

    let snapshot = DashboardRepo::snapshot(&state.pool, range).await?;
    tracing::debug!(range = range.as_str(), "Dashboard stats computed");

    Ok(Json(DashboardStats { user, snapshot }))
}
