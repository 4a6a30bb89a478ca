use axum::extract::State;
use axum::Json;
use stitchflow_core::reporting::ACTIVITY_FEED_LIMIT;
use stitchflow_db::models::activity_log::ActivityFeedEntry;
use stitchflow_db::repositories::ActivityLogRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/activity-logs
///
/// Newest entries first, capped at [`ACTIVITY_FEED_LIMIT`].
pub async fn list_activity(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ActivityFeedEntry>>> {
    let entries = ActivityLogRepo::list_recent(&state.pool, ACTIVITY_FEED_LIMIT)
        .await?
        .into_iter()
        .map(ActivityFeedEntry::from)
        .collect();
    Ok(Json(entries))
}
