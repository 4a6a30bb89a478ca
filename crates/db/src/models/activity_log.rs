//! Activity log model. Entries are append-only (no update DTO).

use serde::Serialize;
use sqlx::FromRow;
use stitchflow_core::activity::{feed_timestamp, ActivityAction, EntityKind};
use stitchflow_core::types::{DbId, JsonObject, Timestamp};

/// A row from the `activity_logs` table.
#[derive(Debug, Clone, FromRow)]
pub struct ActivityLog {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<String>,
    pub details: Option<serde_json::Value>,
    pub created_at: Timestamp,
}

/// Insert payload for one activity entry.
#[derive(Debug, Clone)]
pub struct CreateActivityLog {
    pub user_id: Option<DbId>,
    pub action: ActivityAction,
    pub entity_type: EntityKind,
    pub entity_id: String,
    pub details: JsonObject,
}

/// Activity entry as served by `GET /api/activity-logs`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityFeedEntry {
    pub id: DbId,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<String>,
    pub details: serde_json::Value,
    /// Display string, e.g. `Mar 04, 02:15 PM`.
    pub timestamp: String,
    pub created_at: Timestamp,
}

impl From<ActivityLog> for ActivityFeedEntry {
    fn from(log: ActivityLog) -> Self {
        Self {
            id: log.id,
            action: log.action,
            entity_type: log.entity_type,
            entity_id: log.entity_id,
            details: log
                .details
                .unwrap_or_else(|| serde_json::Value::Object(JsonObject::new())),
            timestamp: feed_timestamp(log.created_at),
            created_at: log.created_at,
        }
    }
}
