//! Repository for the append-only `activity_logs` table.

use sqlx::PgPool;

use crate::models::activity_log::{ActivityLog, CreateActivityLog};

const COLUMNS: &str = "id, user_id, action, entity_type, entity_id, details, created_at";

/// Provides insert and feed queries for activity entries.
pub struct ActivityLogRepo;

impl ActivityLogRepo {
    /// Append one entry.
    pub async fn insert(
        pool: &PgPool,
        entry: &CreateActivityLog,
    ) -> Result<ActivityLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO activity_logs (user_id, action, entity_type, entity_id, details)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(entry.user_id)
            .bind(entry.action.as_str())
            .bind(entry.entity_type.as_str())
            .bind(&entry.entity_id)
            .bind(serde_json::Value::Object(entry.details.clone()))
            .fetch_one(pool)
            .await
    }

    /// The `limit` newest entries, newest first.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<ActivityLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activity_logs ORDER BY created_at DESC, id DESC LIMIT $1"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
