//! Best-effort activity recording.
//!
//! [`ActivityRecorder::record`] spawns the insert on its own task after the
//! primary operation has finished. A failed insert is logged and dropped; it
//! never reaches the request that triggered it.

use serde_json::Value;
use stitchflow_core::activity::{details, ActivityAction, EntityKind};
use stitchflow_db::models::activity_log::CreateActivityLog;
use stitchflow_db::repositories::ActivityLogRepo;
use stitchflow_db::DbPool;
use tokio::task::JoinHandle;

/// Writes activity entries in the background.
#[derive(Clone)]
pub struct ActivityRecorder {
    pool: DbPool,
}

impl ActivityRecorder {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Record an activity entry without waiting for it.
    ///
    /// Handlers drop the returned handle; tests may await it.
    pub fn record(
        &self,
        action: ActivityAction,
        entity_type: EntityKind,
        entity_id: impl ToString,
        payload: Value,
    ) -> JoinHandle<()> {
        let entry = CreateActivityLog {
            user_id: None,
            action,
            entity_type,
            entity_id: entity_id.to_string(),
            details: details(payload),
        };
        let pool = self.pool.clone();

        tokio::spawn(async move {
            if let Err(e) = ActivityLogRepo::insert(&pool, &entry).await {
                tracing::error!(
                    error = %e,
                    action = %entry.action,
                    entity_type = %entry.entity_type,
                    entity_id = %entry.entity_id,
                    "Failed to record activity"
                );
            }
        })
    }
}
