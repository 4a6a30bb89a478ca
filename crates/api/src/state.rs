use std::sync::Arc;

use crate::activity::ActivityRecorder;
use crate::auth::google::GoogleOAuth;
use crate::config::ServerConfig;
use crate::storage::BlobStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: stitchflow_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Background writer for the activity feed.
    pub activity: ActivityRecorder,
    /// Image store; `None` when storage is not configured.
    pub blob_store: Option<Arc<dyn BlobStore>>,
    /// Google sign-in; `None` when OAuth credentials are missing.
    pub oauth: Option<Arc<GoogleOAuth>>,
}

impl AppState {
    /// Build state from configuration, wiring the production collaborators.
    pub fn new(pool: stitchflow_db::DbPool, config: ServerConfig) -> Self {
        let blob_store = config
            .storage
            .as_ref()
            .map(|storage| {
                Arc::new(crate::storage::SupabaseStorage::new(storage)) as Arc<dyn BlobStore>
            });
        let oauth = config
            .google
            .clone()
            .map(|google| Arc::new(GoogleOAuth::new(google, config.google_callback_url())));

        Self {
            activity: ActivityRecorder::new(pool.clone()),
            pool,
            config: Arc::new(config),
            blob_store,
            oauth,
        }
    }
}
