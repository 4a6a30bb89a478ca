//! Image upload to the configured blob store.

use axum::extract::{Multipart, State};
use axum::Json;
use stitchflow_core::storage::{content_type_for, unique_object_name, validate_image_filename};

use crate::error::{AppError, AppResult};
use crate::response::UploadResponse;
use crate::state::AppState;

/// Multipart field carrying the file.
const FILE_FIELD: &str = "image";

/// POST /api/upload
///
/// Accepts one `image` field, stores it under a fresh name and returns the
/// public URL.
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
        file = Some((filename, bytes.to_vec()));
        break;
    }

    let Some((filename, bytes)) = file else {
        return Err(AppError::BadRequest("No file uploaded".into()));
    };
    if bytes.is_empty() {
        return Err(AppError::BadRequest("No file uploaded".into()));
    }

    let ext = validate_image_filename(&filename)?;
    let store = state
        .blob_store
        .as_ref()
        .ok_or_else(|| AppError::NotConfigured("Storage not configured".into()))?;

    let object_name = unique_object_name(&ext);
    let size = bytes.len();
    let url = store.put(&object_name, content_type_for(&ext), bytes).await?;
    tracing::info!(object = %object_name, size, "Image uploaded");

    Ok(Json(UploadResponse { url }))
}
