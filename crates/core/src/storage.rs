//! Upload naming and validation for the image blob store.

use rand::Rng;

use crate::error::CoreError;

/// Image extensions accepted by the upload endpoint.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg"];

/// Upper bound (exclusive) of the random object-name suffix.
const SUFFIX_RANGE: u32 = 1_000_000_000;

/// Lower-cased extension of `filename`, if it has one.
pub fn extension(filename: &str) -> Option<String> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Validate that `filename` looks like an image and return its extension.
pub fn validate_image_filename(filename: &str) -> Result<String, CoreError> {
    match extension(filename) {
        Some(ext) if IMAGE_EXTENSIONS.contains(&ext.as_str()) => Ok(ext),
        Some(ext) => Err(CoreError::Validation(format!(
            "Unsupported image format '.{ext}'. Supported: {}",
            IMAGE_EXTENSIONS.join(", ")
        ))),
        None => Err(CoreError::Validation(
            "Uploaded file has no extension".into(),
        )),
    }
}

/// Build the stored object name `<millis>-<suffix>.<ext>`.
pub fn object_name_with(millis: i64, suffix: u32, ext: &str) -> String {
    format!("{millis}-{suffix}.{ext}")
}

/// Build a fresh, collision-resistant object name for an upload.
pub fn unique_object_name(ext: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix = rand::rng().random_range(0..SUFFIX_RANGE);
    object_name_with(millis, suffix, ext)
}

/// Best-effort MIME type for an image extension.
pub fn content_type_for(ext: &str) -> &'static str {
    match ext {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
