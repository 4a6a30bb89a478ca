//! Shared response bodies for API handlers.

use serde::Serialize;

/// `{ "message": ... }` body returned by deletes and logout.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `{ "url": ... }` body returned by uploads.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}
