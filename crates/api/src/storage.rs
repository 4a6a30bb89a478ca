//! Object storage for uploaded images.
//!
//! [`BlobStore`] is the seam handlers depend on; [`SupabaseStorage`] is the
//! production implementation talking to the Supabase Storage REST API.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::StorageConfig;

/// HTTP request timeout for a single upload.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Error type for blob store failures.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The store rejected the object.
    #[error("Storage returned HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Write-only object store returning public URLs.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `bytes` under `object_name` and return its public URL.
    async fn put(
        &self,
        object_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StorageError>;
}

/// Supabase Storage bucket.
pub struct SupabaseStorage {
    client: reqwest::Client,
    base_url: String,
    service_key: String,
    bucket: String,
}

impl SupabaseStorage {
    pub fn new(config: &StorageConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            base_url: config.supabase_url.clone(),
            service_key: config.service_key.clone(),
            bucket: config.bucket.clone(),
        }
    }

    fn object_url(&self, object_name: &str) -> String {
        format!("{}/storage/v1/object/{}/{object_name}", self.base_url, self.bucket)
    }

    fn public_url(&self, object_name: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{object_name}",
            self.base_url, self.bucket
        )
    }
}

#[async_trait]
impl BlobStore for SupabaseStorage {
    async fn put(
        &self,
        object_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StorageError> {
        let response = self
            .client
            .post(self.object_url(object_name))
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(self.public_url(object_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> SupabaseStorage {
        SupabaseStorage::new(&StorageConfig {
            supabase_url: "https://proj.supabase.co".into(),
            service_key: "service".into(),
            bucket: "images".into(),
        })
    }

    #[test]
    fn upload_and_public_urls() {
        let store = storage();
        assert_eq!(
            store.object_url("1-2.png"),
            "https://proj.supabase.co/storage/v1/object/images/1-2.png"
        );
        assert_eq!(
            store.public_url("1-2.png"),
            "https://proj.supabase.co/storage/v1/object/public/images/1-2.png"
        );
    }
}
