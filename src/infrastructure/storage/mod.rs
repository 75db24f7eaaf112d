use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub mod s3;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("transfer failed: {0}")]
    Transfer(String),
}

/// Gateway to the two video buckets. `fetch` reads from the raw bucket,
/// `publish` writes to the processed bucket and makes the object public —
/// an upload whose visibility change fails counts as a failed publish.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn fetch(&self, object_name: &str, dest: &Path) -> Result<(), StorageError>;

    async fn publish(&self, src: &Path, object_name: &str) -> Result<String, StorageError>;

    async fn presigned_upload_url(
        &self,
        object_name: &str,
        expires_in: Duration,
    ) -> Result<String, StorageError>;
}
