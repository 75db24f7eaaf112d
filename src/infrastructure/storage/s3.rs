use async_trait::async_trait;
use aws_sdk_s3::{Client, config::Region, config::Credentials, config::BehaviorVersion};
use aws_sdk_s3::config::Builder;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use std::path::Path;
use std::time::Duration;
use tracing::info;

use super::{ObjectStorage, StorageError};

#[derive(Clone)]
pub struct S3Storage {
    client: Client,
    endpoint: String,
    raw_bucket: String,
    processed_bucket: String,
}

impl S3Storage {
    pub async fn new(
        endpoint: &str,
        raw_bucket: &str,
        processed_bucket: &str,
        access_key: &str,
        secret_key: &str,
    ) -> Self {
        let credentials = Credentials::new(access_key, secret_key, None, None, "static");

        let config = Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .endpoint_url(endpoint)
            .credentials_provider(credentials)
            .force_path_style(true) // Required for MinIO
            .build();

        let client = Client::from_conf(config);

        info!("✅ Connected to S3 (MinIO)");

        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            raw_bucket: raw_bucket.to_string(),
            processed_bucket: processed_bucket.to_string(),
        }
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn fetch(&self, object_name: &str, dest: &Path) -> Result<(), StorageError> {
        let result = self
            .client
            .get_object()
            .bucket(&self.raw_bucket)
            .key(object_name)
            .send()
            .await
            .map_err(|e| {
                let service_err = e.into_service_error();
                if service_err.is_no_such_key() {
                    StorageError::NotFound(object_name.to_string())
                } else {
                    StorageError::Transfer(service_err.to_string())
                }
            })?;

        let data = result
            .body
            .collect()
            .await
            .map_err(|e| StorageError::Transfer(e.to_string()))?
            .into_bytes();

        tokio::fs::write(dest, &data)
            .await
            .map_err(|e| StorageError::Transfer(e.to_string()))?;

        info!(
            "⬇️ Downloaded {}/{} ({} bytes) to {}",
            self.raw_bucket,
            object_name,
            data.len(),
            dest.display()
        );
        Ok(())
    }

    async fn publish(&self, src: &Path, object_name: &str) -> Result<String, StorageError> {
        let body = ByteStream::from_path(src)
            .await
            .map_err(|e| StorageError::Transfer(e.to_string()))?;

        let content_type = mime_guess::from_path(src).first_or_octet_stream();

        self.client
            .put_object()
            .bucket(&self.processed_bucket)
            .key(object_name)
            .body(body)
            .content_type(content_type.as_ref())
            .send()
            .await
            .map_err(|e| StorageError::Transfer(e.into_service_error().to_string()))?;

        // Visibility is part of the publish contract, not a best-effort extra.
        self.client
            .put_object_acl()
            .bucket(&self.processed_bucket)
            .key(object_name)
            .acl(ObjectCannedAcl::PublicRead)
            .send()
            .await
            .map_err(|e| StorageError::Transfer(e.into_service_error().to_string()))?;

        let url = format!("{}/{}/{}", self.endpoint, self.processed_bucket, object_name);
        info!("⬆️ Published {} to {}", src.display(), url);
        Ok(url)
    }

    async fn presigned_upload_url(
        &self,
        object_name: &str,
        expires_in: Duration,
    ) -> Result<String, StorageError> {
        let presigning = PresigningConfig::expires_in(expires_in)
            .map_err(|e| StorageError::Transfer(e.to_string()))?;

        let request = self
            .client
            .put_object()
            .bucket(&self.raw_bucket)
            .key(object_name)
            .presigned(presigning)
            .await
            .map_err(|e| StorageError::Transfer(e.into_service_error().to_string()))?;

        Ok(request.uri().to_string())
    }
}
