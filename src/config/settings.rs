use serde::Deserialize;
use crate::config::env::{self, EnvKey};

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    pub server_port: u16,
    pub database_url: String,
    pub s3_endpoint: String,
    pub s3_access_key: String,
    pub s3_secret_key: String,
    pub raw_bucket: String,
    pub processed_bucket: String,
    pub raw_staging_dir: String,
    pub processed_staging_dir: String,
    pub transcode_timeout_secs: u64,
}

impl AppConfig {
    pub fn new() -> Result<Self, std::env::VarError> {
        Ok(Self {
            server_port: env::get_parsed(EnvKey::ServerPort, 3000),
            database_url: env::get(EnvKey::DatabaseUrl)?,
            s3_endpoint: env::get(EnvKey::S3Endpoint)?,
            s3_access_key: env::get(EnvKey::S3AccessKey)?,
            s3_secret_key: env::get(EnvKey::S3SecretKey)?,
            raw_bucket: env::get_or(EnvKey::RawBucket, "raw-videos-bucket"),
            processed_bucket: env::get_or(EnvKey::ProcessedBucket, "processed-videos-bucket"),
            raw_staging_dir: env::get_or(EnvKey::RawStagingDir, "./raw-videos"),
            processed_staging_dir: env::get_or(EnvKey::ProcessedStagingDir, "./processed-videos"),
            transcode_timeout_secs: env::get_parsed(EnvKey::TranscodeTimeoutSecs, 600),
        })
    }
}
