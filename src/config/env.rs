use std::env;
use std::str::FromStr;

pub enum EnvKey {
    ServerPort,
    DatabaseUrl,
    S3Endpoint,
    S3AccessKey,
    S3SecretKey,
    RawBucket,
    ProcessedBucket,
    RawStagingDir,
    ProcessedStagingDir,
    TranscodeTimeoutSecs,
}

impl EnvKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::ServerPort => "APP_PORT",
            EnvKey::DatabaseUrl => "DATABASE_URL",
            EnvKey::S3Endpoint => "S3_ENDPOINT",
            EnvKey::S3AccessKey => "AWS_ACCESS_KEY_ID",
            EnvKey::S3SecretKey => "AWS_SECRET_ACCESS_KEY",
            EnvKey::RawBucket => "RAW_VIDEO_BUCKET",
            EnvKey::ProcessedBucket => "PROCESSED_VIDEO_BUCKET",
            EnvKey::RawStagingDir => "RAW_STAGING_DIR",
            EnvKey::ProcessedStagingDir => "PROCESSED_STAGING_DIR",
            EnvKey::TranscodeTimeoutSecs => "TRANSCODE_TIMEOUT_SECS",
        }
    }
}

pub fn get(key: EnvKey) -> Result<String, env::VarError> {
    env::var(key.as_str())
}

pub fn get_or(key: EnvKey, default: &str) -> String {
    env::var(key.as_str()).unwrap_or_else(|_| default.to_string())
}

pub fn get_parsed<T: FromStr>(key: EnvKey, default: T) -> T {
    match get(key) {
        Ok(val) => val.parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}
