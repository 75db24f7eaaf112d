use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

pub mod ffmpeg;

#[derive(Debug, Error)]
pub enum TranscodeError {
    #[error("transcoding engine failed: {0}")]
    Failed(String),
    #[error("transcoding timed out")]
    Timeout,
    #[error("transcoding i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// One invocation produces exactly one terminal signal: the returned future
/// resolves once the engine has fully succeeded or failed, never in between.
#[async_trait]
pub trait Transcoder: Send + Sync {
    async fn transcode(&self, input: &Path, output: &Path) -> Result<(), TranscodeError>;
}
