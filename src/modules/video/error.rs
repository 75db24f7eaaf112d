use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::common::response::ApiError;
use crate::infrastructure::storage::StorageError;
use crate::infrastructure::transcoder::TranscodeError;

/// Failure taxonomy for the notification pipeline. The Display strings are
/// what callers see; sources are logged, never echoed.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Malformed or incomplete notification. Retrying without fixing the
    /// request will not help.
    #[error("Bad Request: {0}")]
    InvalidRequest(String),

    /// A record for this job id already exists.
    #[error("Video already processing or processed")]
    Conflict,

    /// Object store transfer problem; may be transient.
    #[error("Object storage failure")]
    Upstream(#[from] StorageError),

    /// The transcoding engine reported failure or timed out.
    #[error("Error processing video")]
    Processing(#[from] TranscodeError),

    #[error("Internal server error")]
    Internal(String),
}

impl From<anyhow::Error> for ProcessError {
    fn from(e: anyhow::Error) -> Self {
        ProcessError::Internal(format!("{e:#}"))
    }
}

impl ProcessError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProcessError::InvalidRequest(_) | ProcessError::Conflict => StatusCode::BAD_REQUEST,
            ProcessError::Upstream(_) | ProcessError::Processing(_) | ProcessError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ProcessError {
    fn into_response(self) -> Response {
        error!("Video processing request failed: {:?}", self);
        ApiError(self.to_string(), self.status_code()).into_response()
    }
}
