use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::Path;
use tracing::{info, warn};

use super::dto::{NotificationPayload, PubSubEnvelope};
use super::error::ProcessError;
use super::model::NewVideo;
use crate::infrastructure::staging::Staging;
use crate::state::AppState;

const OUTPUT_PREFIX: &str = "processed_";

pub struct VideoService;

impl VideoService {
    /// Drive one notification through the whole job lifecycle:
    /// validate, admit, fetch, transcode, publish, finalize — and release
    /// both staged files no matter where the pipeline stopped.
    pub async fn process_notification(
        state: &AppState,
        payload: &[u8],
    ) -> Result<String, ProcessError> {
        let name = Self::parse_payload(payload)?;
        let (video, output_filename) = Self::derive_job(&name)?;

        // Idempotency gate: a single conditional insert, so concurrent
        // notifications for the same id cannot both be admitted.
        if !state.store.admit(&video).await? {
            return Err(ProcessError::Conflict);
        }
        info!("🎬 Admitted job {} (owner {})", video.id, video.owner_id);

        let raw_path = state.staging.raw_path(&video.raw_filename);
        let processed_path = state.staging.processed_path(&output_filename);

        let outcome =
            Self::run_pipeline(state, &video, &output_filename, &raw_path, &processed_path).await;

        Self::release_staged_files(&raw_path, &processed_path).await;

        outcome?;
        Ok("Video processed successfully".to_string())
    }

    async fn run_pipeline(
        state: &AppState,
        video: &NewVideo,
        output_filename: &str,
        raw_path: &Path,
        processed_path: &Path,
    ) -> Result<(), ProcessError> {
        state.storage.fetch(&video.raw_filename, raw_path).await?;

        state.transcoder.transcode(raw_path, processed_path).await?;

        let url = state.storage.publish(processed_path, output_filename).await?;

        state.store.finish(&video.id, output_filename).await?;
        info!("🏁 Job {} finished: {}", video.id, url);
        Ok(())
    }

    /// Delete both staged files. The deletions run concurrently and each
    /// treats an absent file as success; a failed delete is logged and never
    /// overrides the pipeline outcome.
    async fn release_staged_files(raw_path: &Path, processed_path: &Path) {
        let (raw_cleanup, processed_cleanup) =
            tokio::join!(Staging::remove(raw_path), Staging::remove(processed_path));

        for (path, result) in [(raw_path, raw_cleanup), (processed_path, processed_cleanup)] {
            if let Err(e) = result {
                warn!("Failed to delete staged file {}: {}", path.display(), e);
            }
        }
    }

    /// Decode the notification envelope down to the raw object name.
    fn parse_payload(payload: &[u8]) -> Result<String, ProcessError> {
        if payload.is_empty() {
            return Err(ProcessError::InvalidRequest("no message received".into()));
        }

        let envelope: PubSubEnvelope = serde_json::from_slice(payload)
            .map_err(|_| ProcessError::InvalidRequest("malformed notification body".into()))?;

        let message = envelope
            .message
            .ok_or_else(|| ProcessError::InvalidRequest("invalid message format".into()))?;

        let data = message
            .data
            .ok_or_else(|| ProcessError::InvalidRequest("invalid message format".into()))?;

        let decoded = STANDARD
            .decode(data.as_bytes())
            .map_err(|_| ProcessError::InvalidRequest("message data is not valid base64".into()))?;

        let payload: NotificationPayload = serde_json::from_slice(&decoded)
            .map_err(|_| ProcessError::InvalidRequest("message payload is not valid JSON".into()))?;

        payload
            .name
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ProcessError::InvalidRequest("missing filename".into()))
    }

    /// Derive the job identity from the raw object name. Pure: the same name
    /// always yields the same id, owner and output filename.
    fn derive_job(name: &str) -> Result<(NewVideo, String), ProcessError> {
        // Object names become local filenames, so they must not traverse.
        if name.contains('/') || name.contains('\\') || name.contains("..") {
            return Err(ProcessError::InvalidRequest("invalid filename".into()));
        }

        let id = name.split('.').next().unwrap_or_default();
        if id.is_empty() {
            return Err(ProcessError::InvalidRequest("missing filename".into()));
        }

        let owner_id = id.split('-').next().unwrap_or(id);
        let output_filename = format!("{OUTPUT_PREFIX}{name}");

        Ok((
            NewVideo {
                id: id.to_string(),
                owner_id: owner_id.to_string(),
                raw_filename: name.to_string(),
            },
            output_filename,
        ))
    }
}
