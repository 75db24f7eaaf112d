//! Shared test harness: an in-process router wired to in-memory fakes for
//! the store, the object storage and the transcoding engine, plus a
//! temp-dir staging area. No Postgres, S3 or ffmpeg required.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use time::OffsetDateTime;
use tower::ServiceExt;

use video_processor::app;
use video_processor::config::settings::AppConfig;
use video_processor::infrastructure::staging::Staging;
use video_processor::infrastructure::storage::{ObjectStorage, StorageError};
use video_processor::infrastructure::transcoder::{TranscodeError, Transcoder};
use video_processor::modules::video::model::{NewVideo, Video, VideoStatus};
use video_processor::modules::video::repository::VideoStore;
use video_processor::state::AppState;

/// In-memory `VideoStore` whose admission gate is a single mutex-guarded
/// check-and-insert. Counts every interaction so tests can assert the store
/// was never touched.
#[derive(Default)]
pub struct MemoryVideoStore {
    videos: Mutex<HashMap<String, Video>>,
    calls: AtomicUsize,
}

impl MemoryVideoStore {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn record(&self, id: &str) -> Option<Video> {
        self.videos.lock().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl VideoStore for MemoryVideoStore {
    async fn admit(&self, video: &NewVideo) -> Result<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut videos = self.videos.lock().unwrap();
        if videos.contains_key(&video.id) {
            return Ok(false);
        }
        let now = OffsetDateTime::now_utc();
        videos.insert(
            video.id.clone(),
            Video {
                id: video.id.clone(),
                owner_id: video.owner_id.clone(),
                raw_filename: video.raw_filename.clone(),
                filename: None,
                status: VideoStatus::PROCESSING.to_string(),
                created_at: now,
                updated_at: now,
            },
        );
        Ok(true)
    }

    async fn finish(&self, id: &str, filename: &str) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut videos = self.videos.lock().unwrap();
        let video = videos
            .get_mut(id)
            .ok_or_else(|| anyhow::anyhow!("no record for {id}"))?;
        video.status = VideoStatus::PROCESSED.to_string();
        video.filename = Some(filename.to_string());
        video.updated_at = OffsetDateTime::now_utc();
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Video>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.videos.lock().unwrap().get(id).cloned())
    }

    async fn list(&self, limit: i64) -> Result<Vec<Video>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut videos: Vec<Video> = self.videos.lock().unwrap().values().cloned().collect();
        videos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        videos.truncate(limit as usize);
        Ok(videos)
    }
}

/// In-memory object storage: seeded raw objects, captured published objects,
/// optional injected publish failure.
#[derive(Default)]
pub struct MockStorage {
    raw_objects: Mutex<HashMap<String, Vec<u8>>>,
    published: Mutex<HashMap<String, Vec<u8>>>,
    fail_publish: AtomicBool,
    fetch_calls: AtomicUsize,
    publish_calls: AtomicUsize,
}

impl MockStorage {
    pub fn seed_raw(&self, name: &str, data: &[u8]) {
        self.raw_objects
            .lock()
            .unwrap()
            .insert(name.to_string(), data.to_vec());
    }

    pub fn fail_publish(&self) {
        self.fail_publish.store(true, Ordering::SeqCst);
    }

    pub fn published_object(&self, name: &str) -> Option<Vec<u8>> {
        self.published.lock().unwrap().get(name).cloned()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn publish_count(&self) -> usize {
        self.publish_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectStorage for MockStorage {
    async fn fetch(&self, object_name: &str, dest: &Path) -> Result<(), StorageError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let data = self
            .raw_objects
            .lock()
            .unwrap()
            .get(object_name)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(object_name.to_string()))?;
        tokio::fs::write(dest, data)
            .await
            .map_err(|e| StorageError::Transfer(e.to_string()))?;
        Ok(())
    }

    async fn publish(&self, src: &Path, object_name: &str) -> Result<String, StorageError> {
        self.publish_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_publish.load(Ordering::SeqCst) {
            return Err(StorageError::Transfer("injected publish failure".into()));
        }
        let data = tokio::fs::read(src)
            .await
            .map_err(|e| StorageError::Transfer(e.to_string()))?;
        self.published
            .lock()
            .unwrap()
            .insert(object_name.to_string(), data);
        Ok(format!("http://storage.test/processed/{object_name}"))
    }

    async fn presigned_upload_url(
        &self,
        object_name: &str,
        _expires_in: Duration,
    ) -> Result<String, StorageError> {
        Ok(format!("http://storage.test/upload/{object_name}?sig=test"))
    }
}

/// Transcoder stand-in that copies input to output, or fails on demand.
#[derive(Default)]
pub struct MockTranscoder {
    fail: AtomicBool,
    calls: AtomicUsize,
}

impl MockTranscoder {
    pub fn fail_next(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transcoder for MockTranscoder {
    async fn transcode(&self, input: &Path, output: &Path) -> Result<(), TranscodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(TranscodeError::Failed("injected transcoder failure".into()));
        }
        let data = tokio::fs::read(input).await?;
        tokio::fs::write(output, data).await?;
        Ok(())
    }
}

#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

pub struct TestFixture {
    pub router: Router,
    pub store: Arc<MemoryVideoStore>,
    pub storage: Arc<MockStorage>,
    pub transcoder: Arc<MockTranscoder>,
    pub staging: Staging,
    _temp: TempDir,
}

impl TestFixture {
    pub async fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let raw_dir = temp.path().join("raw-videos");
        let processed_dir = temp.path().join("processed-videos");
        let staging = Staging::new(raw_dir.clone(), processed_dir.clone());
        staging.ensure().await.unwrap();

        let store = Arc::new(MemoryVideoStore::default());
        let storage = Arc::new(MockStorage::default());
        let transcoder = Arc::new(MockTranscoder::default());

        let config = AppConfig {
            server_port: 0,
            database_url: "postgres://unused".to_string(),
            s3_endpoint: "http://storage.test".to_string(),
            s3_access_key: "test".to_string(),
            s3_secret_key: "test".to_string(),
            raw_bucket: "raw-videos-bucket".to_string(),
            processed_bucket: "processed-videos-bucket".to_string(),
            raw_staging_dir: raw_dir.to_string_lossy().into_owned(),
            processed_staging_dir: processed_dir.to_string_lossy().into_owned(),
            transcode_timeout_secs: 5,
        };

        let state = AppState::new(
            config,
            store.clone(),
            storage.clone(),
            transcoder.clone(),
            staging.clone(),
        );

        let router = app::create_app(state).await;

        Self {
            router,
            store,
            storage,
            transcoder,
            staging,
            _temp: temp,
        }
    }

    pub async fn post(&self, uri: &str, body: impl Into<String>) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.into()))
            .unwrap();
        self.send(request).await
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        TestResponse { status, body }
    }

    /// True when neither staging directory holds any file.
    pub fn staging_is_empty(&self) -> bool {
        let count = |dir: &Path| {
            std::fs::read_dir(dir)
                .map(|entries| entries.count())
                .unwrap_or(0)
        };
        count(&self.staging.raw_path("")) == 0 && count(&self.staging.processed_path("")) == 0
    }
}

/// Build the push notification body for a raw object name.
pub fn notification_body(name: &str) -> String {
    let payload = serde_json::json!({ "name": name }).to_string();
    serde_json::json!({ "message": { "data": STANDARD.encode(payload) } }).to_string()
}
