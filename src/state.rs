use std::sync::Arc;

use crate::config::settings::AppConfig;
use crate::infrastructure::staging::Staging;
use crate::infrastructure::storage::ObjectStorage;
use crate::infrastructure::transcoder::Transcoder;
use crate::modules::video::repository::VideoStore;

/// Process-wide collaborators, built once at startup and injected everywhere.
/// The store, storage and transcoder sit behind traits so tests can swap in
/// substitutes.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<dyn VideoStore>,
    pub storage: Arc<dyn ObjectStorage>,
    pub transcoder: Arc<dyn Transcoder>,
    pub staging: Staging,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        store: Arc<dyn VideoStore>,
        storage: Arc<dyn ObjectStorage>,
        transcoder: Arc<dyn Transcoder>,
        staging: Staging,
    ) -> Self {
        Self {
            config,
            store,
            storage,
            transcoder,
            staging,
        }
    }
}
