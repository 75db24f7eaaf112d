use dotenvy::dotenv;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use video_processor::app;
use video_processor::config::settings::AppConfig;
use video_processor::infrastructure::db::pool::{connect_to_db, run_migrations};
use video_processor::infrastructure::staging::Staging;
use video_processor::infrastructure::storage::s3::S3Storage;
use video_processor::infrastructure::transcoder::ffmpeg::FfmpegTranscoder;
use video_processor::modules::video::repository::PgVideoStore;
use video_processor::state::AppState;

#[tokio::main]
async fn main() {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting server...");

    let config = AppConfig::new().expect("Missing required environment variables");

    let pool = connect_to_db(&config.database_url)
        .await
        .expect("Failed to connect to database");
    run_migrations(&pool).await.expect("Failed to run migrations");

    let storage = S3Storage::new(
        &config.s3_endpoint,
        &config.raw_bucket,
        &config.processed_bucket,
        &config.s3_access_key,
        &config.s3_secret_key,
    )
    .await;

    let staging = Staging::new(
        config.raw_staging_dir.as_str(),
        config.processed_staging_dir.as_str(),
    );
    staging
        .ensure()
        .await
        .expect("Failed to create staging directories");

    let transcoder = FfmpegTranscoder::new(Duration::from_secs(config.transcode_timeout_secs));
    let store = PgVideoStore::new(pool);

    let port = config.server_port;
    let state = AppState::new(
        config,
        Arc::new(store),
        Arc::new(storage),
        Arc::new(transcoder),
        staging,
    );

    let app = app::create_app(state).await;

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .unwrap();
    info!("Server running on http://0.0.0.0:{port}");

    axum::serve(listener, app).await.unwrap();
}
