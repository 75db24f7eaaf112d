use axum::routing::{get, post};
use axum::Router;
use crate::state::AppState;

pub mod dto;
pub mod error;
pub mod handler;
pub mod model;
pub mod repository;
pub mod service;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/process", post(handler::process_video))
        .route("/", get(handler::list_videos))
        .route("/{id}", get(handler::get_video))
        .route("/upload-url", post(handler::create_upload_url))
}
