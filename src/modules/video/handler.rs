use crate::common::response::{ApiError, ApiResponse, ApiSuccess};
use crate::modules::video::dto::{UploadUrlRequest, UploadUrlResponse};
use crate::modules::video::model::Video;
use crate::modules::video::service::VideoService;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::time::Duration;
use time::OffsetDateTime;
use tracing::error;
use validator::Validate;

const UPLOAD_URL_TTL: Duration = Duration::from_secs(15 * 60);
const LIST_LIMIT: i64 = 10;

#[utoipa::path(
    post,
    path = "/api/v1/videos/process",
    request_body = crate::modules::video::dto::PubSubEnvelope,
    responses(
        (status = 200, description = "Video processed"),
        (status = 400, description = "Malformed notification or duplicate job"),
        (status = 500, description = "Transfer or transcoding failure")
    ),
    tag = "Videos"
)]
pub async fn process_video(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    match VideoService::process_notification(&state, &body).await {
        Ok(message) => {
            ApiSuccess(ApiResponse::success((), &message), StatusCode::OK).into_response()
        }
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/videos",
    responses(
        (status = 200, description = "List Videos", body = ApiResponse<Vec<Video>>),
        (status = 500, description = "Internal Server Error")
    ),
    tag = "Videos"
)]
pub async fn list_videos(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.list(LIST_LIMIT).await {
        Ok(videos) => ApiSuccess(
            ApiResponse::success(videos, "Videos retrieved successfully"),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => {
            error!("Failed to list videos: {:?}", e);
            ApiError(
                "Internal server error".to_string(),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
            .into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/videos/{id}",
    params(
        ("id" = String, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Get Video", body = ApiResponse<Video>),
        (status = 404, description = "Video Not Found"),
        (status = 500, description = "Internal Server Error")
    ),
    tag = "Videos"
)]
pub async fn get_video(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    match state.store.get(&id).await {
        Ok(Some(video)) => ApiSuccess(
            ApiResponse::success(video, "Video retrieved successfully"),
            StatusCode::OK,
        )
        .into_response(),
        Ok(None) => {
            ApiError("Video not found".to_string(), StatusCode::NOT_FOUND).into_response()
        }
        Err(e) => {
            error!("Failed to get video {}: {:?}", id, e);
            ApiError(
                "Internal server error".to_string(),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
            .into_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/videos/upload-url",
    request_body = UploadUrlRequest,
    responses(
        (status = 200, description = "Signed upload URL created", body = ApiResponse<UploadUrlResponse>),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Object storage failure")
    ),
    tag = "Videos"
)]
pub async fn create_upload_url(
    State(state): State<AppState>,
    Json(req): Json<UploadUrlRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return ApiError(format!("Validation error: {e}"), StatusCode::BAD_REQUEST)
            .into_response();
    }

    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    let file_name = format!("{}-{}.{}", req.uid, millis, req.file_extension);

    match state
        .storage
        .presigned_upload_url(&file_name, UPLOAD_URL_TTL)
        .await
    {
        Ok(url) => ApiSuccess(
            ApiResponse::success(
                UploadUrlResponse { url, file_name },
                "Upload URL created successfully",
            ),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => {
            error!("Failed to create upload URL: {:?}", e);
            ApiError(
                "Object storage failure".to_string(),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
            .into_response()
        }
    }
}
