use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// --- NOTIFICATION DTOs ---

/// Push-style notification envelope: the interesting part is a base64
/// string carrying a JSON document with the raw object name.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PubSubEnvelope {
    pub message: Option<PubSubMessage>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PubSubMessage {
    pub data: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NotificationPayload {
    pub name: Option<String>,
}

// --- UPLOAD URL DTOs ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UploadUrlRequest {
    #[validate(length(min = 1, message = "uid must not be empty"))]
    pub uid: String,
    #[validate(length(min = 1, message = "file_extension must not be empty"))]
    pub file_extension: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadUrlResponse {
    pub url: String,
    pub file_name: String,
}
