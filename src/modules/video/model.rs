use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub enum VideoStatus {
    PROCESSING,
    PROCESSED,
}

impl ToString for VideoStatus {
    fn to_string(&self) -> String {
        match self {
            VideoStatus::PROCESSING => "PROCESSING".to_string(),
            VideoStatus::PROCESSED => "PROCESSED".to_string(),
        }
    }
}

impl From<String> for VideoStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "PROCESSED" => VideoStatus::PROCESSED,
            _ => VideoStatus::PROCESSING,
        }
    }
}

/// One transcoding job. A record exists from the moment a notification is
/// admitted; there is no rollback to "absent" on failure, so a job that died
/// mid-pipeline stays at PROCESSING until external reconciliation retires it.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
pub struct Video {
    pub id: String,
    pub owner_id: String,
    pub raw_filename: String,
    pub filename: Option<String>,
    pub status: String, // Stored as string in DB
    #[schema(value_type = String, format = Date)]
    pub created_at: OffsetDateTime,
    #[schema(value_type = String, format = Date)]
    pub updated_at: OffsetDateTime,
}

/// Identity of a job before it is admitted, derived purely from the
/// raw object name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVideo {
    pub id: String,
    pub owner_id: String,
    pub raw_filename: String,
}
