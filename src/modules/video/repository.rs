use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

use super::model::{NewVideo, Video, VideoStatus};

/// Keyed job record store. `admit` is the idempotency gate: it must behave
/// as a single atomic insert-if-absent so that two concurrent notifications
/// for the same id can never both pass.
#[async_trait]
pub trait VideoStore: Send + Sync {
    /// Insert a PROCESSING record for the job unless one already exists.
    /// Returns false when the id was already present.
    async fn admit(&self, video: &NewVideo) -> Result<bool>;

    /// Mark the job PROCESSED and attach the processed filename.
    async fn finish(&self, id: &str, filename: &str) -> Result<()>;

    async fn get(&self, id: &str) -> Result<Option<Video>>;

    async fn list(&self, limit: i64) -> Result<Vec<Video>>;
}

pub struct PgVideoStore {
    pool: PgPool,
}

impl PgVideoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoStore for PgVideoStore {
    async fn admit(&self, video: &NewVideo) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO videos (id, owner_id, raw_filename, status)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(&video.id)
        .bind(&video.owner_id)
        .bind(&video.raw_filename)
        .bind(VideoStatus::PROCESSING.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn finish(&self, id: &str, filename: &str) -> Result<()> {
        sqlx::query(
            "UPDATE videos SET status = $1, filename = $2, updated_at = NOW() WHERE id = $3",
        )
        .bind(VideoStatus::PROCESSED.to_string())
        .bind(filename)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Video>> {
        let video = sqlx::query_as::<_, Video>("SELECT * FROM videos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(video)
    }

    async fn list(&self, limit: i64) -> Result<Vec<Video>> {
        let videos =
            sqlx::query_as::<_, Video>("SELECT * FROM videos ORDER BY created_at DESC LIMIT $1")
                .bind(limit)
                .fetch_all(&self.pool)
                .await?;

        Ok(videos)
    }
}
