use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::{errors::AppError, repositories::sqlx_repo::SqlxImageRepo};

#[async_trait]
pub trait ImageRepository: Sync + Send {
    async fn create_image(&self, url: &str) -> Result<i64, AppError>;
    async fn get_image_by_url(&self, url: &str) -> Result<i64, AppError>;
    async fn attach_image(&self, post_id: i64, image_id: i64, position: i64) -> Result<(), AppError>;
}

impl SqlxImageRepo {
    pub fn new(pool: SqlitePool) -> Self {
        SqlxImageRepo { pool }
    }
}

#[async_trait]
impl ImageRepository for SqlxImageRepo {
    async fn create_image(&self, url: &str) -> Result<i64, AppError> {
        let result = sqlx::query("INSERT INTO images (url) VALUES (?)")
            .bind(url)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    async fn get_image_by_url(&self, url: &str) -> Result<i64, AppError> {
        let id: i64 = sqlx::query_scalar("SELECT id FROM images WHERE url = ?")
            .bind(url)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match AppError::from(e) {
                AppError::NotFound(_) => AppError::NotFound(format!("No image registered for {}", url)),
                other => other,
            })?;

        Ok(id)
    }

    // Upsert keyed by (post_id, image_id): re-attaching overwrites the
    // position instead of duplicating the row.
    async fn attach_image(&self, post_id: i64, image_id: i64, position: i64) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO post_images (post_id, image_id, position)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(post_id)
        .bind(image_id)
        .bind(position)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
