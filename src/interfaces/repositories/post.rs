use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

use crate::{
    domain::slug::to_slug,
    entities::post::{DisplayPost, Post, PostStatus},
    errors::AppError,
    repositories::sqlx_repo::SqlxPostRepo,
};

#[async_trait]
pub trait PostRepository: Sync + Send {
    async fn create_post(&self, title: &str, display_time: DateTime<Utc>) -> Result<String, AppError>;
    async fn get_post(&self, slug: &str) -> Result<Post, AppError>;
    async fn list_posts(&self) -> Result<Vec<Post>, AppError>;
    async fn list_published(&self) -> Result<Vec<DisplayPost>, AppError>;
    async fn update_status(&self, slug: &str, status: PostStatus) -> Result<(), AppError>;
    async fn update_display_time(&self, slug: &str, display_time: DateTime<Utc>) -> Result<(), AppError>;
    async fn delete_post(&self, slug: &str) -> Result<(), AppError>;
}

impl SqlxPostRepo {
    pub fn new(pool: SqlitePool) -> Self {
        SqlxPostRepo { pool }
    }
}

#[async_trait]
impl PostRepository for SqlxPostRepo {
    async fn create_post(&self, title: &str, display_time: DateTime<Utc>) -> Result<String, AppError> {
        if title.trim().is_empty() {
            return Err(AppError::validation("title", "Title is required"));
        }
        if display_time == DateTime::<Utc>::UNIX_EPOCH {
            return Err(AppError::validation("display_time", "Display time cannot be the zero value"));
        }

        let slug = to_slug(title);

        sqlx::query(
            r#"
            INSERT INTO posts (title, slug, status, created_at, display_time)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(title)
        .bind(&slug)
        .bind(PostStatus::Draft)
        .bind(Utc::now())
        .bind(display_time)
        .execute(&self.pool)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::Conflict(_) => AppError::Conflict("Slug already exists".into()),
            other => other,
        })?;

        Ok(slug)
    }

    async fn get_post(&self, slug: &str) -> Result<Post, AppError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, slug, status, created_at, display_time
            FROM posts
            WHERE slug = ?
            "#,
        )
        .bind(slug)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, AppError> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, slug, status, created_at, display_time
            FROM posts
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn list_published(&self) -> Result<Vec<DisplayPost>, AppError> {
        // One ordered join, folded per post. A published post with no
        // attachments still produces a row (NULL url) and an empty photo list.
        let rows = sqlx::query(
            r#"
            SELECT p.title, p.slug, p.display_time, i.url
            FROM posts p
            LEFT JOIN post_images pi ON pi.post_id = p.id
            LEFT JOIN images i ON i.id = pi.image_id
            WHERE p.status = 'published'
            ORDER BY p.display_time DESC, p.id, pi.position ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut posts: Vec<DisplayPost> = Vec::new();
        for row in rows {
            let slug: String = row.try_get("slug").map_err(AppError::from)?;
            let url: Option<String> = row.try_get("url").map_err(AppError::from)?;

            if posts.last().map(|p| p.slug.as_str()) != Some(slug.as_str()) {
                posts.push(DisplayPost {
                    title: row.try_get("title").map_err(AppError::from)?,
                    slug,
                    photos: Vec::new(),
                    display_time: row.try_get("display_time").map_err(AppError::from)?,
                });
            }
            if let Some(url) = url {
                if let Some(post) = posts.last_mut() {
                    post.photos.push(url);
                }
            }
        }

        Ok(posts)
    }

    async fn update_status(&self, slug: &str, status: PostStatus) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE posts SET status = ? WHERE slug = ?")
            .bind(status)
            .bind(slug)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Post not found".into()));
        }

        Ok(())
    }

    async fn update_display_time(&self, slug: &str, display_time: DateTime<Utc>) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE posts SET display_time = ? WHERE slug = ?")
            .bind(display_time)
            .bind(slug)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Post not found".into()));
        }

        Ok(())
    }

    async fn delete_post(&self, slug: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM posts WHERE slug = ?")
            .bind(slug)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Post not found".into()));
        }

        Ok(())
    }
}
