use std::str::FromStr;

use chrono::{DateTime, Utc};
use validator::Validate;

use crate::{
    entities::post::{DisplayPost, NewPostRequest, Post, PostCreatedResponse, PostStatus},
    errors::AppError,
    repositories::{image::ImageRepository, post::PostRepository},
};

pub struct PostLifecycle<P, I>
where
    P: PostRepository,
    I: ImageRepository,
{
    pub post_repo: P,
    pub image_repo: I,
}

impl<P, I> PostLifecycle<P, I>
where
    P: PostRepository,
    I: ImageRepository,
{
    pub fn new(post_repo: P, image_repo: I) -> Self {
        PostLifecycle { post_repo, image_repo }
    }

    /// Creates a draft post. An absent or zero display time defaults to the
    /// current UTC instant; a duplicate slug surfaces as a Conflict.
    pub async fn create_post(&self, request: NewPostRequest) -> Result<PostCreatedResponse, AppError> {
        request.validate()?;

        let display_time = match request.display_time {
            Some(t) if t != DateTime::<Utc>::UNIX_EPOCH => t,
            _ => Utc::now(),
        };

        let slug = self.post_repo.create_post(&request.title, display_time).await?;

        tracing::info!(%slug, "created post");
        Ok(PostCreatedResponse { slug })
    }

    pub async fn get_post(&self, slug: &str) -> Result<Post, AppError> {
        self.post_repo.get_post(slug).await.map_err(not_found_context)
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>, AppError> {
        self.post_repo.list_posts().await
    }

    pub async fn list_published(&self) -> Result<Vec<DisplayPost>, AppError> {
        self.post_repo.list_published().await
    }

    /// Enum membership is checked before the store is touched; an invalid
    /// status performs no write.
    pub async fn update_status(&self, slug: &str, status: &str) -> Result<(), AppError> {
        let status = PostStatus::from_str(status)
            .map_err(|_| AppError::validation("status", "Status must be 'draft' or 'published'"))?;

        self.post_repo
            .update_status(slug, status)
            .await
            .map_err(not_found_context)
    }

    pub async fn update_display_time(&self, slug: &str, display_time: DateTime<Utc>) -> Result<(), AppError> {
        if display_time == DateTime::<Utc>::UNIX_EPOCH {
            return Err(AppError::validation("display_time", "Display time cannot be the zero value"));
        }

        self.post_repo
            .update_display_time(slug, display_time)
            .await
            .map_err(not_found_context)
    }

    pub async fn delete_post(&self, slug: &str) -> Result<(), AppError> {
        self.post_repo.delete_post(slug).await.map_err(not_found_context)
    }

    /// Attaches images to a post in request order: each URL's index in the
    /// input sequence is its authoritative position. Items are attached
    /// independently; successes commit even when other items fail, and the
    /// collected per-item messages are returned as a PartialFailure.
    pub async fn attach_images(&self, slug: &str, image_urls: &[String]) -> Result<(), AppError> {
        if image_urls.is_empty() {
            return Err(AppError::validation("image_urls", "At least one image URL is required"));
        }

        let post = self.post_repo.get_post(slug).await.map_err(not_found_context)?;

        let mut failures = Vec::new();
        for (position, url) in image_urls.iter().enumerate() {
            let image_id = match self.image_repo.get_image_by_url(url).await {
                Ok(id) => id,
                Err(e) => {
                    tracing::warn!(%url, error = %e, "failed to resolve image");
                    failures.push(format!("{}: {}", url, e));
                    continue;
                }
            };

            if let Err(e) = self.image_repo.attach_image(post.id, image_id, position as i64).await {
                tracing::warn!(%url, post_id = post.id, error = %e, "failed to attach image");
                failures.push(format!("{}: {}", url, e));
            }
        }

        if !failures.is_empty() {
            return Err(AppError::PartialFailure(failures));
        }

        Ok(())
    }
}

fn not_found_context(e: AppError) -> AppError {
    match e {
        AppError::NotFound(_) => AppError::NotFound("Post not found".to_string()),
        _ => e,
    }
}
