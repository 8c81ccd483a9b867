use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::{
    entities::image::{UploadResponse, UploadedFile},
    errors::AppError,
    repositories::image::ImageRepository,
};

pub struct ImageIngestor<R>
where
    R: ImageRepository,
{
    pub image_repo: R,
    uploads_root: PathBuf,
}

impl<R> ImageIngestor<R>
where
    R: ImageRepository,
{
    pub fn new(image_repo: R, uploads_root: impl Into<PathBuf>) -> Self {
        ImageIngestor {
            image_repo,
            uploads_root: uploads_root.into(),
        }
    }

    /// Persists each file under `<root>/<year>/<month>/` with the upload
    /// time-of-day appended to its base name, then registers the public URL
    /// as an Image row. A file whose registration fails is removed again.
    /// The batch fails only when no file succeeds; otherwise the successful
    /// URLs are returned.
    pub async fn store_files(&self, files: &[UploadedFile]) -> Result<UploadResponse, AppError> {
        if files.is_empty() {
            return Err(AppError::validation("images", "No files uploaded"));
        }

        let uploaded_at = Utc::now();
        let subdir = self.uploads_root.join(uploaded_at.format("%Y/%m").to_string());
        tokio::fs::create_dir_all(&subdir)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to create upload directory: {}", e)))?;

        let mut image_urls = Vec::new();
        let mut failures = Vec::new();

        for file in files {
            match self.store_one(file, &subdir, uploaded_at).await {
                Ok(url) => {
                    tracing::info!(%url, "uploaded image");
                    image_urls.push(url);
                }
                Err(e) => {
                    tracing::warn!(name = %file.name, error = %e, "failed to store upload");
                    failures.push(format!("{}: {}", file.name, e));
                }
            }
        }

        if image_urls.is_empty() {
            return Err(AppError::PartialFailure(failures));
        }

        Ok(UploadResponse { image_urls })
    }

    async fn store_one(
        &self,
        file: &UploadedFile,
        subdir: &Path,
        uploaded_at: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let base = Path::new(&file.name);
        let stem = base
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::validation("images", "File name is empty"))?;
        let ext = base
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default();

        let unique_name = format!("{}-{}{}", stem, uploaded_at.format("%H%M%S"), ext);
        let path = subdir.join(&unique_name);

        tokio::fs::write(&path, &file.data)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to write file: {}", e)))?;

        // Served path is relative to the site root, not the physical root.
        let url = format!("/uploads/{}/{}", uploaded_at.format("%Y/%m"), unique_name);

        match self.image_repo.create_image(&url).await {
            Ok(_) => Ok(url),
            Err(e) => {
                // Compensating release: no orphaned file without a row.
                if let Err(rm_err) = tokio::fs::remove_file(&path).await {
                    tracing::warn!(path = %path.display(), error = %rm_err, "failed to remove unregistered file");
                }
                Err(e)
            }
        }
    }
}
