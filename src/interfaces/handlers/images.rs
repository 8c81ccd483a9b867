use actix_multipart::Multipart;
use actix_web::{post, web, HttpResponse, Responder};
use futures_util::TryStreamExt;
use tracing::instrument;

use crate::{
    entities::image::{AttachImagesRequest, UploadedFile},
    errors::AppError,
    AppState,
};

#[instrument(skip(state, payload))]
#[post("/upload-images")]
pub async fn upload_images(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<impl Responder, AppError> {
    let files = collect_files(payload, state.max_upload_bytes).await?;
    let response = state.images.store_files(&files).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[instrument(skip(state, data))]
#[post("/attach-images")]
pub async fn attach_images(
    state: web::Data<AppState>,
    data: web::Json<AttachImagesRequest>,
) -> Result<impl Responder, AppError> {
    if data.post_slug.trim().is_empty() {
        return Err(AppError::validation("post_slug", "Post slug is required"));
    }

    state.posts.attach_images(&data.post_slug, &data.image_urls).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({"message": "Images attached"})))
}

/// Drains the multipart stream into memory, enforcing the aggregate size
/// bound across all parts. Only parts under the `images` form key count.
async fn collect_files(mut payload: Multipart, max_bytes: usize) -> Result<Vec<UploadedFile>, AppError> {
    let mut files = Vec::new();
    let mut total_bytes = 0usize;

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::validation("images", format!("Failed to parse multipart form: {}", e)))?
    {
        // Scoped so the disposition borrow ends before the chunk reads below.
        // A part with no filename keeps an empty name and is reported as a
        // per-item failure downstream rather than aborting the batch.
        let name = {
            let Some(disposition) = field.content_disposition() else {
                continue;
            };
            if disposition.get_name() != Some("images") {
                continue;
            }
            disposition.get_filename().map(str::to_string).unwrap_or_default()
        };

        let mut data = Vec::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| AppError::validation("images", format!("Failed to read upload: {}", e)))?
        {
            total_bytes += chunk.len();
            if total_bytes > max_bytes {
                return Err(AppError::validation("images", "Upload exceeds the size limit"));
            }
            data.extend_from_slice(&chunk);
        }

        files.push(UploadedFile { name, data });
    }

    Ok(files)
}
