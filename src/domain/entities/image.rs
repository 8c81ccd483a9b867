use serde::{Deserialize, Serialize};

/// One decoded multipart file part, already drained from the request body.
/// Decoupling ingestion from the transport keeps the write-then-register
/// sequence testable without an HTTP request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub image_urls: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AttachImagesRequest {
    pub post_slug: String,
    pub image_urls: Vec<String>,
}
