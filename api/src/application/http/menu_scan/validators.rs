use axum::{
    extract::{Multipart, multipart::MultipartError},
    http::StatusCode,
};
use bytes::Bytes;
use platewise_core::domain::menu_scan::value_objects::MAX_IMAGE_BYTES;

use crate::application::http::server::api_entities::api_error::ApiError;

pub const IMAGE_FIELD: &str = "image";

/// Room for the multipart framing around a maximum-size image.
pub const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub data: Bytes,
    pub mime_type: String,
}

fn guess_mime_from_file_name(file_name: &str) -> Option<&'static str> {
    let (_, extension) = file_name.rsplit_once('.')?;
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

fn map_multipart_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::InvalidImage(format!(
            "Image too large. Max size is {} bytes",
            MAX_IMAGE_BYTES
        ))
    } else {
        ApiError::BadRequest(format!("Failed to read multipart body: {}", e.body_text()))
    }
}

/// Pull the `image` part out of the form. Other fields are ignored.
pub async fn read_image_upload(mut multipart: Multipart) -> Result<ImageUpload, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(map_multipart_error)? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let mime_type = field
            .content_type()
            .map(str::to_string)
            .filter(|mime| mime != "application/octet-stream")
            .or_else(|| {
                field
                    .file_name()
                    .and_then(guess_mime_from_file_name)
                    .map(str::to_string)
            })
            .unwrap_or_default();

        let data = field.bytes().await.map_err(map_multipart_error)?;

        return Ok(ImageUpload { data, mime_type });
    }

    Err(ApiError::MissingImage)
}
