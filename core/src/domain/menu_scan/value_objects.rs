use std::{fmt, str::FromStr};

use base64::{Engine as _, engine::general_purpose};
use bytes::Bytes;

use crate::domain::health_profile::entities::HealthProfile;

/// Hard ceiling on uploaded menu images
pub const MAX_IMAGE_BYTES: usize = 20 * 1024 * 1024; // 20 MiB

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageMimeType {
    Jpeg,
    Png,
    Webp,
}

impl ImageMimeType {
    pub const SUPPORTED: [ImageMimeType; 3] =
        [ImageMimeType::Jpeg, ImageMimeType::Png, ImageMimeType::Webp];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageMimeType::Jpeg => "image/jpeg",
            ImageMimeType::Png => "image/png",
            ImageMimeType::Webp => "image/webp",
        }
    }
}

impl fmt::Display for ImageMimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageMimeType {
    type Err = ();

    /// Case-insensitive; parameters after `;` are ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let essence = s.split(';').next().unwrap_or_default().trim();

        match essence.to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Ok(ImageMimeType::Jpeg),
            "image/png" => Ok(ImageMimeType::Png),
            "image/webp" => Ok(ImageMimeType::Webp),
            _ => Err(()),
        }
    }
}

/// Input of a scan as received from the HTTP boundary
#[derive(Debug, Clone)]
pub struct ScanMenuInput {
    pub image_data: Bytes,
    pub mime_type: String,
}

/// A validated scan, alive for the duration of one request
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub image_data: Bytes,
    pub mime_type: ImageMimeType,
    pub profile: HealthProfile,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImagePayload {
    pub mime_type: ImageMimeType,
    pub data_base64: String,
}

impl ImagePayload {
    pub fn encode(image_data: &[u8], mime_type: ImageMimeType) -> Self {
        Self {
            mime_type,
            data_base64: general_purpose::STANDARD.encode(image_data),
        }
    }

    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data_base64)
    }
}

/// Everything the vision model needs for one analysis
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequest {
    pub instruction_version: &'static str,
    pub system_instruction: &'static str,
    pub patient_context: String,
    pub image: ImagePayload,
    pub response_schema: serde_json::Value,
}
