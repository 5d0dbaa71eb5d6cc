use crate::domain::{
    common::entities::app_errors::CoreError,
    menu_scan::value_objects::{ImageMimeType, MAX_IMAGE_BYTES},
};

/// Check an uploaded image before any network call is made.
pub fn validate_image(image_data: &[u8], mime_type: &str) -> Result<ImageMimeType, CoreError> {
    if image_data.is_empty() {
        return Err(CoreError::InvalidInput("Image cannot be empty".to_string()));
    }

    if image_data.len() > MAX_IMAGE_BYTES {
        return Err(CoreError::InvalidInput(format!(
            "Image too large. Max size is {} bytes",
            MAX_IMAGE_BYTES
        )));
    }

    mime_type.parse::<ImageMimeType>().map_err(|_| {
        CoreError::InvalidInput(format!(
            "Unsupported image type '{}'. Use JPEG, PNG or WebP",
            mime_type
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_supported_types() {
        let data = vec![0xFF, 0xD8, 0xFF];
        assert_eq!(validate_image(&data, "image/jpeg"), Ok(ImageMimeType::Jpeg));
        assert_eq!(validate_image(&data, "image/png"), Ok(ImageMimeType::Png));
        assert_eq!(validate_image(&data, "image/webp"), Ok(ImageMimeType::Webp));
        assert_eq!(validate_image(&data, "IMAGE/JPG"), Ok(ImageMimeType::Jpeg));
        assert_eq!(
            validate_image(&data, "image/png; charset=binary"),
            Ok(ImageMimeType::Png)
        );
    }

    #[test]
    fn test_rejects_empty_image() {
        assert!(matches!(
            validate_image(&[], "image/jpeg"),
            Err(CoreError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_rejects_oversized_image_for_every_type() {
        let data = vec![0u8; MAX_IMAGE_BYTES + 1];
        for mime_type in ["image/jpeg", "image/png", "image/webp", "application/pdf"] {
            assert!(matches!(
                validate_image(&data, mime_type),
                Err(CoreError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_exact_ceiling_is_allowed() {
        let data = vec![0u8; MAX_IMAGE_BYTES];
        assert!(validate_image(&data, "image/png").is_ok());
    }

    #[test]
    fn test_rejects_unsupported_types() {
        let data = vec![1u8; 1024];
        for mime_type in ["image/gif", "image/heic", "application/octet-stream", "text/plain", ""] {
            assert!(matches!(
                validate_image(&data, mime_type),
                Err(CoreError::InvalidInput(_))
            ));
        }
    }
}
