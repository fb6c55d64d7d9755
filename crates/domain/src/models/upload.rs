//! Character image upload models.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

/// Default size limit for uploaded images (2 MiB).
pub const MAX_CHARACTER_IMAGE_BYTES: usize = 2 * 1024 * 1024;

/// Request payload carrying the image as a base64 data URL.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CharacterUploadRequest {
    #[validate(length(min = 1, max = 180, message = "fileName must be 1-180 characters"))]
    pub file_name: String,

    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
}

/// Response after storing an image.
#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

/// Image types accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
    Webp,
    Gif,
}

impl ImageKind {
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "image/png" => Some(ImageKind::Png),
            "image/jpeg" => Some(ImageKind::Jpeg),
            "image/webp" => Some(ImageKind::Webp),
            "image/gif" => Some(ImageKind::Gif),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageKind::Png => "png",
            ImageKind::Jpeg => "jpg",
            ImageKind::Webp => "webp",
            ImageKind::Gif => "gif",
        }
    }
}

/// Errors for a rejected upload.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("Invalid file format, expected a base64 data URL")]
    InvalidDataUrl,

    #[error("Unsupported image type, use PNG, JPG, WEBP or GIF")]
    UnsupportedType,

    #[error("Image must be at most {max_bytes} bytes")]
    TooLarge { max_bytes: usize },
}

/// A validated image ready to be written to storage.
#[derive(Debug, Clone)]
pub struct PreparedUpload {
    pub file_name: String,
    pub kind: ImageKind,
    pub bytes: Vec<u8>,
}

impl PreparedUpload {
    /// Public URL under which the stored file is served.
    pub fn public_url(&self) -> String {
        format!("/uploads/{}", self.file_name)
    }
}
