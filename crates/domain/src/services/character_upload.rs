//! Character image upload validation.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::models::upload::{CharacterUploadRequest, ImageKind, PreparedUpload, UploadError};

/// Fallback file stem when nothing usable is left after sanitizing.
pub const DEFAULT_FILE_STEM: &str = "personagem";

const MAX_STEM_CHARS: usize = 40;

lazy_static::lazy_static! {
    static ref DATA_URL_REGEX: regex::Regex =
        regex::Regex::new(r"^data:(.+);base64,(.+)$").unwrap();
}

/// Splits a `data:<mime>;base64,<payload>` URL and decodes the payload.
pub fn parse_data_url(content: &str) -> Result<(String, Vec<u8>), UploadError> {
    let captures = DATA_URL_REGEX
        .captures(content.trim())
        .ok_or(UploadError::InvalidDataUrl)?;

    let mime = captures[1].to_string();
    let bytes = STANDARD
        .decode(captures[2].trim())
        .map_err(|_| UploadError::InvalidDataUrl)?;

    Ok((mime, bytes))
}

/// Reduces a client file name to a safe, lower-case stem.
///
/// ```
/// use domain::services::sanitize_file_stem;
///
/// assert_eq!(sanitize_file_stem("C:\\fotos\\Meu Mascote.PNG"), "meu-mascote");
/// assert_eq!(sanitize_file_stem("fotos/"), "personagem");
/// ```
pub fn sanitize_file_stem(file_name: &str) -> String {
    let base = file_name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(file_name);

    let stem = match base.rfind('.') {
        Some(0) | None => base,
        Some(dot) => &base[..dot],
    };

    let cleaned: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .take(MAX_STEM_CHARS)
        .collect();

    if cleaned.is_empty() {
        DEFAULT_FILE_STEM.to_string()
    } else {
        cleaned
    }
}

/// Validates an upload and chooses its stored file name.
pub fn prepare_character_upload(
    request: &CharacterUploadRequest,
    max_bytes: usize,
) -> Result<PreparedUpload, UploadError> {
    let (mime, bytes) = parse_data_url(&request.content)?;

    let kind = ImageKind::from_mime(&mime).ok_or(UploadError::UnsupportedType)?;

    if bytes.len() > max_bytes {
        return Err(UploadError::TooLarge { max_bytes });
    }

    let file_name = format!(
        "{}-{}.{}",
        sanitize_file_stem(&request.file_name),
        shared::crypto::random_hex(6),
        kind.extension()
    );

    Ok(PreparedUpload {
        file_name,
        kind,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::upload::MAX_CHARACTER_IMAGE_BYTES;

    fn request(file_name: &str, content: &str) -> CharacterUploadRequest {
        CharacterUploadRequest {
            file_name: file_name.to_string(),
            content: content.to_string(),
        }
    }

    fn data_url(mime: &str, bytes: &[u8]) -> String {
        format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
    }

    #[test]
    fn test_parse_data_url() {
        let (mime, bytes) = parse_data_url(&data_url("image/png", b"\x89PNG")).unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(bytes, b"\x89PNG");
    }

    #[test]
    fn test_parse_data_url_rejects_plain_text() {
        assert_eq!(
            parse_data_url("iVBORw0KGgo=").unwrap_err(),
            UploadError::InvalidDataUrl
        );
        assert_eq!(
            parse_data_url("data:image/png;base64,@@@").unwrap_err(),
            UploadError::InvalidDataUrl
        );
    }

    #[test]
    fn test_sanitize_file_stem() {
        assert_eq!(sanitize_file_stem("Mascote Feliz.png"), "mascote-feliz");
        assert_eq!(sanitize_file_stem("uploads/boneco_v2.final.jpeg"), "boneco_v2-final");
        assert_eq!(sanitize_file_stem("ação.gif"), "a--o");
        assert_eq!(sanitize_file_stem(""), DEFAULT_FILE_STEM);
        assert_eq!(sanitize_file_stem(&format!("{}.png", "a".repeat(60))).len(), 40);
    }

    #[test]
    fn test_prepare_upload_names_file() {
        let upload = prepare_character_upload(
            &request("Mascote.png", &data_url("image/jpeg", b"jpeg")),
            MAX_CHARACTER_IMAGE_BYTES,
        )
        .unwrap();

        assert_eq!(upload.kind, ImageKind::Jpeg);
        assert!(upload.file_name.starts_with("mascote-"));
        assert!(upload.file_name.ends_with(".jpg"));
        assert_eq!(upload.file_name.len(), "mascote-".len() + 12 + ".jpg".len());
        assert_eq!(upload.bytes, b"jpeg");
    }

    #[test]
    fn test_prepare_upload_rejects_unsupported_type() {
        let result = prepare_character_upload(
            &request("icon.svg", &data_url("image/svg+xml", b"<svg/>")),
            MAX_CHARACTER_IMAGE_BYTES,
        );
        assert_eq!(result.unwrap_err(), UploadError::UnsupportedType);
    }

    #[test]
    fn test_prepare_upload_enforces_size() {
        let result =
            prepare_character_upload(&request("big.png", &data_url("image/png", &[0u8; 11])), 10);
        assert_eq!(result.unwrap_err(), UploadError::TooLarge { max_bytes: 10 });

        assert!(
            prepare_character_upload(&request("ok.png", &data_url("image/png", &[0u8; 10])), 10)
                .is_ok()
        );
    }
}
