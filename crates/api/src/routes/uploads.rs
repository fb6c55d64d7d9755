//! Character image upload route.

use axum::{extract::State, http::StatusCode, Json};
use domain::models::upload::{CharacterUploadRequest, UploadResponse};
use domain::services::prepare_character_upload;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AppJson;

/// Store a character image sent as a base64 data URL.
///
/// POST /api/v1/admin/uploads/character
///
/// The file is written under the uploads directory and served from
/// `/uploads/<file>`.
pub async fn upload_character_image(
    State(state): State<AppState>,
    AppJson(request): AppJson<CharacterUploadRequest>,
) -> Result<(StatusCode, Json<UploadResponse>), ApiError> {
    request.validate()?;
    let upload = prepare_character_upload(&request, state.config.uploads.max_bytes)?;

    let dir = &state.config.uploads.dir;
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to create upload dir: {}", e)))?;
    tokio::fs::write(dir.join(&upload.file_name), &upload.bytes)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to write upload: {}", e)))?;

    info!(
        file_name = %upload.file_name,
        bytes = upload.bytes.len(),
        "Character image stored"
    );

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            url: upload.public_url(),
        }),
    ))
}
