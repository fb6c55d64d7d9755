//! CSV guest import routes.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
    Json,
};
use domain::models::guest_import::{
    CsvImportError, GuestImportSummary, TEMPLATE_CSV, TEMPLATE_FILE_NAME,
};
use domain::services::parse_guest_csv;
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_guests_imported;
use crate::services::import_rows;

/// Reads the `file` field of a multipart upload.
async fn read_file_field(multipart: &mut Multipart) -> Result<Vec<u8>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(format!("Invalid upload: {}", e)))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::validation(format!("Invalid upload: {}", e)))?;
            return Ok(bytes.to_vec());
        }
    }

    Err(CsvImportError::MissingFile.into())
}

/// Import guests from a CSV file.
///
/// POST /api/v1/admin/guests/import
///
/// Rows are handled one by one; a bad row never aborts the others.
pub async fn import_guests(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<GuestImportSummary>, ApiError> {
    let bytes = read_file_field(&mut multipart).await?;
    let content = String::from_utf8(bytes).map_err(|_| CsvImportError::InvalidEncoding)?;
    let parsed = parse_guest_csv(&content)?;

    let summary = import_rows(&state.pool, state.config.event.id, parsed).await;

    record_guests_imported(summary.imported);

    info!(
        imported = summary.imported,
        duplicates = summary.duplicates,
        invalid = summary.invalid,
        "Guest import finished"
    );

    Ok(Json(summary))
}

/// Download the import template.
///
/// GET /api/v1/admin/guests/template
pub async fn download_template() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", TEMPLATE_FILE_NAME),
            ),
        ],
        TEMPLATE_CSV,
    )
}
