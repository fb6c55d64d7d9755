//! Mural board routes.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use domain::models::mural::{
    normalize_mural_message, MuralBoardResponse, MuralEntry, MuralMessageRequest, OkResponse,
};
use persistence::repositories::InviteRepository;
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AppJson;

/// Leave or replace the guest's message on the mural.
///
/// PUT /api/v1/invites/:token/mural
pub async fn post_message(
    State(state): State<AppState>,
    Path(token): Path<String>,
    AppJson(request): AppJson<MuralMessageRequest>,
) -> Result<Json<OkResponse>, ApiError> {
    let message = normalize_mural_message(&request.message)?;

    let updated = InviteRepository::new(state.pool.clone())
        .set_mural_message(token.trim(), &message, Utc::now())
        .await?;

    if updated == 0 {
        return Err(ApiError::NotFound(
            "Invitation not found or revoked".to_string(),
        ));
    }

    info!(chars = message.chars().count(), "Mural message saved");

    Ok(Json(OkResponse { ok: true }))
}

/// List mural messages, newest first.
///
/// GET /api/v1/mural
pub async fn list_messages(
    State(state): State<AppState>,
) -> Result<Json<MuralBoardResponse>, ApiError> {
    let data: Vec<MuralEntry> = InviteRepository::new(state.pool.clone())
        .list_mural_messages(state.config.event.id)
        .await?
        .into_iter()
        .map(MuralEntry::from)
        .collect();

    Ok(Json(MuralBoardResponse { data }))
}
