//! Event settings routes.

use axum::{extract::State, Json};
use domain::models::event::{Event, UpdateEventRequest};
use domain::services::build_event_patch;
use persistence::repositories::EventRepository;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AppJson;

fn event_not_found() -> ApiError {
    ApiError::NotFound("Event not found".to_string())
}

/// Read the event settings.
///
/// GET /api/v1/admin/event
pub async fn get_event(State(state): State<AppState>) -> Result<Json<Event>, ApiError> {
    let event = EventRepository::new(state.pool.clone())
        .find_by_id(state.config.event.id)
        .await?
        .ok_or_else(event_not_found)?;

    Ok(Json(event.into()))
}

/// Update the event settings. Absent fields are left untouched.
///
/// PUT /api/v1/admin/event
pub async fn update_event(
    State(state): State<AppState>,
    AppJson(request): AppJson<UpdateEventRequest>,
) -> Result<Json<Event>, ApiError> {
    request.validate()?;
    let patch = build_event_patch(&request, state.config.event.timezone_offset_minutes)?;

    let repo = EventRepository::new(state.pool.clone());
    let event = if patch.is_empty() {
        repo.find_by_id(state.config.event.id).await?
    } else {
        repo.update(state.config.event.id, &patch).await?
    }
    .ok_or_else(event_not_found)?;

    info!(event_id = %event.id, "Event settings updated");

    Ok(Json(event.into()))
}
