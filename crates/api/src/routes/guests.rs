//! Guest roster admin routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::guest::{
    GuestRequest, GuestResponse, GuestRosterEntry, GuestWithInvite, ListGuestsResponse, NewGuest,
};
use persistence::repositories::GuestRepository;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::{is_unique_violation, ApiError};
use crate::extractors::AppJson;
use crate::services::register_guest;

fn guest_response(state: &AppState, guest: GuestWithInvite) -> GuestResponse {
    let invite_url = guest
        .short_code()
        .map(|code| state.config.event.invite_link(code));
    GuestResponse { guest, invite_url }
}

/// The guest already registered with `phone`, if any.
async fn find_by_phone(
    repo: &GuestRepository,
    phone: &str,
) -> Result<Option<GuestWithInvite>, ApiError> {
    Ok(repo
        .find_by_phone_with_invite(phone)
        .await?
        .map(GuestWithInvite::from))
}

/// List the roster.
///
/// GET /api/v1/admin/guests
pub async fn list_guests(
    State(state): State<AppState>,
) -> Result<Json<ListGuestsResponse>, ApiError> {
    let data: Vec<GuestRosterEntry> = GuestRepository::new(state.pool.clone())
        .list_roster(state.config.event.id)
        .await?
        .into_iter()
        .map(GuestRosterEntry::from)
        .collect();

    Ok(Json(ListGuestsResponse {
        total: data.len(),
        data,
    }))
}

/// Create a guest and its invite.
///
/// POST /api/v1/admin/guests
pub async fn create_guest(
    State(state): State<AppState>,
    AppJson(request): AppJson<GuestRequest>,
) -> Result<(StatusCode, Json<GuestResponse>), ApiError> {
    request.validate()?;
    let new_guest: NewGuest = request.normalize();

    let guest_repo = GuestRepository::new(state.pool.clone());
    if let Some(existing) = find_by_phone(&guest_repo, &new_guest.phone).await? {
        return Err(ApiError::phone_conflict(Some(existing)));
    }

    let created = register_guest(&state.pool, state.config.event.id, &new_guest).await?;

    info!(
        guest_id = %created.guest.id,
        short_code = created.short_code().unwrap_or_default(),
        "Guest created"
    );

    Ok((StatusCode::CREATED, Json(guest_response(&state, created))))
}

/// Update a guest.
///
/// PUT /api/v1/admin/guests/:guest_id
pub async fn update_guest(
    State(state): State<AppState>,
    Path(guest_id): Path<Uuid>,
    AppJson(request): AppJson<GuestRequest>,
) -> Result<Json<GuestResponse>, ApiError> {
    request.validate()?;
    let changes = request.normalize();

    let guest_repo = GuestRepository::new(state.pool.clone());
    let current = guest_repo
        .find_by_id(guest_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Guest not found".to_string()))?;

    if changes.phone != current.phone {
        if let Some(other) = find_by_phone(&guest_repo, &changes.phone).await? {
            return Err(ApiError::phone_conflict(Some(other)));
        }
    }

    let updated: GuestWithInvite = match guest_repo.update(guest_id, &changes).await {
        Ok(Some(entity)) => entity.into(),
        Ok(None) => return Err(ApiError::NotFound("Guest not found".to_string())),
        Err(e) if is_unique_violation(&e) => {
            let other = find_by_phone(&guest_repo, &changes.phone).await?;
            return Err(ApiError::phone_conflict(other));
        }
        Err(e) => return Err(e.into()),
    };

    info!(guest_id = %guest_id, "Guest updated");

    Ok(Json(guest_response(&state, updated)))
}

/// Delete a guest with its invite and answer.
///
/// DELETE /api/v1/admin/guests/:guest_id
pub async fn delete_guest(
    State(state): State<AppState>,
    Path(guest_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deleted = GuestRepository::new(state.pool.clone())
        .delete(guest_id)
        .await?;

    if deleted == 0 {
        return Err(ApiError::NotFound("Guest not found".to_string()));
    }

    info!(guest_id = %guest_id, "Guest deleted");

    Ok(StatusCode::NO_CONTENT)
}
