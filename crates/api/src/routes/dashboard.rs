//! Admin dashboard route.

use axum::{extract::State, Json};
use chrono::Utc;
use domain::models::dashboard::DashboardResponse;
use domain::models::guest::GuestRosterEntry;
use domain::services::{build_analytics, build_stats};
use persistence::repositories::{EventRepository, GuestRepository};

use crate::app::AppState;
use crate::error::ApiError;

/// Roster statistics and view analytics, recomputed on every call.
///
/// GET /api/v1/admin/dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let event_id = state.config.event.id;

    let event = EventRepository::new(state.pool.clone())
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    let guests: Vec<GuestRosterEntry> = GuestRepository::new(state.pool.clone())
        .list_roster(event_id)
        .await?
        .into_iter()
        .map(GuestRosterEntry::from)
        .collect();

    Ok(Json(DashboardResponse {
        stats: build_stats(&guests),
        analytics: build_analytics(&guests, Utc::now()),
        guests,
        event: event.into(),
    }))
}
