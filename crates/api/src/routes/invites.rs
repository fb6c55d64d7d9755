//! Guest-facing invite routes: resolving a token and answering it.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use domain::models::invite::{InviteContext, InvitePreview, ViewTracking};
use domain::models::rsvp::{SubmitRsvpRequest, SubmitRsvpResponse};
use domain::services::decide_rsvp;
use persistence::repositories::{InviteRepository, RsvpRepository};
use sqlx::PgPool;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AppJson;
use crate::middleware::metrics::{record_invite_view, record_rsvp_submission};

/// Loads the invite behind a token with its guest, event and answer.
pub(crate) async fn load_invite_context(
    pool: &PgPool,
    token: &str,
) -> Result<InviteContext, ApiError> {
    InviteRepository::new(pool.clone())
        .find_context_by_code(token.trim())
        .await?
        .map(InviteContext::from)
        .ok_or_else(|| ApiError::NotFound("Invitation not found or revoked".to_string()))
}

/// Resolve an invite token.
///
/// GET /api/v1/invites/:token
///
/// Every call counts as a view, refreshes included.
pub async fn resolve_invite(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<InvitePreview>, ApiError> {
    let context = load_invite_context(&state.pool, &token).await?;

    let now = Utc::now();
    let tracking: ViewTracking = InviteRepository::new(state.pool.clone())
        .record_view(context.invite.id, now)
        .await?
        .into();
    record_invite_view();

    info!(
        invite_id = %context.invite.id,
        guest_id = %context.guest.id,
        "Invite viewed"
    );

    Ok(Json(InvitePreview::build(
        context,
        tracking,
        now,
        state.config.event.timezone_offset_minutes,
    )))
}

/// Answer an invite.
///
/// PUT /api/v1/invites/:token/rsvp
///
/// Rejected after the deadline, and when a confirmation brings more
/// companions than the guest is allowed. Repeating an answer overwrites it.
pub async fn submit_rsvp(
    State(state): State<AppState>,
    Path(token): Path<String>,
    AppJson(request): AppJson<SubmitRsvpRequest>,
) -> Result<Json<SubmitRsvpResponse>, ApiError> {
    request.validate()?;

    let context = load_invite_context(&state.pool, &token).await?;

    let now = Utc::now();
    let write = decide_rsvp(
        &request,
        context.guest.max_companions,
        context.event.rsvp_deadline,
        now,
    )
    .map_err(|e| {
        info!(invite_id = %context.invite.id, reason = %e, "RSVP refused");
        e
    })?;

    let rsvp = RsvpRepository::new(state.pool.clone())
        .upsert(context.invite.id, write.status.into(), write.companions, now)
        .await?;
    record_rsvp_submission(write.status);

    info!(
        invite_id = %context.invite.id,
        status = %write.status,
        companions = write.companions,
        "RSVP stored"
    );

    Ok(Json(SubmitRsvpResponse {
        ok: true,
        rsvp: rsvp.into(),
    }))
}
