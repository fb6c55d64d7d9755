//! Invite domain models.
//!
//! Each guest owns exactly one invite. The invite's short code is the
//! opaque token carried in the personalized link.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::event::Event;
use super::guest::Guest;
use super::rsvp::{Rsvp, RsvpStatus};

/// Number of random bytes behind a short code (20 hex characters).
pub const SHORT_CODE_BYTES: usize = 10;

/// Generates a new invite short code.
pub fn generate_short_code() -> String {
    shared::crypto::random_hex(SHORT_CODE_BYTES)
}

/// Represents an invite in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invite {
    pub id: Uuid,
    pub event_id: Uuid,
    pub guest_id: Uuid,
    pub short_code: String,
    pub first_viewed_at: Option<DateTime<Utc>>,
    pub last_viewed_at: Option<DateTime<Utc>>,
    pub view_count: i32,
    pub mural_message: Option<String>,
    pub mural_message_created_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// View tracking values after a view was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewTracking {
    pub first_viewed_at: Option<DateTime<Utc>>,
    pub last_viewed_at: Option<DateTime<Utc>>,
    pub view_count: i32,
}

/// Everything the resolver loads for a short code.
#[derive(Debug, Clone)]
pub struct InviteContext {
    pub invite: Invite,
    pub guest: Guest,
    pub event: Event,
    pub rsvp: Option<Rsvp>,
}

/// Invitation read model returned to the guest.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitePreview {
    pub token: String,
    pub guest_name: String,
    pub max_companions: i32,
    pub event_name: String,
    pub event_subtitle: Option<String>,
    pub event_date_label: String,
    pub event_starts_at: DateTime<Utc>,
    pub event_venue: Option<String>,
    pub event_notes: Option<String>,
    pub video_url: Option<String>,
    pub fallback_image_url: Option<String>,
    pub character_image_url: Option<String>,
    pub favicon_url: Option<String>,
    pub latest_status: Option<RsvpStatus>,
    pub latest_companions: Option<i32>,
    pub mural_message: Option<String>,
    pub mural_message_created_at: Option<DateTime<Utc>>,
    pub deadline_passed: bool,
    pub deadline_label: String,
    pub deadline_at: Option<DateTime<Utc>>,
    pub first_viewed_at: Option<DateTime<Utc>>,
    pub last_viewed_at: Option<DateTime<Utc>>,
    pub view_count: i32,
}

impl InvitePreview {
    /// Builds the read model from the loaded context and the recorded view.
    pub fn build(
        context: InviteContext,
        tracking: ViewTracking,
        now: DateTime<Utc>,
        offset_minutes: i32,
    ) -> Self {
        let InviteContext {
            invite,
            guest,
            event,
            rsvp,
        } = context;

        Self {
            token: invite.short_code,
            guest_name: guest.full_name,
            max_companions: guest.max_companions,
            event_date_label: event.date_label(offset_minutes),
            deadline_label: event.deadline_label(offset_minutes),
            deadline_passed: event.deadline_passed(now),
            deadline_at: event.rsvp_deadline,
            event_name: event.name,
            event_subtitle: event.subtitle,
            event_starts_at: event.starts_at,
            event_venue: event.venue,
            event_notes: event.notes,
            video_url: event.video_url,
            fallback_image_url: event.fallback_image_url,
            character_image_url: event.character_image_url,
            favicon_url: event.favicon_url,
            latest_status: rsvp.as_ref().map(|r| r.status),
            latest_companions: rsvp.as_ref().map(|r| r.companions),
            mural_message: invite.mural_message,
            mural_message_created_at: invite.mural_message_created_at,
            first_viewed_at: tracking.first_viewed_at,
            last_viewed_at: tracking.last_viewed_at,
            view_count: tracking.view_count,
        }
    }
}
