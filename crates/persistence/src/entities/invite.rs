//! Invite entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::invite::{InviteContext, ViewTracking};
use domain::models::mural::MuralEntry;
use sqlx::FromRow;
use uuid::Uuid;

use super::event::EventEntity;
use super::guest::GuestEntity;
use super::rsvp::{JoinedRsvp, RsvpStatusDb};

/// Database row mapping for the invites table.
#[derive(Debug, Clone, FromRow)]
pub struct InviteEntity {
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

impl From<InviteEntity> for domain::models::Invite {
    fn from(entity: InviteEntity) -> Self {
        Self {
            id: entity.id,
            event_id: entity.event_id,
            guest_id: entity.guest_id,
            short_code: entity.short_code,
            first_viewed_at: entity.first_viewed_at,
            last_viewed_at: entity.last_viewed_at,
            view_count: entity.view_count,
            mural_message: entity.mural_message,
            mural_message_created_at: entity.mural_message_created_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// View tracking columns returned after recording a view.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct ViewTrackingEntity {
    pub first_viewed_at: Option<DateTime<Utc>>,
    pub last_viewed_at: Option<DateTime<Utc>>,
    pub view_count: i32,
}

impl From<ViewTrackingEntity> for ViewTracking {
    fn from(entity: ViewTrackingEntity) -> Self {
        Self {
            first_viewed_at: entity.first_viewed_at,
            last_viewed_at: entity.last_viewed_at,
            view_count: entity.view_count,
        }
    }
}

/// Mural message with the author's name.
#[derive(Debug, Clone, FromRow)]
pub struct MuralEntryEntity {
    pub id: Uuid,
    pub guest_name: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<MuralEntryEntity> for MuralEntry {
    fn from(entity: MuralEntryEntity) -> Self {
        Self {
            id: entity.id,
            guest_name: entity.guest_name,
            message: entity.message,
            created_at: entity.created_at,
        }
    }
}

/// Invite joined with its guest, event and answer.
#[derive(Debug, Clone, FromRow)]
pub struct InviteContextEntity {
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
    // Guest info
    pub guest_full_name: String,
    pub guest_phone: String,
    pub guest_email: Option<String>,
    pub guest_max_companions: i32,
    pub guest_created_at: DateTime<Utc>,
    pub guest_updated_at: DateTime<Utc>,
    // Event info
    pub event_slug: String,
    pub event_name: String,
    pub event_subtitle: Option<String>,
    pub event_custom_date_label: Option<String>,
    pub event_starts_at: DateTime<Utc>,
    pub event_venue: Option<String>,
    pub event_rsvp_deadline: Option<DateTime<Utc>>,
    pub event_notes: Option<String>,
    pub event_video_url: Option<String>,
    pub event_fallback_image_url: Option<String>,
    pub event_character_image_url: Option<String>,
    pub event_favicon_url: Option<String>,
    pub event_created_at: DateTime<Utc>,
    pub event_updated_at: DateTime<Utc>,
    // Rsvp info
    pub rsvp_id: Option<Uuid>,
    pub rsvp_status: Option<RsvpStatusDb>,
    pub rsvp_companions: Option<i32>,
    pub rsvp_responded_at: Option<DateTime<Utc>>,
    pub rsvp_created_at: Option<DateTime<Utc>>,
    pub rsvp_updated_at: Option<DateTime<Utc>>,
}

impl From<InviteContextEntity> for InviteContext {
    fn from(entity: InviteContextEntity) -> Self {
        let rsvp = JoinedRsvp {
            id: entity.rsvp_id,
            invite_id: entity.id,
            status: entity.rsvp_status,
            companions: entity.rsvp_companions,
            responded_at: entity.rsvp_responded_at,
            created_at: entity.rsvp_created_at,
            updated_at: entity.rsvp_updated_at,
        }
        .into_rsvp();

        let guest = GuestEntity {
            id: entity.guest_id,
            event_id: entity.event_id,
            full_name: entity.guest_full_name,
            phone: entity.guest_phone,
            email: entity.guest_email,
            max_companions: entity.guest_max_companions,
            created_at: entity.guest_created_at,
            updated_at: entity.guest_updated_at,
        };

        let event = EventEntity {
            id: entity.event_id,
            slug: entity.event_slug,
            name: entity.event_name,
            subtitle: entity.event_subtitle,
            custom_date_label: entity.event_custom_date_label,
            starts_at: entity.event_starts_at,
            venue: entity.event_venue,
            rsvp_deadline: entity.event_rsvp_deadline,
            notes: entity.event_notes,
            video_url: entity.event_video_url,
            fallback_image_url: entity.event_fallback_image_url,
            character_image_url: entity.event_character_image_url,
            favicon_url: entity.event_favicon_url,
            created_at: entity.event_created_at,
            updated_at: entity.event_updated_at,
        };

        let invite = InviteEntity {
            id: entity.id,
            event_id: entity.event_id,
            guest_id: entity.guest_id,
            short_code: entity.short_code,
            first_viewed_at: entity.first_viewed_at,
            last_viewed_at: entity.last_viewed_at,
            view_count: entity.view_count,
            mural_message: entity.mural_message,
            mural_message_created_at: entity.mural_message_created_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        };

        Self {
            invite: invite.into(),
            guest: guest.into(),
            event: event.into(),
            rsvp,
        }
    }
}
