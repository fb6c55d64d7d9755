//! Event entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the events table.
#[derive(Debug, Clone, FromRow)]
pub struct EventEntity {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub subtitle: Option<String>,
    pub custom_date_label: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub venue: Option<String>,
    pub rsvp_deadline: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub video_url: Option<String>,
    pub fallback_image_url: Option<String>,
    pub character_image_url: Option<String>,
    pub favicon_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EventEntity> for domain::models::Event {
    fn from(entity: EventEntity) -> Self {
        Self {
            id: entity.id,
            slug: entity.slug,
            name: entity.name,
            subtitle: entity.subtitle,
            custom_date_label: entity.custom_date_label,
            starts_at: entity.starts_at,
            venue: entity.venue,
            rsvp_deadline: entity.rsvp_deadline,
            notes: entity.notes,
            video_url: entity.video_url,
            fallback_image_url: entity.fallback_image_url,
            character_image_url: entity.character_image_url,
            favicon_url: entity.favicon_url,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
