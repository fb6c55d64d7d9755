//! RSVP entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::RsvpStatus;
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for rsvp_status that maps to PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "rsvp_status", rename_all = "lowercase")]
pub enum RsvpStatusDb {
    Yes,
    No,
}

impl From<RsvpStatusDb> for RsvpStatus {
    fn from(status: RsvpStatusDb) -> Self {
        match status {
            RsvpStatusDb::Yes => RsvpStatus::Yes,
            RsvpStatusDb::No => RsvpStatus::No,
        }
    }
}

impl From<RsvpStatus> for RsvpStatusDb {
    fn from(status: RsvpStatus) -> Self {
        match status {
            RsvpStatus::Yes => RsvpStatusDb::Yes,
            RsvpStatus::No => RsvpStatusDb::No,
        }
    }
}

/// Database row mapping for the rsvps table.
#[derive(Debug, Clone, FromRow)]
pub struct RsvpEntity {
    pub id: Uuid,
    pub invite_id: Uuid,
    pub status: RsvpStatusDb,
    pub companions: i32,
    pub responded_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RsvpEntity> for domain::models::Rsvp {
    fn from(entity: RsvpEntity) -> Self {
        Self {
            id: entity.id,
            invite_id: entity.invite_id,
            status: entity.status.into(),
            companions: entity.companions,
            responded_at: entity.responded_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Nullable rsvp columns from a LEFT JOIN, folded back into an [`RsvpEntity`].
pub(crate) struct JoinedRsvp {
    pub id: Option<Uuid>,
    pub invite_id: Uuid,
    pub status: Option<RsvpStatusDb>,
    pub companions: Option<i32>,
    pub responded_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl JoinedRsvp {
    pub(crate) fn into_rsvp(self) -> Option<domain::models::Rsvp> {
        Some(
            RsvpEntity {
                id: self.id?,
                invite_id: self.invite_id,
                status: self.status?,
                companions: self.companions?,
                responded_at: self.responded_at?,
                created_at: self.created_at?,
                updated_at: self.updated_at?,
            }
            .into(),
        )
    }
}
