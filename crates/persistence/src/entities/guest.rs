//! Guest entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::guest::{GuestRosterEntry, GuestWithInvite, InviteCode, RosterInvite};
use sqlx::FromRow;
use uuid::Uuid;

use super::rsvp::{JoinedRsvp, RsvpStatusDb};

/// Database row mapping for the guests table.
#[derive(Debug, Clone, FromRow)]
pub struct GuestEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub max_companions: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GuestEntity> for domain::models::Guest {
    fn from(entity: GuestEntity) -> Self {
        Self {
            id: entity.id,
            event_id: entity.event_id,
            full_name: entity.full_name,
            phone: entity.phone,
            email: entity.email,
            max_companions: entity.max_companions,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Guest row joined with its invite code.
#[derive(Debug, Clone, FromRow)]
pub struct GuestWithInviteEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub max_companions: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    // Invite info
    pub short_code: Option<String>,
}

impl From<GuestWithInviteEntity> for GuestWithInvite {
    fn from(entity: GuestWithInviteEntity) -> Self {
        Self {
            invite: entity.short_code.map(|short_code| InviteCode { short_code }),
            guest: GuestEntity {
                id: entity.id,
                event_id: entity.event_id,
                full_name: entity.full_name,
                phone: entity.phone,
                email: entity.email,
                max_companions: entity.max_companions,
                created_at: entity.created_at,
                updated_at: entity.updated_at,
            }
            .into(),
        }
    }
}

/// Guest row joined with its invite and answer for the roster.
#[derive(Debug, Clone, FromRow)]
pub struct GuestRosterEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub max_companions: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    // Invite info
    pub invite_id: Option<Uuid>,
    pub short_code: Option<String>,
    pub first_viewed_at: Option<DateTime<Utc>>,
    pub last_viewed_at: Option<DateTime<Utc>>,
    pub view_count: Option<i32>,
    pub mural_message: Option<String>,
    pub mural_message_created_at: Option<DateTime<Utc>>,
    // Rsvp info
    pub rsvp_id: Option<Uuid>,
    pub rsvp_status: Option<RsvpStatusDb>,
    pub rsvp_companions: Option<i32>,
    pub rsvp_responded_at: Option<DateTime<Utc>>,
    pub rsvp_created_at: Option<DateTime<Utc>>,
    pub rsvp_updated_at: Option<DateTime<Utc>>,
}

impl From<GuestRosterEntity> for GuestRosterEntry {
    fn from(entity: GuestRosterEntity) -> Self {
        let invite = match (entity.invite_id, entity.short_code) {
            (Some(invite_id), Some(short_code)) => Some(RosterInvite {
                id: invite_id,
                short_code,
                first_viewed_at: entity.first_viewed_at,
                last_viewed_at: entity.last_viewed_at,
                view_count: entity.view_count.unwrap_or(0),
                mural_message: entity.mural_message,
                mural_message_created_at: entity.mural_message_created_at,
                rsvp: JoinedRsvp {
                    id: entity.rsvp_id,
                    invite_id,
                    status: entity.rsvp_status,
                    companions: entity.rsvp_companions,
                    responded_at: entity.rsvp_responded_at,
                    created_at: entity.rsvp_created_at,
                    updated_at: entity.rsvp_updated_at,
                }
                .into_rsvp(),
            }),
            _ => None,
        };

        Self {
            guest: GuestEntity {
                id: entity.id,
                event_id: entity.event_id,
                full_name: entity.full_name,
                phone: entity.phone,
                email: entity.email,
                max_companions: entity.max_companions,
                created_at: entity.created_at,
                updated_at: entity.updated_at,
            }
            .into(),
            invite,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster_entity() -> GuestRosterEntity {
        let now = Utc::now();
        GuestRosterEntity {
            id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            full_name: "Diego Ferreira".to_string(),
            phone: "5511966660004".to_string(),
            email: None,
            max_companions: 3,
            created_at: now,
            updated_at: now,
            invite_id: Some(Uuid::new_v4()),
            short_code: Some("ffffffffffffffffffff".to_string()),
            first_viewed_at: Some(now),
            last_viewed_at: Some(now),
            view_count: Some(2),
            mural_message: None,
            mural_message_created_at: None,
            rsvp_id: None,
            rsvp_status: None,
            rsvp_companions: None,
            rsvp_responded_at: None,
            rsvp_created_at: None,
            rsvp_updated_at: None,
        }
    }

    #[test]
    fn test_roster_entry_pending_guest() {
        let entry: GuestRosterEntry = roster_entity().into();
        let invite = entry.invite.as_ref().unwrap();
        assert_eq!(invite.view_count, 2);
        assert!(entry.rsvp().is_none());
    }

    #[test]
    fn test_roster_entry_with_answer() {
        let now = Utc::now();
        let entity = GuestRosterEntity {
            rsvp_id: Some(Uuid::new_v4()),
            rsvp_status: Some(RsvpStatusDb::No),
            rsvp_companions: Some(0),
            rsvp_responded_at: Some(now),
            rsvp_created_at: Some(now),
            rsvp_updated_at: Some(now),
            ..roster_entity()
        };
        let entry: GuestRosterEntry = entity.into();
        assert_eq!(
            entry.rsvp().map(|r| r.status),
            Some(domain::models::RsvpStatus::No)
        );
    }

    #[test]
    fn test_roster_entry_without_invite() {
        let entity = GuestRosterEntity {
            invite_id: None,
            short_code: None,
            view_count: None,
            ..roster_entity()
        };
        let entry: GuestRosterEntry = entity.into();
        assert!(entry.invite.is_none());
    }

    #[test]
    fn test_guest_with_invite_conversion() {
        let now = Utc::now();
        let entity = GuestWithInviteEntity {
            id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            full_name: "Eduarda Lima".to_string(),
            phone: "5511955550005".to_string(),
            email: Some("eduarda@example.com".to_string()),
            max_companions: 1,
            created_at: now,
            updated_at: now,
            short_code: Some("0000aaaa0000aaaa0000".to_string()),
        };
        let guest: GuestWithInvite = entity.into();
        assert_eq!(guest.short_code(), Some("0000aaaa0000aaaa0000"));
        assert_eq!(guest.guest.full_name, "Eduarda Lima");
    }
}
