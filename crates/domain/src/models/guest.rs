//! Guest domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::rsvp::Rsvp;

/// Represents a guest on the roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: Uuid,
    pub event_id: Uuid,
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub max_companions: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Invite code attached to a guest in admin responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteCode {
    pub short_code: String,
}

/// A guest together with the short code of its invite.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestWithInvite {
    #[serde(flatten)]
    pub guest: Guest,
    pub invite: Option<InviteCode>,
}

impl GuestWithInvite {
    pub fn short_code(&self) -> Option<&str> {
        self.invite.as_ref().map(|i| i.short_code.as_str())
    }
}

/// Invite state shown on the admin roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterInvite {
    pub id: Uuid,
    pub short_code: String,
    pub first_viewed_at: Option<DateTime<Utc>>,
    pub last_viewed_at: Option<DateTime<Utc>>,
    pub view_count: i32,
    pub mural_message: Option<String>,
    pub mural_message_created_at: Option<DateTime<Utc>>,
    pub rsvp: Option<Rsvp>,
}

/// One roster line: a guest with invite, view tracking and response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestRosterEntry {
    #[serde(flatten)]
    pub guest: Guest,
    pub invite: Option<RosterInvite>,
}

impl GuestRosterEntry {
    /// The stored response, if the guest answered.
    pub fn rsvp(&self) -> Option<&Rsvp> {
        self.invite.as_ref().and_then(|i| i.rsvp.as_ref())
    }
}

/// Request payload for creating or updating a guest.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GuestRequest {
    #[validate(custom(function = "shared::validation::validate_full_name"))]
    pub full_name: String,

    #[validate(custom(function = "shared::validation::validate_phone"))]
    pub phone: String,

    #[validate(custom(function = "shared::validation::validate_optional_email"))]
    pub email: Option<String>,

    #[validate(range(min = 0, message = "maxCompanions must be zero or greater"))]
    pub max_companions: i32,
}

impl GuestRequest {
    /// Trims the fields and maps a blank email to `None`.
    pub fn normalize(&self) -> NewGuest {
        NewGuest {
            full_name: self.full_name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: shared::validation::normalize_optional_text(self.email.as_deref()),
            max_companions: self.max_companions,
        }
    }
}

/// Normalized guest fields ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGuest {
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub max_companions: i32,
}

/// Response after creating or updating a guest.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestResponse {
    pub guest: GuestWithInvite,
    /// Shareable link for the guest's invite, when it has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite_url: Option<String>,
}

/// Response listing the roster.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListGuestsResponse {
    pub data: Vec<GuestRosterEntry>,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::name::en::Name;
    use fake::Fake;
    use serde_json::json;

    fn request(full_name: &str, phone: &str, email: Option<&str>, max: i32) -> GuestRequest {
        GuestRequest {
            full_name: full_name.to_string(),
            phone: phone.to_string(),
            email: email.map(str::to_string),
            max_companions: max,
        }
    }

    #[test]
    fn test_guest_request_valid() {
        let name: String = Name().fake();
        let req = request(&name, "5511999990001", Some("ana@example.com"), 2);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_guest_request_blank_email_is_valid() {
        let req = request("Ana Paula", "5511999990001", Some("   "), 0);
        assert!(req.validate().is_ok());
        assert_eq!(req.normalize().email, None);
    }

    #[test]
    fn test_guest_request_invalid_fields() {
        let req = request("Al", "12345", Some("nope"), -1);
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("full_name"));
        assert!(fields.contains_key("phone"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("max_companions"));
    }

    #[test]
    fn test_guest_request_normalize_trims() {
        let req = request("  Ana Paula ", " 5511999990001 ", Some(" ana@example.com "), 1);
        let normalized = req.normalize();
        assert_eq!(
            normalized,
            NewGuest {
                full_name: "Ana Paula".to_string(),
                phone: "5511999990001".to_string(),
                email: Some("ana@example.com".to_string()),
                max_companions: 1,
            }
        );
    }

    #[test]
    fn test_guest_request_deserialize() {
        let req: GuestRequest = serde_json::from_value(json!({
            "fullName": "Bruno Martins",
            "phone": "5511988880002",
            "maxCompanions": 0
        }))
        .unwrap();
        assert_eq!(req.full_name, "Bruno Martins");
        assert!(req.email.is_none());
    }

    #[test]
    fn test_guest_with_invite_serializes_flat() {
        let now = Utc::now();
        let guest = GuestWithInvite {
            guest: Guest {
                id: Uuid::new_v4(),
                event_id: Uuid::new_v4(),
                full_name: "Carla Souza".to_string(),
                phone: "5511977770003".to_string(),
                email: None,
                max_companions: 1,
                created_at: now,
                updated_at: now,
            },
            invite: Some(InviteCode {
                short_code: "0123456789abcdef0123".to_string(),
            }),
        };

        let value = serde_json::to_value(&guest).unwrap();
        assert_eq!(value["fullName"], "Carla Souza");
        assert_eq!(value["maxCompanions"], 1);
        assert_eq!(value["invite"]["shortCode"], "0123456789abcdef0123");
        assert_eq!(guest.short_code(), Some("0123456789abcdef0123"));
    }
}
