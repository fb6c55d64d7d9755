//! Event domain model.
//!
//! The service manages a single event, identified by a configured id. All
//! display and appearance settings of the invitation live here.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, Offset, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

/// Format accepted for local date/time fields (`2025-11-22T13:00`).
pub const LOCAL_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Label used when the event has no RSVP deadline.
pub const NO_DEADLINE_LABEL: &str = "o dia do evento";

const WEEKDAYS_PT_BR: [&str; 7] = [
    "domingo",
    "segunda-feira",
    "terça-feira",
    "quarta-feira",
    "quinta-feira",
    "sexta-feira",
    "sábado",
];

const MONTHS_PT_BR: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Represents the event in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
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

impl Event {
    /// Returns true when the RSVP deadline is set and already behind `now`.
    pub fn deadline_passed(&self, now: DateTime<Utc>) -> bool {
        deadline_passed(self.rsvp_deadline, now)
    }

    /// Date label shown on the invitation: the custom label or the formatted start.
    pub fn date_label(&self, offset_minutes: i32) -> String {
        self.custom_date_label
            .clone()
            .unwrap_or_else(|| format_event_datetime(self.starts_at, offset_minutes))
    }

    /// Deadline label shown on the invitation.
    pub fn deadline_label(&self, offset_minutes: i32) -> String {
        match self.rsvp_deadline {
            Some(deadline) => format_event_datetime(deadline, offset_minutes),
            None => NO_DEADLINE_LABEL.to_string(),
        }
    }
}

/// A deadline is passed only when it exists and is strictly before `now`.
pub fn deadline_passed(deadline: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    matches!(deadline, Some(d) if d < now)
}

/// Generates the slug used for an event created at startup.
pub fn generate_event_slug() -> String {
    format!("evento-{}", shared::crypto::random_hex(6))
}

fn fixed_offset(offset_minutes: i32) -> FixedOffset {
    FixedOffset::east_opt(offset_minutes * 60).unwrap_or_else(|| Utc.fix())
}

/// Formats a timestamp in Brazilian Portuguese at the given UTC offset.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use domain::models::event::format_event_datetime;
///
/// let starts_at = Utc.with_ymd_and_hms(2025, 11, 22, 16, 0, 0).unwrap();
/// assert_eq!(format_event_datetime(starts_at, -180), "sábado, 22 de novembro às 13:00");
/// ```
pub fn format_event_datetime(value: DateTime<Utc>, offset_minutes: i32) -> String {
    let local = value.with_timezone(&fixed_offset(offset_minutes));
    format!(
        "{}, {:02} de {} às {:02}:{:02}",
        WEEKDAYS_PT_BR[local.weekday().num_days_from_sunday() as usize],
        local.day(),
        MONTHS_PT_BR[local.month0() as usize],
        local.hour(),
        local.minute()
    )
}

/// Parses a local `YYYY-MM-DDTHH:MM` value at a fixed UTC offset.
pub fn parse_local_datetime(value: &str, offset_minutes: i32) -> Option<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(value.trim(), LOCAL_DATETIME_FORMAT).ok()?;
    fixed_offset(offset_minutes)
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

// ============================================================================
// Settings update
// ============================================================================

/// Request payload for updating the event settings.
///
/// Absent fields are left unchanged; blank values clear optional fields.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[validate(length(max = 191, message = "name must be at most 191 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 191, message = "subtitle must be at most 191 characters"))]
    pub subtitle: Option<String>,

    #[validate(length(max = 191, message = "customDateLabel must be at most 191 characters"))]
    pub custom_date_label: Option<String>,

    #[validate(length(max = 191, message = "venue must be at most 191 characters"))]
    pub venue: Option<String>,

    #[validate(length(max = 512, message = "notes must be at most 512 characters"))]
    pub notes: Option<String>,

    #[validate(length(max = 50, message = "startsAt must be at most 50 characters"))]
    pub starts_at: Option<String>,

    #[validate(length(max = 50, message = "rsvpDeadline must be at most 50 characters"))]
    pub rsvp_deadline: Option<String>,

    #[validate(length(max = 512, message = "videoUrl must be at most 512 characters"))]
    #[validate(custom(function = "shared::validation::validate_http_url"))]
    pub video_url: Option<String>,

    #[validate(length(max = 512, message = "fallbackImageUrl must be at most 512 characters"))]
    #[validate(custom(function = "shared::validation::validate_http_url"))]
    pub fallback_image_url: Option<String>,

    #[validate(length(max = 512, message = "characterImageUrl must be at most 512 characters"))]
    #[validate(custom(function = "shared::validation::validate_http_url"))]
    pub character_image_url: Option<String>,

    #[validate(length(max = 512, message = "faviconUrl must be at most 512 characters"))]
    #[validate(custom(function = "shared::validation::validate_http_url"))]
    pub favicon_url: Option<String>,
}

/// Normalized event changes.
///
/// `None` leaves a column untouched. For clearable columns, `Some(None)`
/// stores NULL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventPatch {
    pub name: Option<String>,
    pub subtitle: Option<Option<String>>,
    pub custom_date_label: Option<Option<String>>,
    pub venue: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub starts_at: Option<DateTime<Utc>>,
    pub rsvp_deadline: Option<Option<DateTime<Utc>>>,
    pub video_url: Option<Option<String>>,
    pub fallback_image_url: Option<Option<String>>,
    pub character_image_url: Option<Option<String>>,
    pub favicon_url: Option<Option<String>>,
}

impl EventPatch {
    /// Returns true when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == EventPatch::default()
    }
}

/// Errors raised while turning an update request into a patch.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventPatchError {
    #[error("Invalid event start time, expected YYYY-MM-DDTHH:MM")]
    InvalidStartsAt,

    #[error("Invalid RSVP deadline, expected YYYY-MM-DDTHH:MM")]
    InvalidRsvpDeadline,
}

impl EventPatchError {
    /// Name of the payload field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            EventPatchError::InvalidStartsAt => "startsAt",
            EventPatchError::InvalidRsvpDeadline => "rsvpDeadline",
        }
    }
}
