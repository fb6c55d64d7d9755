//! Turns an event settings request into a normalized patch.

use crate::models::event::{parse_local_datetime, EventPatch, EventPatchError, UpdateEventRequest};

fn clearable(value: &Option<String>) -> Option<Option<String>> {
    value
        .as_deref()
        .map(|v| shared::validation::normalize_optional_text(Some(v)))
}

/// Builds the patch for an update request.
///
/// Text is trimmed and blanks clear the column. A blank `name` or
/// `startsAt` keeps the stored value. Date/time fields are local
/// `YYYY-MM-DDTHH:MM` values at `offset_minutes` from UTC.
pub fn build_event_patch(
    request: &UpdateEventRequest,
    offset_minutes: i32,
) -> Result<EventPatch, EventPatchError> {
    let name = request
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);

    let starts_at = match request.starts_at.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(value) => Some(
            parse_local_datetime(value, offset_minutes).ok_or(EventPatchError::InvalidStartsAt)?,
        ),
    };

    let rsvp_deadline = match request.rsvp_deadline.as_deref().map(str::trim) {
        None => None,
        Some("") => Some(None),
        Some(value) => Some(Some(
            parse_local_datetime(value, offset_minutes)
                .ok_or(EventPatchError::InvalidRsvpDeadline)?,
        )),
    };

    Ok(EventPatch {
        name,
        subtitle: clearable(&request.subtitle),
        custom_date_label: clearable(&request.custom_date_label),
        venue: clearable(&request.venue),
        notes: clearable(&request.notes),
        starts_at,
        rsvp_deadline,
        video_url: clearable(&request.video_url),
        fallback_image_url: clearable(&request.fallback_image_url),
        character_image_url: clearable(&request.character_image_url),
        favicon_url: clearable(&request.favicon_url),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_empty_request_is_empty_patch() {
        let patch = build_event_patch(&UpdateEventRequest::default(), -180).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_blank_values() {
        let request = UpdateEventRequest {
            name: Some("   ".to_string()),
            subtitle: Some("".to_string()),
            starts_at: Some("".to_string()),
            rsvp_deadline: Some(" ".to_string()),
            video_url: Some("  ".to_string()),
            ..Default::default()
        };
        let patch = build_event_patch(&request, -180).unwrap();

        assert_eq!(patch.name, None);
        assert_eq!(patch.subtitle, Some(None));
        assert_eq!(patch.starts_at, None);
        assert_eq!(patch.rsvp_deadline, Some(None));
        assert_eq!(patch.video_url, Some(None));
        assert_eq!(patch.venue, None);
    }

    #[test]
    fn test_values_are_trimmed_and_parsed() {
        let request = UpdateEventRequest {
            name: Some("  Aniversário  ".to_string()),
            venue: Some(" Salão ".to_string()),
            starts_at: Some("2025-11-22T13:00".to_string()),
            rsvp_deadline: Some("2025-11-10T23:59".to_string()),
            favicon_url: Some(" https://example.com/icon.ico ".to_string()),
            ..Default::default()
        };
        let patch = build_event_patch(&request, -180).unwrap();

        assert_eq!(patch.name.as_deref(), Some("Aniversário"));
        assert_eq!(patch.venue, Some(Some("Salão".to_string())));
        assert_eq!(
            patch.starts_at,
            Some(Utc.with_ymd_and_hms(2025, 11, 22, 16, 0, 0).unwrap())
        );
        assert_eq!(
            patch.rsvp_deadline,
            Some(Some(Utc.with_ymd_and_hms(2025, 11, 11, 2, 59, 0).unwrap()))
        );
        assert_eq!(
            patch.favicon_url,
            Some(Some("https://example.com/icon.ico".to_string()))
        );
    }

    #[test]
    fn test_bad_datetimes() {
        let request = UpdateEventRequest {
            starts_at: Some("22/11/2025".to_string()),
            ..Default::default()
        };
        assert_eq!(
            build_event_patch(&request, -180),
            Err(EventPatchError::InvalidStartsAt)
        );

        let request = UpdateEventRequest {
            rsvp_deadline: Some("tomorrow".to_string()),
            ..Default::default()
        };
        assert_eq!(
            build_event_patch(&request, -180),
            Err(EventPatchError::InvalidRsvpDeadline)
        );
    }
}
