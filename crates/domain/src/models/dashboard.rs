//! Admin dashboard domain models.

use serde::Serialize;

use super::event::Event;
use super::guest::GuestRosterEntry;

/// Number of days covered by the view timeline, today included.
pub const TIMELINE_DAYS: usize = 14;

/// Guest and response counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_guests: i64,
    pub confirmed_count: i64,
    pub refused_count: i64,
    pub pending_count: i64,
    /// Sum of every guest's companion allowance.
    pub total_invited_people: i64,
    /// Companions brought by guests who confirmed.
    pub confirmed_people_total: i64,
}

/// Invite view analytics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardAnalytics {
    pub total_invites: i64,
    pub total_companion_capacity: i64,
    pub total_view_count: i64,
    pub viewed_invites: i64,
    pub unopened_invites: i64,
    pub timeline: Vec<TimelineDay>,
}

/// Views attributed to one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineDay {
    /// `YYYY-MM-DD`.
    pub date: String,
    /// `dd/mm`.
    pub label: String,
    pub first_views: i64,
    pub additional_views: i64,
}

/// Full dashboard payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub analytics: DashboardAnalytics,
    pub guests: Vec<GuestRosterEntry>,
    pub event: Event,
}
