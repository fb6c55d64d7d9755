//! Dashboard aggregation over the guest roster.
//!
//! Everything is recomputed from the roster on each call. Days are UTC
//! calendar days.

use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::models::dashboard::{DashboardAnalytics, DashboardStats, TimelineDay, TIMELINE_DAYS};
use crate::models::guest::GuestRosterEntry;
use crate::models::rsvp::RsvpStatus;

/// Counts guests by answer and sums companion totals.
pub fn build_stats(roster: &[GuestRosterEntry]) -> DashboardStats {
    let mut stats = DashboardStats {
        total_guests: roster.len() as i64,
        ..Default::default()
    };

    for entry in roster {
        stats.total_invited_people += i64::from(entry.guest.max_companions);

        match entry.rsvp() {
            Some(rsvp) if rsvp.status == RsvpStatus::Yes => {
                stats.confirmed_count += 1;
                stats.confirmed_people_total += i64::from(rsvp.companions);
            }
            Some(_) => stats.refused_count += 1,
            None => {}
        }
    }

    stats.pending_count = stats.total_guests - stats.confirmed_count - stats.refused_count;
    stats
}

/// Builds view analytics and the view timeline ending on `now`'s day.
pub fn build_analytics(roster: &[GuestRosterEntry], now: DateTime<Utc>) -> DashboardAnalytics {
    let mut analytics = DashboardAnalytics::default();

    let today = now.date_naive();
    let start = today - Duration::days(TIMELINE_DAYS as i64 - 1);

    let mut timeline: Vec<TimelineDay> = (0..TIMELINE_DAYS)
        .map(|offset| timeline_day(start + Duration::days(offset as i64)))
        .collect();
    let index: HashMap<NaiveDate, usize> = (0..TIMELINE_DAYS)
        .map(|offset| (start + Duration::days(offset as i64), offset))
        .collect();

    for entry in roster {
        analytics.total_companion_capacity += i64::from(entry.guest.max_companions);

        let Some(invite) = entry.invite.as_ref() else {
            continue;
        };

        let view_count = i64::from(invite.view_count.max(0));
        analytics.total_invites += 1;
        analytics.total_view_count += view_count;
        if view_count > 0 {
            analytics.viewed_invites += 1;
        }

        if let Some(slot) = invite
            .first_viewed_at
            .and_then(|at| index.get(&at.date_naive()))
        {
            timeline[*slot].first_views += 1;
        }

        if view_count > 0 {
            if let Some(slot) = invite
                .last_viewed_at
                .and_then(|at| index.get(&at.date_naive()))
            {
                timeline[*slot].additional_views += (view_count - 1).max(0);
            }
        }
    }

    analytics.unopened_invites = (analytics.total_invites - analytics.viewed_invites).max(0);
    analytics.timeline = timeline;
    analytics
}

fn timeline_day(date: NaiveDate) -> TimelineDay {
    TimelineDay {
        date: date.format("%Y-%m-%d").to_string(),
        label: date.format("%d/%m").to_string(),
        first_views: 0,
        additional_views: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::guest::{Guest, RosterInvite};
    use crate::models::rsvp::Rsvp;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn entry(
        max_companions: i32,
        rsvp: Option<(RsvpStatus, i32)>,
        views: Option<(DateTime<Utc>, DateTime<Utc>, i32)>,
    ) -> GuestRosterEntry {
        let now = Utc::now();
        let invite_id = Uuid::new_v4();
        GuestRosterEntry {
            guest: Guest {
                id: Uuid::new_v4(),
                event_id: Uuid::new_v4(),
                full_name: "Convidado".to_string(),
                phone: "5511900000000".to_string(),
                email: None,
                max_companions,
                created_at: now,
                updated_at: now,
            },
            invite: Some(RosterInvite {
                id: invite_id,
                short_code: "00000000000000000000".to_string(),
                first_viewed_at: views.map(|v| v.0),
                last_viewed_at: views.map(|v| v.1),
                view_count: views.map(|v| v.2).unwrap_or(0),
                mural_message: None,
                mural_message_created_at: None,
                rsvp: rsvp.map(|(status, companions)| Rsvp {
                    id: Uuid::new_v4(),
                    invite_id,
                    status,
                    companions,
                    responded_at: now,
                    created_at: now,
                    updated_at: now,
                }),
            }),
        }
    }

    #[test]
    fn test_stats_counts() {
        let roster = vec![
            entry(2, Some((RsvpStatus::Yes, 2)), None),
            entry(0, Some((RsvpStatus::No, 0)), None),
            entry(1, None, None),
            entry(3, Some((RsvpStatus::Yes, 1)), None),
        ];

        let stats = build_stats(&roster);
        assert_eq!(
            stats,
            DashboardStats {
                total_guests: 4,
                confirmed_count: 2,
                refused_count: 1,
                pending_count: 1,
                total_invited_people: 6,
                confirmed_people_total: 3,
            }
        );
    }

    #[test]
    fn test_stats_empty_roster() {
        assert_eq!(build_stats(&[]), DashboardStats::default());
    }

    #[test]
    fn test_timeline_shape() {
        let now = Utc.with_ymd_and_hms(2025, 3, 5, 12, 0, 0).unwrap();
        let analytics = build_analytics(&[], now);

        assert_eq!(analytics.timeline.len(), TIMELINE_DAYS);
        assert_eq!(analytics.timeline[0].date, "2025-02-20");
        assert_eq!(analytics.timeline[0].label, "20/02");
        assert_eq!(analytics.timeline[13].date, "2025-03-05");
        assert_eq!(analytics.timeline[13].label, "05/03");
    }

    #[test]
    fn test_timeline_attribution() {
        let now = Utc.with_ymd_and_hms(2025, 3, 5, 12, 0, 0).unwrap();
        let three_days_ago = now - Duration::days(3);
        let today = now - Duration::hours(1);
        let long_ago = now - Duration::days(30);

        let roster = vec![
            entry(1, None, Some((three_days_ago, today, 4))),
            entry(1, None, Some((today, today, 1))),
            entry(2, None, Some((long_ago, three_days_ago, 2))),
            entry(0, None, None),
        ];

        let analytics = build_analytics(&roster, now);
        assert_eq!(analytics.total_invites, 4);
        assert_eq!(analytics.total_companion_capacity, 4);
        assert_eq!(analytics.total_view_count, 7);
        assert_eq!(analytics.viewed_invites, 3);
        assert_eq!(analytics.unopened_invites, 1);

        let day = |date: &str| {
            analytics
                .timeline
                .iter()
                .find(|d| d.date == date)
                .cloned()
                .unwrap()
        };

        let d_minus_3 = day("2025-03-02");
        assert_eq!(d_minus_3.first_views, 1);
        assert_eq!(d_minus_3.additional_views, 1);

        let d_today = day("2025-03-05");
        assert_eq!(d_today.first_views, 1);
        assert_eq!(d_today.additional_views, 3);

        let total_first: i64 = analytics.timeline.iter().map(|d| d.first_views).sum();
        assert_eq!(total_first, 2);
    }

    #[test]
    fn test_guest_without_invite_counts_capacity_only() {
        let now = Utc::now();
        let mut lone = entry(5, None, None);
        lone.invite = None;

        let analytics = build_analytics(&[lone], now);
        assert_eq!(analytics.total_invites, 0);
        assert_eq!(analytics.total_companion_capacity, 5);
        assert_eq!(analytics.unopened_invites, 0);
    }
}
