//! RSVP repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{RsvpEntity, RsvpStatusDb};
use crate::metrics::QueryTimer;

/// Repository for RSVP answers.
#[derive(Clone)]
pub struct RsvpRepository {
    pool: PgPool,
}

impl RsvpRepository {
    /// Creates a new RsvpRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert or overwrite the answer for an invite.
    ///
    /// Relies on the unique `invite_id` constraint, so concurrent submissions
    /// for the same invite still leave a single row.
    pub async fn upsert(
        &self,
        invite_id: Uuid,
        status: RsvpStatusDb,
        companions: i32,
        responded_at: DateTime<Utc>,
    ) -> Result<RsvpEntity, sqlx::Error> {
        let timer = QueryTimer::new("upsert_rsvp");
        let result = sqlx::query_as::<_, RsvpEntity>(
            r#"
            INSERT INTO rsvps (invite_id, status, companions, responded_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (invite_id) DO UPDATE
            SET status = EXCLUDED.status,
                companions = EXCLUDED.companions,
                responded_at = EXCLUDED.responded_at,
                updated_at = NOW()
            RETURNING id, invite_id, status, companions, responded_at, created_at, updated_at
            "#,
        )
        .bind(invite_id)
        .bind(status)
        .bind(companions)
        .bind(responded_at)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}
