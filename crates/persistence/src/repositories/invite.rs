//! Invite repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{InviteContextEntity, MuralEntryEntity, ViewTrackingEntity};
use crate::metrics::QueryTimer;

/// Repository for invite-related database operations.
#[derive(Clone)]
pub struct InviteRepository {
    pool: PgPool,
}

impl InviteRepository {
    /// Creates a new InviteRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an invite by short code, joined with its guest, event and answer.
    pub async fn find_context_by_code(
        &self,
        code: &str,
    ) -> Result<Option<InviteContextEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_invite_context_by_code");
        let result = sqlx::query_as::<_, InviteContextEntity>(
            r#"
            SELECT
                i.id, i.event_id, i.guest_id, i.short_code, i.first_viewed_at, i.last_viewed_at,
                i.view_count, i.mural_message, i.mural_message_created_at,
                i.created_at, i.updated_at,
                g.full_name as guest_full_name, g.phone as guest_phone, g.email as guest_email,
                g.max_companions as guest_max_companions, g.created_at as guest_created_at,
                g.updated_at as guest_updated_at,
                e.slug as event_slug, e.name as event_name, e.subtitle as event_subtitle,
                e.custom_date_label as event_custom_date_label, e.starts_at as event_starts_at,
                e.venue as event_venue, e.rsvp_deadline as event_rsvp_deadline,
                e.notes as event_notes, e.video_url as event_video_url,
                e.fallback_image_url as event_fallback_image_url,
                e.character_image_url as event_character_image_url,
                e.favicon_url as event_favicon_url, e.created_at as event_created_at,
                e.updated_at as event_updated_at,
                r.id as rsvp_id, r.status as rsvp_status, r.companions as rsvp_companions,
                r.responded_at as rsvp_responded_at, r.created_at as rsvp_created_at,
                r.updated_at as rsvp_updated_at
            FROM invites i
            JOIN guests g ON g.id = i.guest_id
            JOIN events e ON e.id = i.event_id
            LEFT JOIN rsvps r ON r.invite_id = i.id
            WHERE i.short_code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Record one view of an invite and return the updated tracking values.
    ///
    /// The first view timestamp is only set once.
    pub async fn record_view(
        &self,
        invite_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<ViewTrackingEntity, sqlx::Error> {
        let timer = QueryTimer::new("record_invite_view");
        let result = sqlx::query_as::<_, ViewTrackingEntity>(
            r#"
            UPDATE invites
            SET first_viewed_at = COALESCE(first_viewed_at, $2),
                last_viewed_at = $2,
                view_count = view_count + 1,
                updated_at = NOW()
            WHERE id = $1
            RETURNING first_viewed_at, last_viewed_at, view_count
            "#,
        )
        .bind(invite_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Store a mural message on the invite with the given code.
    ///
    /// Returns the number of rows updated (0 when the code is unknown).
    pub async fn set_mural_message(
        &self,
        code: &str,
        message: &str,
        now: DateTime<Utc>,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("set_invite_mural_message");
        let result = sqlx::query(
            r#"
            UPDATE invites
            SET mural_message = $2, mural_message_created_at = $3, updated_at = NOW()
            WHERE short_code = $1
            "#,
        )
        .bind(code)
        .bind(message)
        .bind(now)
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result?.rows_affected())
    }

    /// List mural messages for an event, newest first.
    pub async fn list_mural_messages(
        &self,
        event_id: Uuid,
    ) -> Result<Vec<MuralEntryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_mural_messages");
        let result = sqlx::query_as::<_, MuralEntryEntity>(
            r#"
            SELECT i.id, g.full_name as guest_name, i.mural_message as message,
                   i.mural_message_created_at as created_at
            FROM invites i
            JOIN guests g ON g.id = i.guest_id
            WHERE i.event_id = $1
              AND i.mural_message IS NOT NULL
              AND i.mural_message_created_at IS NOT NULL
            ORDER BY i.mural_message_created_at DESC
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Check if a short code is taken.
    pub async fn code_exists(&self, code: &str) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("check_invite_code_exists");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM invites WHERE short_code = $1)
            "#,
        )
        .bind(code)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Draw short codes from `generator` until one is free.
    pub async fn generate_unique_code<F>(&self, generator: F) -> Result<String, sqlx::Error>
    where
        F: Fn() -> String,
    {
        let mut code = generator();
        let mut attempts = 0;

        while self.code_exists(&code).await? {
            code = generator();
            attempts += 1;
            if attempts > 100 {
                return Err(sqlx::Error::Protocol(
                    "Could not generate unique invite code".to_string(),
                ));
            }
        }

        Ok(code)
    }
}
