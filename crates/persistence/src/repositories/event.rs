//! Event repository for database operations.

use chrono::{DateTime, Utc};
use domain::models::event::EventPatch;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::EventEntity;
use crate::metrics::QueryTimer;

/// Repository for event-related database operations.
#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Creates a new EventRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an event by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_event_by_id");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            SELECT id, slug, name, subtitle, custom_date_label, starts_at, venue, rsvp_deadline,
                   notes, video_url, fallback_image_url, character_image_url, favicon_url,
                   created_at, updated_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Makes sure the event with `id` exists, creating a default one if needed.
    ///
    /// Returns the stored event and whether it was created by this call.
    pub async fn ensure(
        &self,
        id: Uuid,
        name: &str,
        slug: &str,
        starts_at: DateTime<Utc>,
    ) -> Result<(EventEntity, bool), sqlx::Error> {
        let timer = QueryTimer::new("ensure_event");
        let result = sqlx::query(
            r#"
            INSERT INTO events (id, slug, name, starts_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(id)
        .bind(slug)
        .bind(name)
        .bind(starts_at)
        .execute(&self.pool)
        .await;
        timer.record();
        let inserted = result?.rows_affected() > 0;

        let event = self
            .find_by_id(id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        Ok((event, inserted))
    }

    /// Apply a settings patch. Returns `None` when the event does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        patch: &EventPatch,
    ) -> Result<Option<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_event");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            UPDATE events
            SET
                name = COALESCE($2, name),
                subtitle = CASE WHEN $3 THEN $4 ELSE subtitle END,
                custom_date_label = CASE WHEN $5 THEN $6 ELSE custom_date_label END,
                venue = CASE WHEN $7 THEN $8 ELSE venue END,
                notes = CASE WHEN $9 THEN $10 ELSE notes END,
                starts_at = COALESCE($11, starts_at),
                rsvp_deadline = CASE WHEN $12 THEN $13 ELSE rsvp_deadline END,
                video_url = CASE WHEN $14 THEN $15 ELSE video_url END,
                fallback_image_url = CASE WHEN $16 THEN $17 ELSE fallback_image_url END,
                character_image_url = CASE WHEN $18 THEN $19 ELSE character_image_url END,
                favicon_url = CASE WHEN $20 THEN $21 ELSE favicon_url END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, slug, name, subtitle, custom_date_label, starts_at, venue, rsvp_deadline,
                      notes, video_url, fallback_image_url, character_image_url, favicon_url,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(patch.name.as_deref())
        .bind(patch.subtitle.is_some())
        .bind(patch.subtitle.clone().flatten())
        .bind(patch.custom_date_label.is_some())
        .bind(patch.custom_date_label.clone().flatten())
        .bind(patch.venue.is_some())
        .bind(patch.venue.clone().flatten())
        .bind(patch.notes.is_some())
        .bind(patch.notes.clone().flatten())
        .bind(patch.starts_at)
        .bind(patch.rsvp_deadline.is_some())
        .bind(patch.rsvp_deadline.flatten())
        .bind(patch.video_url.is_some())
        .bind(patch.video_url.clone().flatten())
        .bind(patch.fallback_image_url.is_some())
        .bind(patch.fallback_image_url.clone().flatten())
        .bind(patch.character_image_url.is_some())
        .bind(patch.character_image_url.clone().flatten())
        .bind(patch.favicon_url.is_some())
        .bind(patch.favicon_url.clone().flatten())
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}

