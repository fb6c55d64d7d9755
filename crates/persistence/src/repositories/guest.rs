//! Guest repository for database operations.

use domain::models::guest::NewGuest;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{GuestEntity, GuestRosterEntity, GuestWithInviteEntity};
use crate::metrics::QueryTimer;

/// Repository for guest-related database operations.
#[derive(Clone)]
pub struct GuestRepository {
    pool: PgPool,
}

impl GuestRepository {
    /// Creates a new GuestRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a guest by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<GuestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_guest_by_id");
        let result = sqlx::query_as::<_, GuestEntity>(
            r#"
            SELECT id, event_id, full_name, phone, email, max_companions, created_at, updated_at
            FROM guests
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a guest by phone, with its invite code.
    pub async fn find_by_phone_with_invite(
        &self,
        phone: &str,
    ) -> Result<Option<GuestWithInviteEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_guest_by_phone_with_invite");
        let result = sqlx::query_as::<_, GuestWithInviteEntity>(
            r#"
            SELECT g.id, g.event_id, g.full_name, g.phone, g.email, g.max_companions,
                   g.created_at, g.updated_at,
                   i.short_code
            FROM guests g
            LEFT JOIN invites i ON i.guest_id = g.id
            WHERE g.phone = $1
            "#,
        )
        .bind(phone)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Check if a phone is already registered.
    pub async fn phone_exists(&self, phone: &str) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("check_guest_phone_exists");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM guests WHERE phone = $1)
            "#,
        )
        .bind(phone)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a guest and its invite in one transaction.
    pub async fn create_with_invite(
        &self,
        event_id: Uuid,
        guest: &NewGuest,
        short_code: &str,
    ) -> Result<GuestWithInviteEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_guest_with_invite");
        let result = self.insert_with_invite(event_id, guest, short_code).await;
        timer.record();
        let created = result?;

        Ok(GuestWithInviteEntity {
            id: created.id,
            event_id: created.event_id,
            full_name: created.full_name,
            phone: created.phone,
            email: created.email,
            max_companions: created.max_companions,
            created_at: created.created_at,
            updated_at: created.updated_at,
            short_code: Some(short_code.to_string()),
        })
    }

    async fn insert_with_invite(
        &self,
        event_id: Uuid,
        guest: &NewGuest,
        short_code: &str,
    ) -> Result<GuestEntity, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, GuestEntity>(
            r#"
            INSERT INTO guests (event_id, full_name, phone, email, max_companions)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, event_id, full_name, phone, email, max_companions, created_at, updated_at
            "#,
        )
        .bind(event_id)
        .bind(&guest.full_name)
        .bind(&guest.phone)
        .bind(guest.email.as_deref())
        .bind(guest.max_companions)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO invites (event_id, guest_id, short_code)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(event_id)
        .bind(created.id)
        .bind(short_code)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(created)
    }

    /// Update a guest's fields. Returns `None` when the guest does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        guest: &NewGuest,
    ) -> Result<Option<GuestWithInviteEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_guest");
        let result = sqlx::query_as::<_, GuestWithInviteEntity>(
            r#"
            WITH updated AS (
                UPDATE guests
                SET full_name = $2, phone = $3, email = $4, max_companions = $5, updated_at = NOW()
                WHERE id = $1
                RETURNING id, event_id, full_name, phone, email, max_companions, created_at, updated_at
            )
            SELECT u.id, u.event_id, u.full_name, u.phone, u.email, u.max_companions,
                   u.created_at, u.updated_at,
                   i.short_code
            FROM updated u
            LEFT JOIN invites i ON i.guest_id = u.id
            "#,
        )
        .bind(id)
        .bind(&guest.full_name)
        .bind(&guest.phone)
        .bind(guest.email.as_deref())
        .bind(guest.max_companions)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a guest; invite and answer go with it.
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_guest");
        let result = sqlx::query(
            r#"
            DELETE FROM guests
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result?.rows_affected())
    }

    /// List the event's roster ordered by name, with invites and answers.
    pub async fn list_roster(&self, event_id: Uuid) -> Result<Vec<GuestRosterEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_guest_roster");
        let result = sqlx::query_as::<_, GuestRosterEntity>(
            r#"
            SELECT
                g.id, g.event_id, g.full_name, g.phone, g.email, g.max_companions,
                g.created_at, g.updated_at,
                i.id as invite_id, i.short_code, i.first_viewed_at, i.last_viewed_at,
                i.view_count, i.mural_message, i.mural_message_created_at,
                r.id as rsvp_id, r.status as rsvp_status, r.companions as rsvp_companions,
                r.responded_at as rsvp_responded_at, r.created_at as rsvp_created_at,
                r.updated_at as rsvp_updated_at
            FROM guests g
            LEFT JOIN invites i ON i.guest_id = g.id
            LEFT JOIN rsvps r ON r.invite_id = i.id
            WHERE g.event_id = $1
            ORDER BY g.full_name ASC, g.created_at ASC
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
