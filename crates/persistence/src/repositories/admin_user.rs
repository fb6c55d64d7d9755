//! Admin user repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::AdminUserEntity;
use crate::metrics::QueryTimer;

/// Repository for admin accounts.
#[derive(Clone)]
pub struct AdminUserRepository {
    pool: PgPool,
}

impl AdminUserRepository {
    /// Creates a new AdminUserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an admin by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<AdminUserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_admin_user_by_id");
        let result = sqlx::query_as::<_, AdminUserEntity>(
            r#"
            SELECT id, username, password_hash, name, created_at, updated_at
            FROM admin_users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an admin by (normalized) username.
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminUserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_admin_user_by_username");
        let result = sqlx::query_as::<_, AdminUserEntity>(
            r#"
            SELECT id, username, password_hash, name, created_at, updated_at
            FROM admin_users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create an admin account.
    pub async fn create(
        &self,
        username: &str,
        password_hash: &str,
        name: &str,
    ) -> Result<AdminUserEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_admin_user");
        let result = sqlx::query_as::<_, AdminUserEntity>(
            r#"
            INSERT INTO admin_users (username, password_hash, name)
            VALUES ($1, $2, $3)
            RETURNING id, username, password_hash, name, created_at, updated_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(name)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Replace an admin's password hash.
    pub async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("update_admin_user_password");
        let result = sqlx::query(
            r#"
            UPDATE admin_users
            SET password_hash = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result?.rows_affected())
    }
}
