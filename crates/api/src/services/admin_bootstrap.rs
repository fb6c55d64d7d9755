//! Startup bootstrap.
//!
//! Makes sure the configured event row exists and creates the default admin
//! account on first start. Both steps are idempotent.

use chrono::{Duration, Utc};
use domain::models::admin_user::normalize_username;
use domain::models::event::generate_event_slug;
use persistence::repositories::{AdminUserRepository, EventRepository};
use shared::password::{hash_password, PasswordError, MIN_PASSWORD_LENGTH};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::config::{AdminConfig, EventConfig};

/// Error types for startup bootstrap.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] PasswordError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Creates the configured event when it is missing.
///
/// A new event starts 30 days from now; admins adjust it afterwards.
pub async fn ensure_event(pool: &PgPool, config: &EventConfig) -> Result<(), BootstrapError> {
    let name = config.default_name.trim();
    if name.is_empty() {
        return Err(BootstrapError::Config(
            "event.default_name cannot be empty".to_string(),
        ));
    }

    let (event, created) = EventRepository::new(pool.clone())
        .ensure(
            config.id,
            name,
            &generate_event_slug(),
            Utc::now() + Duration::days(30),
        )
        .await?;

    if created {
        info!(event_id = %event.id, slug = %event.slug, "Event created");
    }

    Ok(())
}

/// Creates the default admin when no account has its username.
pub async fn bootstrap_admin(pool: &PgPool, config: &AdminConfig) -> Result<(), BootstrapError> {
    let username = normalize_username(&config.default_username);
    if username.is_empty() {
        return Ok(());
    }

    let repo = AdminUserRepository::new(pool.clone());
    if repo.find_by_username(&username).await?.is_some() {
        return Ok(());
    }

    if config.default_password.is_empty() {
        warn!(
            username = %username,
            "RSVP__ADMIN__DEFAULT_PASSWORD is empty - skipping admin bootstrap"
        );
        return Ok(());
    }

    if config.default_password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(BootstrapError::Config(format!(
            "admin.default_password must have at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }

    let password_hash = hash_password(&config.default_password)?;
    let admin = repo
        .create(&username, &password_hash, config.default_name.trim())
        .await?;

    info!(admin_id = %admin.id, username = %admin.username, "Default admin created");
    warn!("SECURITY: change the default admin password after the first login");

    Ok(())
}
