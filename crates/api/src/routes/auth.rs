//! Admin authentication routes.

use axum::{extract::State, Json};
use domain::models::admin_user::{
    normalize_username, AdminUser, ChangePasswordRequest, LoginRequest, LoginResponse,
};
use domain::models::mural::OkResponse;
use persistence::repositories::AdminUserRepository;
use shared::password::{change_password as check_password_change, verify_password};
use tracing::{info, warn};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{AdminSession, AppJson};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Log in as an admin.
///
/// POST /api/v1/admin/login
pub async fn login(
    State(state): State<AppState>,
    AppJson(request): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    request.validate()?;

    let username = normalize_username(&request.username);
    let admin: AdminUser = match AdminUserRepository::new(state.pool.clone())
        .find_by_username(&username)
        .await?
    {
        Some(entity) => entity.into(),
        None => {
            warn!(username = %username, "Login for unknown admin");
            return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }
    };

    if !verify_password(&request.password, &admin.password_hash)? {
        warn!(admin_id = %admin.id, "Login with wrong password");
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let session = state.sessions.issue(admin.id, &admin.username)?;

    info!(admin_id = %admin.id, "Admin logged in");

    Ok(Json(LoginResponse {
        token: session.token,
        expires_at: session.expires_at,
        admin,
    }))
}

/// Change the logged-in admin's password.
///
/// PUT /api/v1/admin/password
pub async fn change_password(
    State(state): State<AppState>,
    session: AdminSession,
    AppJson(request): AppJson<ChangePasswordRequest>,
) -> Result<Json<OkResponse>, ApiError> {
    request.validate()?;

    let repo = AdminUserRepository::new(state.pool.clone());
    let admin: AdminUser = repo
        .find_by_id(session.admin_id)
        .await?
        .map(AdminUser::from)
        .ok_or_else(|| ApiError::NotFound("Admin user not found".to_string()))?;

    let new_hash = check_password_change(
        &request.current_password,
        &request.new_password,
        &admin.password_hash,
    )??;

    repo.update_password(admin.id, &new_hash).await?;

    info!(admin_id = %admin.id, "Admin password changed");

    Ok(Json(OkResponse { ok: true }))
}
