//! Admin session authentication middleware.
//!
//! Validates the Bearer session token on admin routes and stores the
//! session in request extensions for handlers.

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AdminSession;

/// Returns the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: Option<&str>) -> Result<&str, ApiError> {
    header
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Missing or invalid Authorization header".into()))
}

/// Validates a session token and returns the session it carries.
pub fn authenticate(state: &AppState, header: Option<&str>) -> Result<AdminSession, ApiError> {
    let token = bearer_token(header)?;
    let claims = state.sessions.validate(token).map_err(|e| {
        tracing::debug!(error = %e, "Admin session rejected");
        ApiError::from(e)
    })?;

    Ok(AdminSession {
        admin_id: claims.admin_id()?,
        username: claims.username,
    })
}

/// Middleware that requires an admin session.
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    match authenticate(&state, header) {
        Ok(session) => {
            req.extensions_mut().insert(session);
            next.run(req).await
        }
        Err(e) => e.into_response(),
    }
}
