use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::models::event::EventPatchError;
use domain::models::guest_import::CsvImportError;
use domain::models::mural::MuralMessageError;
use domain::models::upload::UploadError;
use domain::models::GuestWithInvite;
use domain::services::RsvpError;
use serde::Serialize;
use shared::password::{PasswordChangeError, PasswordError};
use shared::session::SessionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {message}")]
    Conflict {
        message: String,
        guest: Option<Box<GuestWithInvite>>,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        details: Vec<ValidationDetail>,
    },

    #[error("The RSVP deadline has passed")]
    DeadlinePassed,

    #[error("Too many companions: at most {max} allowed")]
    CapacityExceeded { max: i32 },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Validation error without field details.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
            details: Vec::new(),
        }
    }

    /// Validation error pointing at a single payload field.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        ApiError::Validation {
            details: vec![ValidationDetail {
                field: field.to_string(),
                message: message.clone(),
            }],
            message,
        }
    }

    /// Duplicate phone, carrying the guest that already uses it.
    pub fn phone_conflict(existing: Option<GuestWithInvite>) -> Self {
        ApiError::Conflict {
            message: "A guest with this phone already exists".to_string(),
            guest: existing.map(Box::new),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<ValidationDetail>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    guest: Option<Box<GuestWithInvite>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationDetail {
    pub field: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, error_code, message, details, guest) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg, None, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None, None),
            ApiError::Conflict { message, guest } => {
                (StatusCode::CONFLICT, "conflict", message, None, guest)
            }
            ApiError::Validation { message, details } => {
                let details = (!details.is_empty()).then_some(details);
                (StatusCode::BAD_REQUEST, "validation_error", message, details, None)
            }
            ApiError::DeadlinePassed => (StatusCode::FORBIDDEN, "deadline_passed", message, None, None),
            ApiError::CapacityExceeded { .. } => {
                (StatusCode::BAD_REQUEST, "capacity_exceeded", message, None, None)
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                    None,
                )
            }
        };

        let body = ErrorBody {
            error: error_code.into(),
            message,
            details,
            guest,
        };

        (status, Json(body)).into_response()
    }
}

/// Returns true when the error is a unique constraint violation.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505"))
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".into()),
            sqlx::Error::Database(db_err) => {
                if let Some(code) = db_err.code() {
                    match code.as_ref() {
                        "23505" => ApiError::Conflict {
                            message: "Resource already exists".into(),
                            guest: None,
                        },
                        "23503" => ApiError::NotFound("Referenced resource not found".into()),
                        _ => ApiError::Internal(format!("Database error: {}", db_err)),
                    }
                } else {
                    ApiError::Internal(format!("Database error: {}", db_err))
                }
            }
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<ValidationDetail> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| ValidationDetail {
                    field: camel_case(field),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", camel_case(field))),
                })
            })
            .collect();
        details.sort_by(|a, b| a.field.cmp(&b.field));

        let message = if details.len() == 1 {
            details[0].message.clone()
        } else {
            format!("{} validation errors", details.len())
        };

        ApiError::Validation { message, details }
    }
}

/// Payload field names are camelCase; validator reports struct field names.
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

impl From<RsvpError> for ApiError {
    fn from(err: RsvpError) -> Self {
        match err {
            RsvpError::DeadlinePassed => ApiError::DeadlinePassed,
            RsvpError::CapacityExceeded { max } => ApiError::CapacityExceeded { max },
        }
    }
}

impl From<MuralMessageError> for ApiError {
    fn from(err: MuralMessageError) -> Self {
        ApiError::invalid_field("message", err.to_string())
    }
}

impl From<CsvImportError> for ApiError {
    fn from(err: CsvImportError) -> Self {
        match err {
            CsvImportError::MissingColumn(column) => ApiError::invalid_field(column, err.to_string()),
            CsvImportError::MissingFile => ApiError::invalid_field("file", err.to_string()),
            CsvImportError::EmptyFile | CsvImportError::InvalidEncoding => {
                ApiError::validation(err.to_string())
            }
        }
    }
}

impl From<EventPatchError> for ApiError {
    fn from(err: EventPatchError) -> Self {
        ApiError::invalid_field(err.field(), err.to_string())
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        ApiError::invalid_field("content", err.to_string())
    }
}

impl From<PasswordChangeError> for ApiError {
    fn from(err: PasswordChangeError) -> Self {
        let field = match err {
            PasswordChangeError::WrongCurrentPassword => "currentPassword",
            PasswordChangeError::TooShort | PasswordChangeError::Unchanged => "newPassword",
        };
        ApiError::invalid_field(field, err.to_string())
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::Internal(format!("Password error: {}", err))
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::EncodingError(msg) => {
                ApiError::Internal(format!("Session error: {}", msg))
            }
            SessionError::Expired => ApiError::Unauthorized("Session has expired".into()),
            SessionError::InvalidToken => ApiError::Unauthorized("Invalid session token".into()),
        }
    }
}
