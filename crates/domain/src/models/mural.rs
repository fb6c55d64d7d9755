//! Mural board models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Maximum length of a mural message, in characters.
pub const MURAL_MESSAGE_MAX_CHARS: usize = 99;

/// Request payload for leaving a message on the mural.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MuralMessageRequest {
    pub message: String,
}

/// Errors for a rejected mural message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MuralMessageError {
    #[error("Message must not be empty")]
    Empty,

    #[error("Message must be at most 99 characters")]
    TooLong,
}

/// Trims a mural message and checks its length. Messages are never truncated.
pub fn normalize_mural_message(raw: &str) -> Result<String, MuralMessageError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(MuralMessageError::Empty);
    }
    if trimmed.chars().count() > MURAL_MESSAGE_MAX_CHARS {
        return Err(MuralMessageError::TooLong);
    }
    Ok(trimmed.to_string())
}

/// One message on the mural board.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MuralEntry {
    pub id: Uuid,
    pub guest_name: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Response listing the mural board, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct MuralBoardResponse {
    pub data: Vec<MuralEntry>,
}

/// Acknowledgement returned by write endpoints without a payload.
#[derive(Debug, Clone, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}
