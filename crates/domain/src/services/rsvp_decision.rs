//! RSVP decision rules.
//!
//! Checks an answer against the event deadline and the guest's companion
//! allowance before anything is written.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::event::deadline_passed;
use crate::models::rsvp::{RsvpStatus, SubmitRsvpRequest};

/// Reasons an answer is refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RsvpError {
    #[error("The RSVP deadline has passed")]
    DeadlinePassed,

    #[error("At most {max} companions are allowed for this invitation")]
    CapacityExceeded { max: i32 },
}

/// The answer to store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsvpWrite {
    pub status: RsvpStatus,
    pub companions: i32,
}

/// Decides what to store for an answer.
///
/// A declined invitation always stores zero companions, whatever was sent.
pub fn decide_rsvp(
    request: &SubmitRsvpRequest,
    max_companions: i32,
    deadline: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Result<RsvpWrite, RsvpError> {
    if deadline_passed(deadline, now) {
        return Err(RsvpError::DeadlinePassed);
    }

    let companions = match request.status {
        RsvpStatus::Yes => request.companions,
        RsvpStatus::No => 0,
    };

    if request.status == RsvpStatus::Yes && companions > max_companions {
        return Err(RsvpError::CapacityExceeded {
            max: max_companions,
        });
    }

    Ok(RsvpWrite {
        status: request.status,
        companions,
    })
}
