//! Domain services for the invitation backend.
//!
//! Services are pure functions over domain models; storage lives in the
//! persistence crate.

pub mod character_upload;
pub mod dashboard;
pub mod event_settings;
pub mod guest_import;
pub mod rsvp_decision;

pub use character_upload::{prepare_character_upload, sanitize_file_stem};
pub use dashboard::{build_analytics, build_stats};
pub use event_settings::build_event_patch;
pub use guest_import::parse_guest_csv;
pub use rsvp_decision::{decide_rsvp, RsvpError, RsvpWrite};
