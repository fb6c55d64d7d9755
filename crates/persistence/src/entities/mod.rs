//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod admin_user;
pub mod event;
pub mod guest;
pub mod invite;
pub mod rsvp;

pub use admin_user::AdminUserEntity;
pub use event::EventEntity;
pub use guest::{GuestEntity, GuestRosterEntity, GuestWithInviteEntity};
pub use invite::{InviteContextEntity, InviteEntity, MuralEntryEntity, ViewTrackingEntity};
pub use rsvp::{RsvpEntity, RsvpStatusDb};
