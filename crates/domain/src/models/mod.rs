//! Domain models for the invitation backend.

pub mod admin_user;
pub mod dashboard;
pub mod event;
pub mod guest;
pub mod guest_import;
pub mod invite;
pub mod mural;
pub mod rsvp;
pub mod upload;

pub use admin_user::AdminUser;
pub use event::Event;
pub use guest::{Guest, GuestWithInvite};
pub use invite::{Invite, InvitePreview};
pub use rsvp::{Rsvp, RsvpStatus};
