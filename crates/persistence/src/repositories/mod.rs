//! Repository implementations for database operations.

pub mod admin_user;
pub mod event;
pub mod guest;
pub mod invite;
pub mod rsvp;

pub use admin_user::AdminUserRepository;
pub use event::EventRepository;
pub use guest::GuestRepository;
pub use invite::InviteRepository;
pub use rsvp::RsvpRepository;
