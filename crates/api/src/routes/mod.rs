//! HTTP route handlers.

pub mod auth;
pub mod dashboard;
pub mod event;
pub mod guest_import;
pub mod guests;
pub mod health;
pub mod invites;
pub mod mural;
pub mod uploads;
