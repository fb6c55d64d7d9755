//! Domain layer for the invitation backend.
//!
//! This crate contains:
//! - Domain models (Event, Guest, Invite, Rsvp) and request payloads
//! - Pure business rules (RSVP decision, dashboard aggregation, CSV import)
//! - Domain error types

pub mod models;
pub mod services;
