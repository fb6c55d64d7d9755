//! Persistence layer for the invitation backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - Repository implementations
//! - Query duration and pool metrics

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
