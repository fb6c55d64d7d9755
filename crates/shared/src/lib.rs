//! Shared utilities for the invitation backend.
//!
//! This crate provides functionality used across the other crates:
//! - Random token generation (invite codes, file suffixes)
//! - Password hashing with Argon2id
//! - Admin session tokens
//! - Common field validation and normalization

pub mod crypto;
pub mod password;
pub mod session;
pub mod validation;
