//! Custom Axum extractors.

pub mod admin_session;
pub mod json;

pub use admin_session::AdminSession;
pub use json::AppJson;
