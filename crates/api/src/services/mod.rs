//! Application services shared by handlers and startup.

pub mod admin_bootstrap;
pub mod guest_registry;

pub use admin_bootstrap::{bootstrap_admin, ensure_event, BootstrapError};
pub use guest_registry::{import_rows, register_guest, store_row, RowOutcome};
