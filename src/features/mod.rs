//! # Features Layer
//!
//! Feature modules. Each keeps its own version header in its module doc.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

pub mod reminders;

pub use reminders::{ReminderParser, ReminderScheduler};

/// Crate version, for the startup log.
pub fn get_bot_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
