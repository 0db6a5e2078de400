//! # Reminders Feature
//!
//! Free-text reminder parsing and minute-exact delivery.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod model;
pub mod parser;
pub mod scheduler;
pub mod store;

pub use model::{NewReminder, ReminderTask, NOTIFY_TIME_FORMAT};
pub use parser::{BotCommand, ParseOutcome, ParsedReminder, RejectReason, ReminderParser};
pub use scheduler::{Clock, ReminderScheduler, SystemClock};
pub use store::TaskStore;
