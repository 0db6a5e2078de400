// Core layer - configuration, errors, and reply texts
pub mod core;

// Features layer - reminder parsing and scheduled delivery
pub mod features;

// Transport layer - Telegram Bot API client
pub mod telegram;

// Infrastructure
pub mod database;

// Application layer
pub mod update_handler;

// Re-export core config for convenience
pub use core::Config;

// Re-export the items the binary wires together
pub use database::Database;
pub use features::{ReminderParser, ReminderScheduler};
pub use telegram::TelegramApi;
pub use update_handler::UpdateHandler;
