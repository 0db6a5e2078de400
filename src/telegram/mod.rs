//! # Telegram Module
//!
//! The chat transport: wire types, the Bot API client, and the send seam
//! the rest of the bot goes through.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod api;
pub mod types;

use async_trait::async_trait;

use crate::core::TransportError;

pub use api::TelegramApi;
pub use types::{Chat, Message, Update, User};

/// Outbound side of the chat. The dispatcher and the scheduler send only
/// through this trait, never through the concrete client directly.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), TransportError>;
}
