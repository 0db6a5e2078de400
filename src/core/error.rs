//! Typed errors for the store and transport seams
//!
//! Parser rejections are not errors (they become user replies and stay in
//! the parser's outcome enum); these types cover the collaborators that can
//! actually fail.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use thiserror::Error;

/// Failure in the persistence store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sqlite(#[from] sqlite::Error),

    /// A stored notify_time no longer parses under the storage format.
    /// Indicates external tampering or corruption, never normal operation.
    #[error("Task {id} has an unreadable notify_time '{value}'")]
    InvalidTimestamp { id: i64, value: String },
}

/// Failure in the chat transport.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The Bot API answered but refused the call (`ok: false`).
    #[error("Telegram API error {code:?}: {description}")]
    Api {
        code: Option<i64>,
        description: String,
    },

    /// The Bot API reported success but the expected payload was missing.
    #[error("Telegram API returned ok without a result for {method}")]
    EmptyResult { method: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display_names_the_row() {
        let err = StoreError::InvalidTimestamp {
            id: 7,
            value: "yesterday".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains('7'));
        assert!(text.contains("yesterday"));
    }

    #[test]
    fn test_api_error_display_carries_description() {
        let err = TransportError::Api {
            code: Some(403),
            description: "Forbidden: bot was blocked by the user".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("403"));
        assert!(text.contains("blocked"));
    }
}
