//! HTTPS client for the Telegram Bot API
//!
//! Thin wrapper over one shared reqwest client: getMe for the startup
//! credential check, long-polling getUpdates for inbound traffic, and
//! sendMessage for replies and deliveries. Every call unwraps the Bot API
//! envelope, so callers only ever see decoded payloads or a TransportError.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::TransportError;

use super::types::{ApiResponse, GetUpdatesRequest, SendMessageRequest, Update, User};
use super::ChatTransport;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Timeout for ordinary (non-polling) calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Extra seconds on top of the long-poll timeout, so the server side always
/// gets to answer before the HTTP client gives up.
const POLL_GRACE_SECS: u64 = 10;

pub struct TelegramApi {
    client: Client,
    base_url: String,
    poll_timeout_secs: u64,
}

impl TelegramApi {
    /// Build a client for the given bot token. The token becomes part of
    /// every request URL and is never logged.
    pub fn new(token: &str, poll_timeout_secs: u64) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(TelegramApi {
            client,
            base_url: format!("{TELEGRAM_API_BASE}/bot{token}"),
            poll_timeout_secs,
        })
    }

    /// Identity check. Fails fast on a bad or revoked token.
    pub async fn get_me(&self) -> Result<User, TransportError> {
        self.call("getMe", &serde_json::json!({}), None).await
    }

    /// Long poll for the next batch of updates. `offset` acknowledges every
    /// update with a smaller update_id; Telegram will not re-deliver them.
    pub async fn get_updates(&self, offset: i64) -> Result<Vec<Update>, TransportError> {
        let body = GetUpdatesRequest {
            offset,
            timeout: self.poll_timeout_secs,
            allowed_updates: &["message"],
        };
        let poll_timeout = Duration::from_secs(self.poll_timeout_secs + POLL_GRACE_SECS);

        self.call("getUpdates", &body, Some(poll_timeout)).await
    }

    async fn call<B, T>(
        &self,
        method: &'static str,
        body: &B,
        timeout: Option<Duration>,
    ) -> Result<T, TransportError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        debug!("POST {method}");

        let mut request = self
            .client
            .post(format!("{}/{method}", self.base_url))
            .json(body);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response: ApiResponse<T> = request.send().await?.json().await?;
        unwrap_envelope(response, method)
    }
}

/// Turn the Bot API envelope into either its payload or a typed error.
fn unwrap_envelope<T>(response: ApiResponse<T>, method: &'static str) -> Result<T, TransportError> {
    if !response.ok {
        return Err(TransportError::Api {
            code: response.error_code,
            description: response
                .description
                .unwrap_or_else(|| "no description".to_string()),
        });
    }

    response
        .result
        .ok_or(TransportError::EmptyResult { method })
}

#[async_trait]
impl ChatTransport for TelegramApi {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), TransportError> {
        let body = SendMessageRequest { chat_id, text };

        // sendMessage echoes the sent Message back; nothing downstream needs it
        let _: serde_json::Value = self.call("sendMessage", &body, None).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_embeds_token() {
        let api = TelegramApi::new("123:abc", 30).unwrap();
        assert_eq!(api.base_url, "https://api.telegram.org/bot123:abc");
    }

    #[test]
    fn test_envelope_payload_is_unwrapped() {
        let response = ApiResponse {
            ok: true,
            result: Some(7_i64),
            description: None,
            error_code: None,
        };

        assert_eq!(unwrap_envelope(response, "getMe").unwrap(), 7);
    }

    #[test]
    fn test_refused_call_becomes_api_error() {
        let response: ApiResponse<i64> = ApiResponse {
            ok: false,
            result: None,
            description: Some("Unauthorized".to_string()),
            error_code: Some(401),
        };

        match unwrap_envelope(response, "getMe") {
            Err(TransportError::Api { code, description }) => {
                assert_eq!(code, Some(401));
                assert_eq!(description, "Unauthorized");
            }
            other => panic!("expected an api error, got {other:?}"),
        }
    }

    #[test]
    fn test_ok_without_payload_is_an_error() {
        let response: ApiResponse<i64> = ApiResponse {
            ok: true,
            result: None,
            description: None,
            error_code: None,
        };

        assert!(matches!(
            unwrap_envelope(response, "getUpdates"),
            Err(TransportError::EmptyResult { method: "getUpdates" })
        ));
    }
}
