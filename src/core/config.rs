//! Environment-backed bot configuration
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::{anyhow, Context, Result};

const DEFAULT_DATABASE_PATH: &str = "reminders.db";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_POLL_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bot API token. Never logged.
    pub telegram_token: String,
    /// SQLite file path; `:memory:` is accepted for ephemeral runs.
    pub database_path: String,
    /// Default filter for env_logger when RUST_LOG is unset.
    pub log_level: String,
    /// Long-poll timeout passed to getUpdates.
    pub poll_timeout_secs: u64,
}

impl Config {
    /// Read configuration from the environment. Call `dotenvy::dotenv()`
    /// first if a `.env` file should be honored.
    pub fn from_env() -> Result<Self> {
        Self::build(
            std::env::var("TELEGRAM_BOT_TOKEN").ok(),
            std::env::var("DATABASE_PATH").ok(),
            std::env::var("LOG_LEVEL").ok(),
            std::env::var("POLL_TIMEOUT_SECS").ok(),
        )
    }

    fn build(
        token: Option<String>,
        database_path: Option<String>,
        log_level: Option<String>,
        poll_timeout: Option<String>,
    ) -> Result<Self> {
        let telegram_token = token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| anyhow!("TELEGRAM_BOT_TOKEN must be set (get one from @BotFather)"))?;

        let poll_timeout_secs = match poll_timeout {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("POLL_TIMEOUT_SECS must be a number of seconds, got '{raw}'"))?,
            None => DEFAULT_POLL_TIMEOUT_SECS,
        };

        Ok(Config {
            telegram_token,
            database_path: database_path.unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string()),
            log_level: log_level.unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            poll_timeout_secs,
        })
    }
}
