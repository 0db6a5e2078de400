use anyhow::Result;
use dotenvy::dotenv;
use log::{debug, error, info};
use std::sync::Arc;
use std::time::Duration;

use nudge::core::Config;
use nudge::database::Database;
use nudge::features::get_bot_version;
use nudge::features::reminders::{ReminderScheduler, SystemClock};
use nudge::telegram::{ChatTransport, TelegramApi};
use nudge::update_handler::UpdateHandler;

/// Back-off after a failed getUpdates poll.
const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting nudge reminder bot v{}...", get_bot_version());

    let database = Database::new(&config.database_path).await?;
    let pending = database.count_pending().await?;
    match database.next_due().await? {
        Some(next) => info!(
            "💾 {pending} pending reminder(s), next due {}",
            next.notify_time
        ),
        None => info!("💾 No pending reminders"),
    }

    let api = Arc::new(TelegramApi::new(
        &config.telegram_token,
        config.poll_timeout_secs,
    )?);

    // Fail fast on a bad token before anything is spawned
    let me = api.get_me().await.map_err(|e| {
        error!("Telegram credential check failed: {e}");
        error!("This could indicate:");
        error!("  - Invalid or revoked bot token");
        error!("  - Network issues reaching the Telegram API");
        anyhow::anyhow!("getMe failed: {}", e)
    })?;

    let bot_name = me.username.unwrap_or(me.first_name);
    info!("🎉 Connected as @{bot_name}");
    info!("🤖 Bot ID: {}", me.id);

    let transport: Arc<dyn ChatTransport> = api.clone();

    // Start the reminder scheduler
    let scheduler = ReminderScheduler::new(
        Arc::new(database.clone()),
        transport.clone(),
        Arc::new(SystemClock),
    );
    tokio::spawn(async move {
        scheduler.run().await;
    });

    let handler = UpdateHandler::new(Arc::new(database), transport);

    info!(
        "📡 Long polling for updates (timeout {}s)...",
        config.poll_timeout_secs
    );

    run_update_loop(api, handler).await
}

/// Fetch, process, acknowledge, repeat. Never returns on its own; a failed
/// poll is logged and retried after a short back-off.
async fn run_update_loop(api: Arc<TelegramApi>, handler: UpdateHandler) -> Result<()> {
    let mut offset: i64 = 0;

    loop {
        let updates = match api.get_updates(offset).await {
            Ok(updates) => updates,
            Err(e) => {
                error!("❌ getUpdates failed: {e}");
                tokio::time::sleep(POLL_RETRY_DELAY).await;
                continue;
            }
        };

        if updates.is_empty() {
            continue;
        }

        debug!("Fetched {} update(s)", updates.len());
        handler.handle_batch(&updates).await;

        // Acknowledge the whole batch; anything below this offset is never
        // delivered again
        if let Some(last) = updates.last() {
            offset = last.update_id + 1;
        }
    }
}
