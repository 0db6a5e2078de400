use crate::core::replies;
use crate::features::reminders::{
    BotCommand, NewReminder, ParseOutcome, RejectReason, ReminderParser, TaskStore,
};
use crate::telegram::{ChatTransport, Update};
use anyhow::Result;
use log::{debug, error, info};
use std::sync::Arc;

/// Applies parser outcomes to inbound updates: persists valid reminders and
/// answers every message with exactly one reply.
pub struct UpdateHandler {
    parser: ReminderParser,
    store: Arc<dyn TaskStore>,
    transport: Arc<dyn ChatTransport>,
}

impl UpdateHandler {
    pub fn new(store: Arc<dyn TaskStore>, transport: Arc<dyn ChatTransport>) -> Self {
        UpdateHandler {
            parser: ReminderParser::new(),
            store,
            transport,
        }
    }

    /// Process one getUpdates batch in order. A failing update is logged
    /// and never aborts the rest; once this returns, the whole batch counts
    /// as processed and the caller advances the long-poll offset past it.
    pub async fn handle_batch(&self, updates: &[Update]) {
        for update in updates {
            if let Err(e) = self.handle_update(update).await {
                error!("❌ [{}] Failed to process update: {e}", update.update_id);
            }
        }
    }

    /// Handle a single update end to end: classify, maybe persist, reply.
    pub async fn handle_update(&self, update: &Update) -> Result<()> {
        let message = match &update.message {
            Some(message) => message,
            None => {
                debug!("[{}] No message payload, skipping", update.update_id);
                return Ok(());
            }
        };
        let chat_id = message.chat.id;

        let text = match &message.text {
            Some(text) => text,
            None => {
                info!(
                    "[{}] 📎 Non-text message from chat {chat_id}",
                    update.update_id
                );
                self.transport
                    .send_message(chat_id, replies::NON_TEXT_INPUT)
                    .await?;
                return Ok(());
            }
        };

        info!(
            "[{}] 📥 Message from chat {chat_id}: '{}'",
            update.update_id,
            text.chars().take(100).collect::<String>()
        );

        match self.parser.parse(text) {
            ParseOutcome::Command(BotCommand::Start) => {
                debug!("[{}] Greeting requested", update.update_id);
                self.transport
                    .send_message(chat_id, &replies::start_greeting())
                    .await?;
            }
            ParseOutcome::Task(task) => {
                let notify_time = task.notify_time;
                let reminder = NewReminder {
                    chat_id,
                    message: task.message,
                    notify_time,
                };

                match self.store.save(reminder).await {
                    Ok(task_id) => {
                        info!(
                            "[{}] ✅ Saved task {task_id} for chat {chat_id}, due {notify_time}",
                            update.update_id
                        );
                        self.transport
                            .send_message(chat_id, replies::TASK_SAVED)
                            .await?;
                    }
                    Err(e) => {
                        error!(
                            "[{}] ❌ Failed to save task for chat {chat_id}: {e}",
                            update.update_id
                        );
                        // The user must never be told a task was saved when
                        // it was not
                        self.transport
                            .send_message(chat_id, replies::SAVE_FAILED)
                            .await?;
                        return Err(e.into());
                    }
                }
            }
            ParseOutcome::Rejected(RejectReason::InvalidDateTime) => {
                info!(
                    "[{}] 📅 Invalid date-time from chat {chat_id}",
                    update.update_id
                );
                self.transport
                    .send_message(chat_id, replies::INVALID_DATE_TIME)
                    .await?;
            }
            ParseOutcome::Rejected(RejectReason::MalformedInput) => {
                info!(
                    "[{}] 🤷 Unrecognized input from chat {chat_id}",
                    update.update_id
                );
                self.transport
                    .send_message(chat_id, &replies::malformed_input())
                    .await?;
            }
        }

        Ok(())
    }
}
