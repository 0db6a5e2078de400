//! Minute-cadence delivery loop
//!
//! Once per minute the scheduler asks the store for tasks due at exactly
//! the current minute, sends each one to its chat, and removes it. A task
//! whose minute passed while the bot was down is not retried; the
//! due-minute query only ever matches the present tick.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.3.0

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDateTime;
use log::{debug, error, info};
use tokio::time::MissedTickBehavior;

use crate::core::StoreError;
use crate::telegram::ChatTransport;

use super::model::{truncate_to_minute, ReminderTask};
use super::store::TaskStore;

/// One delivery check per minute.
const TICK_PERIOD: Duration = Duration::from_secs(60);

/// Source of "now" for delivery checks. Production uses [`SystemClock`];
/// tests drive ticks with a fixed time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Wall-clock time in the process-local zone.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// Periodic delivery driver. Holds no state of its own between ticks;
/// everything it needs lives in the store.
pub struct ReminderScheduler {
    store: Arc<dyn TaskStore>,
    transport: Arc<dyn ChatTransport>,
    clock: Arc<dyn Clock>,
}

impl ReminderScheduler {
    pub fn new(
        store: Arc<dyn TaskStore>,
        transport: Arc<dyn ChatTransport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        ReminderScheduler {
            store,
            transport,
            clock,
        }
    }

    /// Run forever on a one-minute cadence. A delayed tick is skipped, not
    /// replayed, so one wall-clock minute is checked at most once.
    pub async fn run(self) {
        let mut interval = tokio::time::interval(TICK_PERIOD);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!("⏰ Reminder scheduler started (checking once per minute)");

        loop {
            interval.tick().await;
            match self.tick().await {
                Ok(0) => {}
                Ok(delivered) => info!("⏰ Delivered {delivered} reminder(s)"),
                Err(e) => error!("❌ Scheduler tick failed: {e}"),
            }
        }
    }

    /// One delivery pass over the current minute. Each due task is sent and
    /// removed independently of the others; returns how many were picked up.
    pub async fn tick(&self) -> Result<usize, StoreError> {
        let now = truncate_to_minute(self.clock.now());
        let due = self.store.find_by_notify_time(now).await?;

        if due.is_empty() {
            debug!("No reminders due at {now}");
            return Ok(0);
        }

        info!("📬 {} reminder(s) due at {now}", due.len());

        let mut deliveries = Vec::with_capacity(due.len());
        for task in due {
            let store = Arc::clone(&self.store);
            let transport = Arc::clone(&self.transport);
            deliveries.push(tokio::spawn(deliver(store, transport, task)));
        }

        let count = deliveries.len();
        for handle in deliveries {
            if let Err(e) = handle.await {
                error!("❌ Delivery task panicked: {e}");
            }
        }

        Ok(count)
    }
}

/// Send one reminder, then remove it. The task is deleted even when the
/// send fails: the due-minute query will never select it again, so the
/// failure is logged here or nowhere.
async fn deliver(
    store: Arc<dyn TaskStore>,
    transport: Arc<dyn ChatTransport>,
    task: ReminderTask,
) {
    debug!("Delivering task {} to chat {}", task.id, task.chat_id);

    if let Err(e) = transport.send_message(task.chat_id, &task.message).await {
        error!(
            "❌ Failed to deliver task {} to chat {}: {e}",
            task.id, task.chat_id
        );
    }

    if let Err(e) = store.delete(&task).await {
        error!("❌ Failed to delete task {} after delivery: {e}", task.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TransportError;
    use crate::database::Database;
    use crate::features::reminders::NewReminder;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use tokio::sync::Mutex;

    struct FixedClock(NaiveDateTime);

    impl Clock for FixedClock {
        fn now(&self) -> NaiveDateTime {
            self.0
        }
    }

    /// Records sends; optionally refuses one chat to exercise failure paths.
    struct RecordingTransport {
        sent: Mutex<Vec<(i64, String)>>,
        fail_for: Option<i64>,
    }

    impl RecordingTransport {
        fn new() -> Arc<Self> {
            Arc::new(RecordingTransport {
                sent: Mutex::new(Vec::new()),
                fail_for: None,
            })
        }

        fn failing_for(chat_id: i64) -> Arc<Self> {
            Arc::new(RecordingTransport {
                sent: Mutex::new(Vec::new()),
                fail_for: Some(chat_id),
            })
        }

        async fn sent(&self) -> Vec<(i64, String)> {
            self.sent.lock().await.clone()
        }
    }

    #[async_trait]
    impl ChatTransport for RecordingTransport {
        async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), TransportError> {
            if self.fail_for == Some(chat_id) {
                return Err(TransportError::Api {
                    code: Some(403),
                    description: "Forbidden: bot was blocked by the user".to_string(),
                });
            }
            self.sent.lock().await.push((chat_id, text.to_string()));
            Ok(())
        }
    }

    fn at(hour: u32, min: u32, sec: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 11, 4)
            .unwrap()
            .and_hms_opt(hour, min, sec)
            .unwrap()
    }

    async fn store_with(tasks: &[(i64, &str, NaiveDateTime)]) -> Database {
        let db = Database::new(":memory:").await.unwrap();
        for (chat_id, message, notify_time) in tasks {
            db.save(NewReminder {
                chat_id: *chat_id,
                message: message.to_string(),
                notify_time: *notify_time,
            })
            .await
            .unwrap();
        }
        db
    }

    fn scheduler(
        db: &Database,
        transport: Arc<RecordingTransport>,
        now: NaiveDateTime,
    ) -> ReminderScheduler {
        ReminderScheduler::new(
            Arc::new(db.clone()),
            transport,
            Arc::new(FixedClock(now)),
        )
    }

    #[tokio::test]
    async fn test_due_task_is_sent_and_removed() {
        let db = store_with(&[(42, "Water the flowers", at(8, 0, 0))]).await;
        let transport = RecordingTransport::new();

        // Clock deliberately mid-minute; the tick truncates before querying
        let delivered = scheduler(&db, transport.clone(), at(8, 0, 37))
            .tick()
            .await
            .unwrap();

        assert_eq!(delivered, 1);
        assert_eq!(
            transport.sent().await,
            vec![(42, "Water the flowers".to_string())]
        );
        assert_eq!(db.count_pending().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_not_yet_due_task_stays_stored() {
        let db = store_with(&[(42, "later", at(9, 0, 0))]).await;
        let transport = RecordingTransport::new();

        let delivered = scheduler(&db, transport.clone(), at(8, 0, 0))
            .tick()
            .await
            .unwrap();

        assert_eq!(delivered, 0);
        assert!(transport.sent().await.is_empty());
        assert_eq!(db.count_pending().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_send_failure_isolates_and_still_deletes() {
        let due = at(8, 0, 0);
        let db = store_with(&[(1, "blocked chat", due), (2, "healthy chat", due)]).await;
        let transport = RecordingTransport::failing_for(1);

        let delivered = scheduler(&db, transport.clone(), due).tick().await.unwrap();

        // Both tasks were picked up; the healthy chat got its message
        assert_eq!(delivered, 2);
        assert_eq!(transport.sent().await, vec![(2, "healthy chat".to_string())]);

        // The failed task is gone too; its minute can never match again
        assert_eq!(db.count_pending().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_empty_minute_is_a_noop() {
        let db = store_with(&[]).await;
        let transport = RecordingTransport::new();

        let delivered = scheduler(&db, transport.clone(), at(8, 0, 0))
            .tick()
            .await
            .unwrap();

        assert_eq!(delivered, 0);
        assert!(transport.sent().await.is_empty());
    }

    #[tokio::test]
    async fn test_all_due_tasks_of_the_minute_are_delivered() {
        let due = at(8, 0, 0);
        let db = store_with(&[(1, "one", due), (2, "two", due), (3, "three", due)]).await;
        let transport = RecordingTransport::new();

        let delivered = scheduler(&db, transport.clone(), due).tick().await.unwrap();

        assert_eq!(delivered, 3);
        let mut chats: Vec<i64> = transport.sent().await.iter().map(|(c, _)| *c).collect();
        chats.sort_unstable();
        assert_eq!(chats, vec![1, 2, 3]);
        assert_eq!(db.count_pending().await.unwrap(), 0);
    }
}
