//! Persistence contract for reminder tasks

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::core::StoreError;

use super::model::{NewReminder, ReminderTask};

/// Storage seam shared by the dispatch path and the scheduler. The store
/// owns all locking; callers may hit it concurrently from both paths.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Persist a new task and return the id the store assigned.
    async fn save(&self, reminder: NewReminder) -> Result<i64, StoreError>;

    /// All tasks due at exactly this minute. Callers must not rely on the
    /// order of the returned tasks.
    async fn find_by_notify_time(
        &self,
        minute: NaiveDateTime,
    ) -> Result<Vec<ReminderTask>, StoreError>;

    /// Remove a task. Deleting a task that is already gone is not an error.
    async fn delete(&self, task: &ReminderTask) -> Result<(), StoreError>;
}
