//! SQLite persistence for reminder tasks
//!
//! One connection behind a tokio mutex, cloned into the dispatch path and
//! the scheduler. notify_time is stored as `%Y-%m-%d %H:%M` text so the
//! due-minute lookup is a string equality against the index.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlite::{Connection, State, Statement};
use tokio::sync::Mutex;

use crate::core::StoreError;
use crate::features::reminders::{NewReminder, ReminderTask, TaskStore, NOTIFY_TIME_FORMAT};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS reminder_tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    chat_id INTEGER NOT NULL,
    message TEXT NOT NULL,
    notify_time TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);
CREATE INDEX IF NOT EXISTS idx_reminder_tasks_notify_time
    ON reminder_tasks(notify_time);
";

/// Shared handle to the reminder database. Cheap to clone; all clones use
/// the same connection.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) the database at `path` and apply the schema.
    /// `:memory:` gives an ephemeral database, used by the tests.
    pub async fn new(path: &str) -> Result<Self, StoreError> {
        let connection = sqlite::open(path)?;
        connection.execute(SCHEMA)?;

        Ok(Database {
            conn: Arc::new(Mutex::new(connection)),
        })
    }

    /// Number of tasks still waiting for delivery.
    pub async fn count_pending(&self) -> Result<i64, StoreError> {
        let conn = self.conn.lock().await;
        let mut statement = conn.prepare("SELECT COUNT(*) FROM reminder_tasks")?;
        statement.next()?;
        Ok(statement.read::<i64, _>(0)?)
    }

    /// The earliest pending task, if any. Used for the startup log.
    pub async fn next_due(&self) -> Result<Option<ReminderTask>, StoreError> {
        let conn = self.conn.lock().await;
        let mut statement = conn.prepare(
            "SELECT id, chat_id, message, notify_time FROM reminder_tasks
             ORDER BY notify_time ASC, id ASC LIMIT 1",
        )?;

        match statement.next()? {
            State::Row => Ok(Some(read_task(&statement)?)),
            State::Done => Ok(None),
        }
    }
}

#[async_trait]
impl TaskStore for Database {
    async fn save(&self, reminder: NewReminder) -> Result<i64, StoreError> {
        let key = reminder.notify_time.format(NOTIFY_TIME_FORMAT).to_string();
        let conn = self.conn.lock().await;

        let mut statement = conn
            .prepare("INSERT INTO reminder_tasks (chat_id, message, notify_time) VALUES (?, ?, ?)")?;
        statement.bind((1, reminder.chat_id))?;
        statement.bind((2, reminder.message.as_str()))?;
        statement.bind((3, key.as_str()))?;
        statement.next()?;

        // Same lock guard as the insert, so the rowid cannot belong to
        // another writer.
        let mut statement = conn.prepare("SELECT last_insert_rowid()")?;
        statement.next()?;
        Ok(statement.read::<i64, _>(0)?)
    }

    async fn find_by_notify_time(
        &self,
        minute: NaiveDateTime,
    ) -> Result<Vec<ReminderTask>, StoreError> {
        let key = minute.format(NOTIFY_TIME_FORMAT).to_string();
        let conn = self.conn.lock().await;

        let mut statement = conn.prepare(
            "SELECT id, chat_id, message, notify_time FROM reminder_tasks WHERE notify_time = ?",
        )?;
        statement.bind((1, key.as_str()))?;

        let mut tasks = Vec::new();
        while let State::Row = statement.next()? {
            tasks.push(read_task(&statement)?);
        }
        Ok(tasks)
    }

    async fn delete(&self, task: &ReminderTask) -> Result<(), StoreError> {
        let conn = self.conn.lock().await;
        let mut statement = conn.prepare("DELETE FROM reminder_tasks WHERE id = ?")?;
        statement.bind((1, task.id))?;
        statement.next()?;
        Ok(())
    }
}

fn read_task(statement: &Statement<'_>) -> Result<ReminderTask, StoreError> {
    let id = statement.read::<i64, _>("id")?;
    let value = statement.read::<String, _>("notify_time")?;
    let notify_time = NaiveDateTime::parse_from_str(&value, NOTIFY_TIME_FORMAT)
        .map_err(|_| StoreError::InvalidTimestamp { id, value })?;

    Ok(ReminderTask {
        id,
        chat_id: statement.read::<i64, _>("chat_id")?,
        message: statement.read::<String, _>("message")?,
        notify_time,
    })
}
