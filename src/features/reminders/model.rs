//! Reminder task records and minute-resolution time handling

use chrono::{NaiveDateTime, Timelike};

/// Storage format for notify_time values. Minute resolution and sortable,
/// so the due-minute lookup is a plain string equality against the index.
pub const NOTIFY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A reminder persisted in the store, identified by its row id.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderTask {
    pub id: i64,
    pub chat_id: i64,
    pub message: String,
    pub notify_time: NaiveDateTime,
}

/// A parsed reminder that has not been saved yet; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReminder {
    pub chat_id: i64,
    pub message: String,
    pub notify_time: NaiveDateTime,
}

/// Zero out seconds and sub-second precision. Scheduling works in whole
/// minutes; anything finer must never reach the store.
pub fn truncate_to_minute(ts: NaiveDateTime) -> NaiveDateTime {
    ts.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(ts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_truncate_drops_seconds_and_nanos() {
        let ts = NaiveDate::from_ymd_opt(2023, 11, 4)
            .unwrap()
            .and_hms_nano_opt(8, 0, 42, 123_456_789)
            .unwrap();

        let truncated = truncate_to_minute(ts);

        assert_eq!(truncated.second(), 0);
        assert_eq!(truncated.nanosecond(), 0);
        assert_eq!(truncated.hour(), 8);
        assert_eq!(truncated.minute(), 0);
    }

    #[test]
    fn test_truncate_is_idempotent() {
        let ts = NaiveDate::from_ymd_opt(2023, 11, 4)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();

        assert_eq!(truncate_to_minute(ts), ts);
    }

    #[test]
    fn test_storage_format_round_trips() {
        let ts = NaiveDate::from_ymd_opt(2023, 11, 4)
            .unwrap()
            .and_hms_opt(8, 5, 0)
            .unwrap();

        let encoded = ts.format(NOTIFY_TIME_FORMAT).to_string();
        assert_eq!(encoded, "2023-11-04 08:05");

        let decoded = NaiveDateTime::parse_from_str(&encoded, NOTIFY_TIME_FORMAT).unwrap();
        assert_eq!(decoded, ts);
    }
}
