//! Two-stage reminder parsing
//!
//! Stage one is lexical: an anchored regex decides whether the input has the
//! `DD.MM.YYYY HH:MM <text>` shape at all. Stage two is semantic: the
//! captured timestamp must be a real calendar date-time. The split keeps
//! "day 32" apart from "not a reminder at all", and the two rejections drive
//! different replies.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use chrono::NaiveDateTime;
use regex::Regex;

use super::model::truncate_to_minute;

/// Exact text of the greeting command. Anything appended to it is no longer
/// the command and falls through to normal parsing.
pub const START_COMMAND: &str = "/start";

/// Timestamp format users type, e.g. `04.11.2023 08:00`.
pub const INPUT_TIME_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Lexical shape: a two-digit day/month, four-digit year, 24h time, then at
/// least one whitespace and a body of Latin or Cyrillic letters, digits,
/// whitespace, commas and periods.
const REMINDER_SHAPE: &str =
    r"^(\d{2}\.\d{2}\.\d{4}\s\d{2}:\d{2})\s+([0-9A-Za-zА-Яа-яЁё\s,\.]+)$";

/// Control strings matched exactly, before any reminder parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    Start,
}

/// Why an input was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The input does not have the timestamp-plus-body shape.
    MalformedInput,
    /// Right shape, but the timestamp is not a real calendar date-time.
    InvalidDateTime,
}

/// A reminder extracted from user text, not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedReminder {
    pub message: String,
    pub notify_time: NaiveDateTime,
}

/// Result of running one piece of user text through the parser.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    Command(BotCommand),
    Task(ParsedReminder),
    Rejected(RejectReason),
}

/// Turns raw message text into reminders. Pure and stateless apart from the
/// compiled shape pattern, so one instance is shared across tasks.
pub struct ReminderParser {
    shape: Regex,
}

impl ReminderParser {
    pub fn new() -> Self {
        ReminderParser {
            shape: Regex::new(REMINDER_SHAPE).unwrap(),
        }
    }

    /// Classify one inbound text. Never errors; every input maps to exactly
    /// one outcome.
    pub fn parse(&self, text: &str) -> ParseOutcome {
        if text == START_COMMAND {
            return ParseOutcome::Command(BotCommand::Start);
        }

        let captures = match self.shape.captures(text) {
            Some(captures) => captures,
            None => return ParseOutcome::Rejected(RejectReason::MalformedInput),
        };

        // The body group admits whitespace, so a timestamp followed by only
        // spaces still matches the shape; treat that as no body at all
        let message = captures[2].trim();
        if message.is_empty() {
            return ParseOutcome::Rejected(RejectReason::MalformedInput);
        }

        let notify_time = match NaiveDateTime::parse_from_str(&captures[1], INPUT_TIME_FORMAT) {
            Ok(ts) => ts,
            Err(_) => return ParseOutcome::Rejected(RejectReason::InvalidDateTime),
        };

        ParseOutcome::Task(ParsedReminder {
            message: message.to_string(),
            notify_time: truncate_to_minute(notify_time),
        })
    }
}

impl Default for ReminderParser {
    fn default() -> Self {
        Self::new()
    }
}
