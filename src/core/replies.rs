//! Reply texts sent back to the chat
//!
//! The greeting and the malformed-input reply both embed the same usage
//! example so users always see the expected format next to an error.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

/// One worked example of the expected input format.
pub const USAGE_EXAMPLE: &str = "Example: 04.11.2023 08:00 Water the flowers";

/// Confirmation after a reminder was persisted.
pub const TASK_SAVED: &str =
    "Task has been saved. Rest assured you will get a notification message in the right time.";

/// The input had the right shape but the date or time is not real.
pub const INVALID_DATE_TIME: &str =
    "Please look at the date and time, you have entered the incorrect value.";

/// The update carried no text payload (sticker, photo, voice note).
pub const NON_TEXT_INPUT: &str = "I can only save text messages";

/// Persistence failed; the task was NOT saved.
pub const SAVE_FAILED: &str =
    "Sorry, something went wrong and your task was not saved. Please try again later.";

/// Greeting sent in response to /start.
pub fn start_greeting() -> String {
    format!(
        "Hi there! It's notification bot. I'll notify you when it's time to do a task.\n\
         Type info about your task: date, time, text.\n\
         {USAGE_EXAMPLE}"
    )
}

/// Generic rejection for input that does not look like a reminder at all.
pub fn malformed_input() -> String {
    format!("Something went wrong.\n{USAGE_EXAMPLE}")
}
