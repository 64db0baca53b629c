use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// One guestbook entry as stored in the key-value store.
///
/// The JSON field for the message body is `msg`, the same name the submit
/// form uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub name: String,
    pub msg: String,
    pub time: String,
    pub id: String,
}

impl Submission {
    /// Build a record stamped with `at`. The id doubles as the store key.
    pub fn new(name: String, msg: String, at: DateTime<Utc>, offset: &FixedOffset) -> Self {
        Submission {
            name,
            msg,
            time: display_time(at, offset),
            id: at.timestamp_millis().to_string(),
        }
    }
}

/// Render `at` as `YYYY/M/D H:mm:ss` in the given offset. Display only.
pub fn display_time(at: DateTime<Utc>, offset: &FixedOffset) -> String {
    at.with_timezone(offset)
        .format("%Y/%-m/%-d %-H:%M:%S")
        .to_string()
}
