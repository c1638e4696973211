//! Word count rows
//!
//! One `WordCount` is one persisted record of the counter table. Rows are
//! append-only: the same word may appear many times, each row with its own
//! identifier and timestamp.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A persisted word-frequency row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    /// Auto-assigned row identifier
    pub id: i64,
    /// The counted word, stored verbatim
    pub word: String,
    /// Cumulative occurrence count supplied by the caller
    pub total_count: i64,
    /// Last-modified time in milliseconds since the Unix epoch
    pub modified_date_millis: i64,
}

impl WordCount {
    /// Last-modified time as a UTC datetime.
    ///
    /// Returns `None` if the stored millisecond value is outside chrono's range.
    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.modified_date_millis).single()
    }
}

impl std::fmt::Display for WordCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {} ({})", self.id, self.word, self.total_count)
    }
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
