use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

/// A single immutable diary record. Content and timestamp never change
/// after creation; the id is only used for lookup and deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub id: String,
    pub content: String,
    /// Creation time as epoch milliseconds.
    pub timestamp: i64,
}

impl DiaryEntry {
    pub fn new(id: String, content: String, timestamp: i64) -> Self {
        DiaryEntry {
            id,
            content,
            timestamp,
        }
    }

    /// Creation time in the local timezone, for display formatting.
    /// `None` only for timestamps outside chrono's representable range.
    pub fn local_time(&self) -> Option<DateTime<Local>> {
        Local.timestamp_millis_opt(self.timestamp).single()
    }
}
