//! The persisted event record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One event as stored in the event log.
///
/// Events are created by the ingestion collaborator when a valid message
/// arrives on the subscribed topic, and are immutable once persisted. The
/// analysis side only ever reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Monotonic per-log identifier, assigned at append time.
    pub id: u64,

    /// Topic the message arrived on.
    pub topic: String,

    /// First name from the message payload.
    pub first_name: String,

    /// Last name from the message payload.
    pub last_name: String,

    /// Instant the message was received.
    pub timestamp: DateTime<Utc>,
}

impl Event {
    /// Build an event record. The id is assigned by the log writer.
    pub fn new(
        id: u64,
        topic: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Event {
            id,
            topic: topic.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            timestamp,
        }
    }
}
