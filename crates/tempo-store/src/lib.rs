//! Event Tempo event-log storage.
//!
//! The persisted event log is one JSON object per line (JSONL), appended
//! by the ingestion collaborator and read here as a static snapshot for
//! analysis. The statistical core never touches storage directly; it goes
//! through the [`EventStore`] trait so the log format can be swapped
//! without touching the pipeline.

pub mod log;
pub mod writer;

use chrono::{DateTime, Utc};
use tempo_common::{Event, Result};

pub use log::JsonlEventStore;
pub use writer::JsonlEventWriter;

/// Read access to a persisted event snapshot.
///
/// Implementations must map their failure modes onto the shared taxonomy:
/// an unreachable backing store is `Error::Connection`, a record that does
/// not match the expected event shape is `Error::Schema`, and an empty
/// result set is simply an empty vector (the pipeline decides whether
/// that is fatal).
pub trait EventStore {
    /// All stored events, optionally restricted to one topic.
    ///
    /// Returned in storage order; callers that need temporal order sort
    /// explicitly.
    fn list_events(&self, topic: Option<&str>) -> Result<Vec<Event>>;

    /// Timestamps of all stored events, optionally restricted to one
    /// topic, in storage order.
    fn list_timestamps(&self, topic: Option<&str>) -> Result<Vec<DateTime<Utc>>> {
        Ok(self
            .list_events(topic)?
            .into_iter()
            .map(|e| e.timestamp)
            .collect())
    }
}
