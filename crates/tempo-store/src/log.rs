//! JSONL event-log reader.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tempo_common::{Error, Event, Result};
use tracing::debug;

use crate::EventStore;

/// Read-only view over a JSONL event log.
#[derive(Debug, Clone)]
pub struct JsonlEventStore {
    path: PathBuf,
}

impl JsonlEventStore {
    /// Create a store over the log at `path`. The file is opened lazily on
    /// each query so re-runs always see the current snapshot.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonlEventStore { path: path.into() }
    }

    /// Path of the backing log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<BufReader<File>> {
        let file = File::open(&self.path).map_err(|source| Error::Connection {
            path: self.path.clone(),
            source,
        })?;
        Ok(BufReader::new(file))
    }
}

impl EventStore for JsonlEventStore {
    fn list_events(&self, topic: Option<&str>) -> Result<Vec<Event>> {
        let reader = self.open()?;
        let mut events = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.map_err(|source| Error::Connection {
                path: self.path.clone(),
                source,
            })?;
            if line.trim().is_empty() {
                continue;
            }

            let event: Event = serde_json::from_str(&line).map_err(|e| Error::Schema {
                line: line_no,
                reason: e.to_string(),
            })?;

            match topic {
                Some(t) if event.topic != t => continue,
                _ => events.push(event),
            }
        }

        debug!(
            path = %self.path.display(),
            count = events.len(),
            topic = topic.unwrap_or("<all>"),
            "loaded event snapshot"
        );
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn write_log(dir: &TempDir, lines: &[&str]) -> PathBuf {
        let path = dir.path().join("events.jsonl");
        let mut f = File::create(&path).unwrap();
        for line in lines {
            writeln!(f, "{line}").unwrap();
        }
        path
    }

    #[test]
    fn reads_events_in_storage_order() {
        let dir = TempDir::new().unwrap();
        let path = write_log(
            &dir,
            &[
                r#"{"id":1,"topic":"a","first_name":"X","last_name":"Y","timestamp":"2024-01-01T00:00:05Z"}"#,
                r#"{"id":2,"topic":"a","first_name":"X","last_name":"Y","timestamp":"2024-01-01T00:00:00Z"}"#,
            ],
        );

        let store = JsonlEventStore::new(path);
        let ts = store.list_timestamps(None).unwrap();
        assert_eq!(ts.len(), 2);
        // Storage order preserved, even though timestamps are reversed.
        assert_eq!(ts[0], Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 5).unwrap());
        assert_eq!(ts[1], Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn topic_filter_restricts_rows() {
        let dir = TempDir::new().unwrap();
        let path = write_log(
            &dir,
            &[
                r#"{"id":1,"topic":"a","first_name":"X","last_name":"Y","timestamp":"2024-01-01T00:00:00Z"}"#,
                r#"{"id":2,"topic":"b","first_name":"X","last_name":"Y","timestamp":"2024-01-01T00:00:01Z"}"#,
                r#"{"id":3,"topic":"a","first_name":"X","last_name":"Y","timestamp":"2024-01-01T00:00:02Z"}"#,
            ],
        );

        let store = JsonlEventStore::new(path);
        let events = store.list_events(Some("a")).unwrap();
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.topic == "a"));
    }

    #[test]
    fn missing_file_is_a_connection_error() {
        let dir = TempDir::new().unwrap();
        let store = JsonlEventStore::new(dir.path().join("missing.jsonl"));
        let err = store.list_timestamps(None).unwrap_err();
        assert!(matches!(err, Error::Connection { .. }));
    }

    #[test]
    fn missing_timestamp_field_is_a_schema_error() {
        let dir = TempDir::new().unwrap();
        let path = write_log(
            &dir,
            &[r#"{"id":1,"topic":"a","first_name":"X","last_name":"Y"}"#],
        );

        let store = JsonlEventStore::new(path);
        let err = store.list_timestamps(None).unwrap_err();
        match err {
            Error::Schema { line, reason } => {
                assert_eq!(line, 1);
                assert!(reason.contains("timestamp"));
            }
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn empty_log_yields_empty_snapshot_not_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write_log(&dir, &[]);
        let store = JsonlEventStore::new(path);
        assert!(store.list_timestamps(None).unwrap().is_empty());
    }

    #[test]
    fn blank_lines_are_skipped() {
        let dir = TempDir::new().unwrap();
        let path = write_log(
            &dir,
            &[
                r#"{"id":1,"topic":"a","first_name":"X","last_name":"Y","timestamp":"2024-01-01T00:00:00Z"}"#,
                "",
            ],
        );
        let store = JsonlEventStore::new(path);
        assert_eq!(store.list_timestamps(None).unwrap().len(), 1);
    }
}
