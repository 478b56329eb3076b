//! Append-only JSONL event-log writer.
//!
//! Used by the ingestion collaborator: one flushed line per event, so a
//! crash can lose at most the event being written, never corrupt earlier
//! lines.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tempo_common::{Error, Event, Result};
use tracing::debug;

/// Appends events to a JSONL log, assigning monotonic ids.
pub struct JsonlEventWriter {
    path: PathBuf,
    out: BufWriter<File>,
    next_id: u64,
}

impl JsonlEventWriter {
    /// Open the log at `path` for appending, creating it if absent.
    ///
    /// Scans existing lines once to resume the id sequence.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let next_id = match File::open(&path) {
            Ok(file) => highest_id(BufReader::new(file))? + 1,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => 1,
            Err(source) => return Err(Error::Connection { path, source }),
        };

        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .map_err(|source| Error::Connection {
                path: path.clone(),
                source,
            })?;

        Ok(JsonlEventWriter {
            path,
            out: BufWriter::new(file),
            next_id,
        })
    }

    /// Path of the backing log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist one event and return the stored record.
    pub fn append(
        &mut self,
        topic: &str,
        first_name: &str,
        last_name: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<Event> {
        let event = Event::new(self.next_id, topic, first_name, last_name, timestamp);
        let line = serde_json::to_string(&event).map_err(|e| Error::Schema {
            line: 0,
            reason: format!("failed to serialize event: {e}"),
        })?;

        writeln!(self.out, "{line}")?;
        self.out.flush()?;

        debug!(id = event.id, topic = %event.topic, "appended event");
        self.next_id += 1;
        Ok(event)
    }
}

/// Highest id present in an existing log, 0 for an empty log.
fn highest_id<R: BufRead>(reader: R) -> Result<u64> {
    let mut max = 0;
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let event: Event = serde_json::from_str(&line).map_err(|e| Error::Schema {
            line: idx + 1,
            reason: e.to_string(),
        })?;
        max = max.max(event.id);
    }
    Ok(max)
}
