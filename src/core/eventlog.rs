//! Append-only event log
//!
//! One line per event: `<timestamp> - <event text>`. No rotation, no
//! structured format. Write failures are never fatal; the guard keeps
//! running and the failure is reported through diagnostics only.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::warn;

use crate::types::GuardEvent;

/// Append-only sink for timestamped guard events
pub trait EventLog {
    fn append(&mut self, now: DateTime<Utc>, event: &GuardEvent);
}

/// Format one log line: RFC3339 timestamp, dash, event text
fn format_line(now: DateTime<Utc>, event: &GuardEvent) -> String {
    format!(
        "{} - {}",
        now.to_rfc3339_opts(SecondsFormat::Secs, true),
        event.message()
    )
}

/// Event log backed by a plain text file
pub struct FileEventLog {
    path: PathBuf,
}

impl FileEventLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventLog for FileEventLog {
    fn append(&mut self, now: DateTime<Utc>, event: &GuardEvent) {
        let line = format_line(now, event);
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| writeln!(file, "{}", line));
        if let Err(e) = result {
            warn!(path = %self.path.display(), error = %e, "event log write failed");
        }
    }
}

/// In-memory event log for tests
#[derive(Debug, Default)]
pub struct MemoryEventLog {
    lines: Vec<String>,
    events: Vec<GuardEvent>,
}

impl MemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn events(&self) -> &[GuardEvent] {
        &self.events
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }
}

impl EventLog for MemoryEventLog {
    fn append(&mut self, now: DateTime<Utc>, event: &GuardEvent) {
        self.lines.push(format_line(now, event));
        self.events.push(event.clone());
    }
}

// =============================================================================
// TESTS
// =============================================================================
