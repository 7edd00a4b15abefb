//! Operator-facing service log sink.
//!
//! # Responsibilities
//! - Append one timestamped line per lifecycle transition, connection event
//!   and error: `YYYY-MM-DD HH:MM:SS - <message>`
//! - Flush after every line so the log survives an abrupt stop
//! - Never let sink failures alter core behavior
//!
//! # Design Decisions
//! - Separate from `tracing`: this is the operator artifact, tracing is the
//!   developer diagnostic channel
//! - A sink that failed to open degrades to a no-op; write failures are
//!   reported on the debug channel only

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Append-only, timestamped line sink shared across the service.
///
/// Cheap to clone; all clones append to the same file.
#[derive(Clone)]
pub struct ServiceLog {
    file: Arc<Mutex<Option<File>>>,
}

impl ServiceLog {
    /// A sink with no backing file. Every write is a no-op.
    pub fn closed() -> Self {
        Self {
            file: Arc::new(Mutex::new(None)),
        }
    }

    /// Open (or create) the log file in append mode. Best-effort: on failure
    /// the sink stays closed and the error goes to the debug channel.
    pub fn open(&self, path: &Path) {
        match OpenOptions::new().append(true).create(true).open(path) {
            Ok(file) => {
                let mut slot = self.lock();
                *slot = Some(file);
            }
            Err(error) => {
                tracing::debug!(path = %path.display(), error = %error, "Failed to open service log");
            }
        }
    }

    /// Whether a backing file is attached.
    pub fn is_open(&self) -> bool {
        self.lock().is_some()
    }

    /// Append one timestamped line. Silent no-op when the sink is closed;
    /// write failures never escalate.
    pub fn line(&self, message: &str) {
        let mut slot = self.lock();
        let Some(file) = slot.as_mut() else {
            return;
        };
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        if let Err(error) = writeln!(file, "{} - {}", timestamp, message).and_then(|_| file.flush())
        {
            tracing::debug!(error = %error, "Failed to write service log line");
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<File>> {
        self.file.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Default log location, mirroring a temp-directory service log.
pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join("pulsed.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_format_is_timestamp_dash_message() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("service.log");

        let log = ServiceLog::closed();
        log.open(&path);
        assert!(log.is_open());
        log.line("=== Service Started ===");

        let content = std::fs::read_to_string(&path).expect("log readable");
        let line = content.lines().next().expect("one line");
        let (timestamp, message) = line.split_once(" - ").expect("separator present");
        // 2024-01-02 03:04:05
        assert_eq!(timestamp.len(), 19);
        assert_eq!(timestamp.as_bytes()[4], b'-');
        assert_eq!(timestamp.as_bytes()[10], b' ');
        assert_eq!(timestamp.as_bytes()[13], b':');
        assert_eq!(message, "=== Service Started ===");
    }

    #[test]
    fn lines_append_in_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("service.log");

        let log = ServiceLog::closed();
        log.open(&path);
        log.line("first");
        log.clone().line("second");

        let content = std::fs::read_to_string(&path).expect("log readable");
        let messages: Vec<&str> = content
            .lines()
            .map(|l| l.split_once(" - ").expect("separator").1)
            .collect();
        assert_eq!(messages, ["first", "second"]);
    }

    #[test]
    fn closed_sink_is_a_no_op() {
        let log = ServiceLog::closed();
        assert!(!log.is_open());
        // Must not panic or create anything.
        log.line("dropped on the floor");
    }

    #[test]
    fn unopenable_path_degrades_to_no_op() {
        let log = ServiceLog::closed();
        log.open(Path::new("/nonexistent-dir/pulsed/service.log"));
        assert!(!log.is_open());
        log.line("still fine");
    }
}
