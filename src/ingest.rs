// Raw outcome event decoding
// One JSON object per line, one line per finished test

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Separator between the originating file and the test name in the
/// `test` field, e.g. `tests/test_02_login.py::test_login_exitoso`.
const TEST_PATH_SEPARATOR: &str = "::";

/// One outcome event as emitted by the test-execution layer
#[derive(Debug, Clone, Deserialize)]
pub struct RawOutcome {
    /// `<file path>::<test name>`; a bare value is taken as the test name
    pub test: String,
    /// One of `passed`, `failed`, `skipped`, `error` (case-insensitive)
    pub status: String,
    /// Elapsed seconds
    #[serde(default)]
    pub duration: f64,
    /// Failure diagnostic, when present
    #[serde(default)]
    pub message: Option<String>,
}

impl RawOutcome {
    /// File-path part of the `test` field, empty when absent
    pub fn test_file(&self) -> &str {
        match self.test.rsplit_once(TEST_PATH_SEPARATOR) {
            Some((file, _)) => file,
            None => "",
        }
    }

    /// Test-name part of the `test` field
    pub fn test_name(&self) -> &str {
        match self.test.rsplit_once(TEST_PATH_SEPARATOR) {
            Some((_, name)) => name,
            None => &self.test,
        }
    }

    /// Stand-in for a line that could not be decoded. The record it turns
    /// into carries ERROR status and a generic message, so one bad
    /// observation never aborts the rest of the run.
    fn malformed(line_number: usize) -> Self {
        Self {
            test: format!("event_line_{}", line_number),
            status: "error".to_string(),
            duration: 0.0,
            message: Some("Malformed outcome event".to_string()),
        }
    }
}

/// Events decoded from one file plus the count of lines that degraded
#[derive(Debug, Default)]
pub struct EventBatch {
    pub events: Vec<RawOutcome>,
    pub degraded: u64,
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read event file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Decode a single event line
pub fn decode_line(line: &str) -> Result<RawOutcome, serde_json::Error> {
    serde_json::from_str(line)
}

/// Read an event file. Blank lines are skipped; undecodable lines degrade
/// to malformed events and are counted. Only the file read itself fails.
pub fn load_events(path: &Path) -> Result<EventBatch, IngestError> {
    let content = std::fs::read_to_string(path).map_err(|source| IngestError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut batch = EventBatch::default();
    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match decode_line(line) {
            Ok(event) => batch.events.push(event),
            Err(e) => {
                warn!(
                    "Undecodable event at {}:{}: {}",
                    path.display(),
                    index + 1,
                    e
                );
                batch.events.push(RawOutcome::malformed(index + 1));
                batch.degraded += 1;
            }
        }
    }

    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_test_field() {
        let event = RawOutcome {
            test: "tests/test_02_login.py::test_login_exitoso".to_string(),
            status: "passed".to_string(),
            duration: 1.0,
            message: None,
        };
        assert_eq!(event.test_file(), "tests/test_02_login.py");
        assert_eq!(event.test_name(), "test_login_exitoso");
    }

    #[test]
    fn test_bare_test_field_has_no_file() {
        let event = RawOutcome {
            test: "test_login_exitoso".to_string(),
            status: "passed".to_string(),
            duration: 1.0,
            message: None,
        };
        assert_eq!(event.test_file(), "");
        assert_eq!(event.test_name(), "test_login_exitoso");
    }

    #[test]
    fn test_decode_line_full_event() {
        let event = decode_line(
            r#"{"test": "tests/test_02_login.py::test_login", "status": "failed", "duration": 0.5, "message": "element not found"}"#,
        )
        .expect("valid event line");

        assert_eq!(event.status, "failed");
        assert_eq!(event.duration, 0.5);
        assert_eq!(event.message.as_deref(), Some("element not found"));
    }

    #[test]
    fn test_decode_line_defaults() {
        let event = decode_line(r#"{"test": "test_a", "status": "passed"}"#)
            .expect("valid event line");

        assert_eq!(event.duration, 0.0);
        assert!(event.message.is_none());
    }

    #[test]
    fn test_decode_line_rejects_garbage() {
        assert!(decode_line("not json at all").is_err());
        assert!(decode_line(r#"{"status": "passed"}"#).is_err());
    }
}
