// Case record structures

use crate::ingest::RawOutcome;
use crate::state::story::StoryMap;
use serde::Serialize;

/// Maximum length kept from a failure diagnostic, in characters.
pub const DEFAULT_MAX_ERROR_LEN: usize = 200;

/// Placeholder for the case identifier column. The source suites never
/// assign real identifiers, so the column stays unset.
pub const CASE_ID_PLACEHOLDER: &str = "N/A";

/// Terminal outcome of one executed test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CaseStatus {
    Passed,
    Failed,
    Skipped,
    Error,
}

impl CaseStatus {
    /// Display form used in every report column
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::Passed => "PASSED",
            CaseStatus::Failed => "FAILED",
            CaseStatus::Skipped => "SKIPPED",
            CaseStatus::Error => "ERROR",
        }
    }

    /// Recognize a raw status word; `None` for anything unknown
    pub fn from_word(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "passed" | "pass" => Some(CaseStatus::Passed),
            "failed" | "fail" => Some(CaseStatus::Failed),
            "skipped" | "skip" => Some(CaseStatus::Skipped),
            "error" => Some(CaseStatus::Error),
            _ => None,
        }
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One record per executed test
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseRecord {
    pub case_id: String,
    pub story: String,
    pub name: String,
    pub description: String,
    pub status: CaseStatus,
    pub duration_secs: f64,
    pub error_message: String,
    pub recorded_at: i64,
}

impl CaseRecord {
    /// Build a record from a raw outcome event. Total: malformed input
    /// degrades to sentinel values, it never fails. The observation hook
    /// this runs in must not crash the run it is watching.
    pub fn from_raw(raw: &RawOutcome, stories: &StoryMap, max_error_len: usize) -> Self {
        let name = raw.test_name().to_string();
        let (status, message) = resolve_status(raw);

        Self {
            case_id: CASE_ID_PLACEHOLDER.to_string(),
            story: stories.resolve(raw.test_file()).to_string(),
            description: describe(&name),
            name,
            status,
            duration_secs: raw.duration.max(0.0),
            error_message: truncate_message(&message, max_error_len),
            recorded_at: chrono::Utc::now().timestamp(),
        }
    }

    /// Create a passed record
    pub fn passed(name: impl Into<String>, story: impl Into<String>, duration_secs: f64) -> Self {
        Self {
            case_id: CASE_ID_PLACEHOLDER.to_string(),
            story: story.into(),
            description: String::new(),
            name: name.into(),
            status: CaseStatus::Passed,
            duration_secs: duration_secs.max(0.0),
            error_message: String::new(),
            recorded_at: chrono::Utc::now().timestamp(),
        }
        .with_derived_description()
    }

    /// Create a failed record
    pub fn failed(
        name: impl Into<String>,
        story: impl Into<String>,
        duration_secs: f64,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            case_id: CASE_ID_PLACEHOLDER.to_string(),
            story: story.into(),
            description: String::new(),
            name: name.into(),
            status: CaseStatus::Failed,
            duration_secs: duration_secs.max(0.0),
            error_message: truncate_message(&error_message.into(), DEFAULT_MAX_ERROR_LEN),
            recorded_at: chrono::Utc::now().timestamp(),
        }
        .with_derived_description()
    }

    /// Create a skipped record
    pub fn skipped(
        name: impl Into<String>,
        story: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            case_id: CASE_ID_PLACEHOLDER.to_string(),
            story: story.into(),
            description: String::new(),
            name: name.into(),
            status: CaseStatus::Skipped,
            duration_secs: 0.0,
            error_message: truncate_message(&reason.into(), DEFAULT_MAX_ERROR_LEN),
            recorded_at: chrono::Utc::now().timestamp(),
        }
        .with_derived_description()
    }

    fn with_derived_description(mut self) -> Self {
        self.description = describe(&self.name);
        self
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.status, CaseStatus::Failed | CaseStatus::Error)
    }
}

/// Map the raw status word to a `CaseStatus` plus the message that should
/// accompany it. Unknown words degrade to `Error` with a generic message.
fn resolve_status(raw: &RawOutcome) -> (CaseStatus, String) {
    let message = raw.message.clone().unwrap_or_default();
    match CaseStatus::from_word(&raw.status) {
        Some(CaseStatus::Passed) => (CaseStatus::Passed, String::new()),
        Some(CaseStatus::Failed) => (
            CaseStatus::Failed,
            if message.is_empty() {
                "Test failed".to_string()
            } else {
                message
            },
        ),
        Some(CaseStatus::Skipped) => (
            CaseStatus::Skipped,
            if message.is_empty() {
                "Test skipped".to_string()
            } else {
                message
            },
        ),
        Some(CaseStatus::Error) => (
            CaseStatus::Error,
            if message.is_empty() {
                "Unknown error".to_string()
            } else {
                message
            },
        ),
        None => (CaseStatus::Error, "Unknown error".to_string()),
    }
}

/// Derive human-readable prose from a test name: drop the `test_`
/// convention, separators become spaces, sentence-case the result.
pub fn describe(test_name: &str) -> String {
    let stripped = test_name.replace("test_", "").replace('_', " ");
    let mut chars = stripped.chars();
    match chars.next() {
        Some(first) => {
            first.to_uppercase().collect::<String>() + chars.as_str().to_lowercase().as_str()
        }
        None => String::new(),
    }
}

/// Truncate a diagnostic to at most `max_len` characters, never splitting
/// a multi-byte character.
pub fn truncate_message(message: &str, max_len: usize) -> String {
    match message.char_indices().nth(max_len) {
        Some((byte_idx, _)) => message[..byte_idx].to_string(),
        None => message.to_string(),
    }
}
