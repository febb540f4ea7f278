// State module - run log management
// Centralized accumulation of case records and run metrics

pub mod metrics;
pub mod record;
pub mod story;

pub use metrics::RunMetrics;
pub use record::{CaseRecord, CaseStatus, DEFAULT_MAX_ERROR_LEN};
pub use story::{StoryEntry, StoryMap, UNKNOWN_STORY};

use crate::ingest::RawOutcome;
use serde::Serialize;

/// Ordered log of case records for one run.
///
/// Records are append-only and keep insertion order, which is the order
/// tests finished; every report preserves it. One `RunLog` belongs to one
/// run on one thread — it is not synchronized. A runner that executes
/// tests concurrently must serialize its observation hook or keep one log
/// per worker and merge afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct RunLog {
    total: usize,
    passed: usize,
    failed: usize,
    skipped: usize,
    errors: usize,
    records: Vec<CaseRecord>,
    pub metrics: RunMetrics,
    #[serde(skip)]
    max_error_len: usize,
}

impl Default for RunLog {
    fn default() -> Self {
        Self::new()
    }
}

impl RunLog {
    /// Create an empty run log
    pub fn new() -> Self {
        Self::with_error_limit(DEFAULT_MAX_ERROR_LEN)
    }

    /// Create an empty run log with a custom diagnostic truncation bound
    pub fn with_error_limit(max_error_len: usize) -> Self {
        Self {
            total: 0,
            passed: 0,
            failed: 0,
            skipped: 0,
            errors: 0,
            records: Vec::new(),
            metrics: RunMetrics::default(),
            max_error_len,
        }
    }

    /// Build a record from a raw outcome event and append it. Infallible:
    /// malformed input degrades inside [`CaseRecord::from_raw`]. Returns
    /// the appended record so observation hooks can forward it.
    pub fn record(&mut self, raw: &RawOutcome, stories: &StoryMap) -> &CaseRecord {
        let record = CaseRecord::from_raw(raw, stories, self.max_error_len);
        self.add(record);
        self.records
            .last()
            .expect("record was appended on the line above")
    }

    /// Append an already-built record
    pub fn add(&mut self, record: CaseRecord) {
        self.total += 1;
        match record.status {
            CaseStatus::Passed => self.passed += 1,
            CaseStatus::Failed => self.failed += 1,
            CaseStatus::Skipped => self.skipped += 1,
            CaseStatus::Error => self.errors += 1,
        }
        self.records.push(record);
    }

    /// Get total tests
    pub fn total(&self) -> usize {
        self.total
    }

    /// Get passed tests
    pub fn passed(&self) -> usize {
        self.passed
    }

    /// Get failed tests
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Get skipped tests
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Get errored tests
    pub fn errors(&self) -> usize {
        self.errors
    }

    /// Get all records in insertion order
    pub fn all(&self) -> &[CaseRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Check if the run had no failures or errors
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.errors == 0
    }

    /// Success percentage: passed over total, 0.0 for an empty run
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }
}

impl RunMetrics {
    /// Stamp the end of the run
    pub fn update_time(&mut self) {
        self.end_time = chrono::Utc::now().timestamp();
        self.total_duration_ms = (self.end_time - self.start_time).max(0) as u64 * 1000;
    }
}
