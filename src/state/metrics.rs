// Run metrics

use chrono::Utc;
use serde::Serialize;

/// Wall-clock bookkeeping for a run
#[derive(Debug, Clone, Serialize)]
pub struct RunMetrics {
    pub total_duration_ms: u64,
    pub start_time: i64,
    pub end_time: i64,
    /// Outcome events that could not be decoded and were degraded to ERROR
    pub degraded_events: u64,
}

impl Default for RunMetrics {
    fn default() -> Self {
        Self {
            total_duration_ms: 0,
            start_time: Utc::now().timestamp(),
            end_time: 0,
            degraded_events: 0,
        }
    }
}
