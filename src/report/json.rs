// JSON reporter - outputs the run log to a JSON file

use super::Reporter;
use crate::state::{CaseRecord, RunLog};
use anyhow::{Context, Result};
use std::fs::File;
use std::path::PathBuf;

/// JSON reporter
pub struct JsonReporter {
    output_path: PathBuf,
}

impl JsonReporter {
    /// Create new JSON reporter
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }
}

impl Reporter for JsonReporter {
    fn on_test_start(&self, _test_name: &str) {
        // No-op for JSON file reporter
    }

    fn on_test_end(&self, _test_name: &str, _record: &CaseRecord) {
        // No-op: the full log is serialized at suite end
    }

    fn on_suite_end(&self, log: &RunLog) -> Result<()> {
        let file = File::create(&self.output_path).with_context(|| {
            format!(
                "Failed to create JSON report file: {}",
                self.output_path.display()
            )
        })?;

        serde_json::to_writer_pretty(file, log)
            .context("Failed to serialize run log to JSON")?;

        Ok(())
    }
}
