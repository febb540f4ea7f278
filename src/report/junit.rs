// JUnit reporter - outputs the run log in JUnit XML format

use super::Reporter;
use crate::state::{CaseRecord, CaseStatus, RunLog};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

/// JUnit reporter
pub struct JunitReporter {
    output_path: PathBuf,
}

impl JunitReporter {
    /// Create new JUnit reporter
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

impl Reporter for JunitReporter {
    fn on_test_start(&self, _test_name: &str) {
        // No-op for JUnit file reporter
    }

    fn on_test_end(&self, _test_name: &str, _record: &CaseRecord) {
        // No-op for standard JUnit report
    }

    fn on_suite_end(&self, log: &RunLog) -> Result<()> {
        let suite_secs = log.metrics.total_duration_ms as f64 / 1000.0;

        let mut xml = String::new();
        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str(&format!(
            "<testsuites name=\"reportify\" time=\"{:.3}\" tests=\"{}\" failures=\"{}\" errors=\"{}\" skipped=\"{}\">\n",
            suite_secs,
            log.total(),
            log.failed(),
            log.errors(),
            log.skipped()
        ));

        xml.push_str(&format!(
            "  <testsuite name=\"e2e\" time=\"{:.3}\" tests=\"{}\" failures=\"{}\" errors=\"{}\" skipped=\"{}\">\n",
            suite_secs,
            log.total(),
            log.failed(),
            log.errors(),
            log.skipped()
        ));

        for record in log.all() {
            // The user story the case belongs to doubles as the classname
            xml.push_str(&format!(
                "    <testcase name=\"{}\" classname=\"{}\" time=\"{:.3}\">\n",
                escape_xml(&record.name),
                escape_xml(&record.story),
                record.duration_secs
            ));

            let message = escape_xml(&record.error_message);
            match record.status {
                CaseStatus::Failed => {
                    xml.push_str(&format!(
                        "      <failure message=\"{}\" type=\"AssertionError\">{}</failure>\n",
                        message, message
                    ));
                }
                CaseStatus::Error => {
                    xml.push_str(&format!(
                        "      <error message=\"{}\" type=\"ExecutionError\">{}</error>\n",
                        message, message
                    ));
                }
                CaseStatus::Skipped => {
                    xml.push_str(&format!("      <skipped message=\"{}\" />\n", message));
                }
                CaseStatus::Passed => {}
            }

            xml.push_str("    </testcase>\n");
        }

        xml.push_str("  </testsuite>\n");
        xml.push_str("</testsuites>\n");

        let mut file = File::create(&self.output_path).with_context(|| {
            format!(
                "Failed to create JUnit report file: {}",
                self.output_path.display()
            )
        })?;

        file.write_all(xml.as_bytes())
            .context("Failed to write JUnit XML content")?;

        Ok(())
    }
}
