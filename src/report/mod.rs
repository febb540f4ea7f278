// Report module - console output and persisted reports

pub mod console;
pub mod diagnostics;
pub mod json;
pub mod junit;
pub mod sheet;

use crate::state::{CaseRecord, RunLog};
use anyhow::Result;
pub use console::ConsoleReporter;
pub use diagnostics::{CheckReport, CheckSummary, Diagnostic, DiagnosticSeverity};
pub use json::JsonReporter;
pub use junit::JunitReporter;
pub use sheet::SheetReporter;

/// Reporter trait
pub trait Reporter: Send + Sync {
    /// Called when a test starts
    fn on_test_start(&self, test_name: &str);

    /// Called when a test finishes
    fn on_test_end(&self, test_name: &str, record: &CaseRecord);

    /// Called when the entire run finishes
    fn on_suite_end(&self, log: &RunLog) -> Result<()>;
}
