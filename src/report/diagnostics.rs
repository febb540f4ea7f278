// Diagnostics for the check command

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub file: String,
    pub line: usize,
    pub severity: DiagnosticSeverity,
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub diagnostics: Vec<Diagnostic>,
    pub summary: CheckSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckSummary {
    pub total_files: usize,
    pub total_events: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
}

impl Diagnostic {
    pub fn error(file: &str, code: &str, message: &str, line: usize) -> Self {
        Self {
            file: file.to_string(),
            line,
            severity: DiagnosticSeverity::Error,
            code: code.to_string(),
            message: message.to_string(),
        }
    }

    pub fn warning(file: &str, code: &str, message: &str, line: usize) -> Self {
        Self {
            file: file.to_string(),
            line,
            severity: DiagnosticSeverity::Warning,
            code: code.to_string(),
            message: message.to_string(),
        }
    }
}
