pub mod cli;
pub mod config;
pub mod ingest;
pub mod logging;
pub mod report;
pub mod state;
pub mod utils;

pub use ingest::RawOutcome;
pub use state::{CaseRecord, CaseStatus, RunLog};
