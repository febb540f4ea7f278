// Console reporter - pytest-style output

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::cli::ProgressMode;
use crate::state::{CaseRecord, CaseStatus, RunLog};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Run context shown in the report footer
#[derive(Debug, Clone)]
pub struct RunInfo {
    pub output_dir: String,
    pub event_files: usize,
    pub sheet_enabled: bool,
}

/// Console reporter
pub struct ConsoleReporter {
    mode: ProgressMode,
    progress_bar: ProgressBar,
    run_info: RunInfo,
    dots_lock: Mutex<()>,
    dots_count: AtomicUsize,
}

impl ConsoleReporter {
    /// Create new console reporter
    pub fn new(mode: ProgressMode, total_tests: u64, run_info: RunInfo) -> Self {
        let progress_bar = if matches!(mode, ProgressMode::Bar) {
            let pb = ProgressBar::new(total_tests);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{bar:40} {pos}/{len} {msg}")
                    .unwrap(),
            );
            pb
        } else {
            ProgressBar::hidden()
        };

        Self {
            mode,
            progress_bar,
            run_info,
            dots_lock: Mutex::new(()),
            dots_count: AtomicUsize::new(0),
        }
    }

    /// Print summary
    pub fn print_summary(&self, log: &RunLog) {
        self.progress_bar.finish_and_clear();

        let total = log.total();
        let duration_ms = log.metrics.total_duration_ms;

        println!();
        println!(
            "════════════════════════════════════════════════════════════════════════════════"
        );
        if log.all_passed() {
            println!(
                "{} ({} passed in {}ms)",
                style("✅ PASSED").green().bold(),
                log.passed(),
                duration_ms
            );
        } else {
            println!(
                "{} ({} failed, {} error(s), {} passed in {}ms)",
                style("❌ FAILED").red().bold(),
                log.failed(),
                log.errors(),
                log.passed(),
                duration_ms
            );
        }
        println!(
            "────────────────────────────────────────────────────────────────────────────────"
        );
        println!("📊 Execution Statistics:");
        println!("   • Total tests: {}", total);
        println!("   • Passed: {}", log.passed());
        println!("   • Failed: {}", log.failed());
        println!("   • Skipped: {}", log.skipped());
        println!("   • Errors: {}", log.errors());
        println!("   • Duration: {}ms", duration_ms);

        if total > 0 {
            println!("   • Success rate: {:.2}% ({}/{})", log.pass_rate(), log.passed(), total);
        } else {
            println!("   • Success rate: N/A (no tests executed)");
        }

        if log.metrics.degraded_events > 0 {
            println!(
                "   • Degraded events: {} (recorded as ERROR)",
                log.metrics.degraded_events
            );
        }

        println!(
            "────────────────────────────────────────────────────────────────────────────────"
        );

        // Failed Tests Section
        let failures: Vec<&CaseRecord> = log.all().iter().filter(|r| r.is_failure()).collect();
        if !failures.is_empty() {
            println!("❌ Failed Tests:");
            for record in failures {
                println!(
                    "   • {} [{}] ({:.2}s)",
                    record.name, record.story, record.duration_secs
                );
                if !record.error_message.is_empty() {
                    println!("      Error: {}", record.error_message);
                }
            }
        }

        // Environment Section
        println!("🔧 Environment:");
        println!("   • Output directory: {}", self.run_info.output_dir);
        println!("   • Event files: {}", self.run_info.event_files);
        println!(
            "   • Spreadsheet report: {}",
            if self.run_info.sheet_enabled {
                "enabled"
            } else {
                "disabled"
            }
        );
        println!(
            "════════════════════════════════════════════════════════════════════════════════"
        );
        println!();
    }

    /// Print slowest tests
    pub fn print_slowest_tests(&self, records: &[CaseRecord], limit: usize) {
        if matches!(self.mode, ProgressMode::Verbose) {
            if records.is_empty() {
                return;
            }

            let mut sorted = records.to_vec();
            sorted.sort_by(|a, b| {
                b.duration_secs
                    .partial_cmp(&a.duration_secs)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            println!("🐢 Slowest Tests:");
            let count = limit.min(sorted.len());
            for (i, record) in sorted.iter().take(count).enumerate() {
                println!("   {}. {} ({:.2}s)", i + 1, record.name, record.duration_secs);
            }
            println!();
        }
    }
}

impl super::Reporter for ConsoleReporter {
    fn on_test_start(&self, test_name: &str) {
        if matches!(self.mode, ProgressMode::Verbose) {
            println!("Recording {} ... ", test_name);
        }
    }

    fn on_test_end(&self, _test_name: &str, record: &CaseRecord) {
        match self.mode {
            ProgressMode::Dots => {
                let char = match record.status {
                    CaseStatus::Passed => ".",
                    CaseStatus::Failed => "F",
                    CaseStatus::Skipped => "S",
                    CaseStatus::Error => "E",
                };

                let _guard = self.dots_lock.lock().unwrap();
                print!("{}", char);
                use std::io::Write;
                std::io::stdout().flush().unwrap();

                let count = self.dots_count.fetch_add(1, Ordering::Relaxed) + 1;
                if count >= 80 {
                    println!();
                    self.dots_count.store(0, Ordering::Relaxed);
                }
            }
            ProgressMode::Bar => {
                self.progress_bar.inc(1);
            }
            ProgressMode::Verbose => match record.status {
                CaseStatus::Passed => println!("{}", style("✅ PASSED").green()),
                CaseStatus::Failed => println!(
                    "{}: {}",
                    style("❌ FAILED").red(),
                    record.error_message
                ),
                CaseStatus::Skipped => println!("{}", style("🔍 SKIPPED").yellow()),
                CaseStatus::Error => println!(
                    "{}: {}",
                    style("💥 ERROR").red().bold(),
                    record.error_message
                ),
            },
            ProgressMode::None => {}
        }
    }

    fn on_suite_end(&self, log: &RunLog) -> anyhow::Result<()> {
        // Ensure newline after dots
        if matches!(self.mode, ProgressMode::Dots) && self.dots_count.load(Ordering::Relaxed) > 0 {
            println!();
        }

        self.print_summary(log);

        // Slowest tests (top 5), verbose only
        self.print_slowest_tests(log.all(), 5);

        Ok(())
    }
}
