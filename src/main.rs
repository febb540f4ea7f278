// Main entry point for reportify

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

// Import from library
use reportify::cli;
use reportify::config;
use reportify::ingest;
use reportify::report;
use reportify::state;
use reportify::utils;

use cli::{
    Cli, Commands, LogFormat,
    args::{CheckArgs, RenderArgs},
};
use report::{ConsoleReporter, JsonReporter, JunitReporter, Reporter, SheetReporter};
use state::RunLog;
use utils::FileUtils;

use std::path::PathBuf;

fn main() -> Result<()> {
    // Load configuration from file (if exists)
    let config = config::Config::load();

    let cli = Cli::parse();

    reportify::logging::init(cli.verbose);

    if cli.no_color {
        console::set_colors_enabled(false);
    }

    if cli.verbose {
        info!("Starting reportify v{}", env!("CARGO_PKG_VERSION"));
    }

    // Handle config flag
    if cli.config {
        print_configuration(&cli, config.as_ref());
        return Ok(());
    }

    // Handle init_config flag
    if let Some(config_file) = cli.init_config {
        let config = config::Config::default();
        let toml_content = config.to_toml();
        std::fs::write(&config_file, toml_content)?;
        println!("Configuration file created: {}", config_file.display());
        println!("\nYou can now edit the file to customize your settings.");
        println!("\nConfiguration precedence:");
        println!("  1. Command-line arguments (highest)");
        println!("  2. Configuration file");
        println!("  3. Environment variables");
        println!("  4. Built-in defaults (lowest)");
        return Ok(());
    }

    // Handle completion flag
    if let Some(shell_type) = cli.completion {
        handle_completion(&shell_type)?;
        return Ok(());
    }

    match &cli.command {
        Some(Commands::Check(args)) => handle_check(args),
        Some(Commands::Render(args)) => render_reports(&cli, args, config.as_ref()),
        None => {
            // Implicit Render
            let args = cli.render_args.clone();
            if args.event_paths.is_empty() {
                warn!("No event files provided. Use 'reportify --help' for usage.");
                return Ok(());
            }
            render_reports(&cli, &args, config.as_ref())
        }
    }
}

fn print_configuration(cli: &Cli, config: Option<&config::Config>) {
    println!("Current configuration:");
    println!("\n  Command-line arguments:");
    let args = cli.get_render_args();
    println!(
        "    Output directory: {}",
        args.output_dir
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(not set)".to_string())
    );
    println!("    Sort mode: {}", args.sort);
    println!("    Spreadsheet report: {}", !args.no_sheet);
    if let Some(ref log_format) = args.log_format {
        println!("    Log format: {}", log_format);
    }
    if let Some(ref log_output) = args.log_output {
        println!("    Log output: {}", log_output.display());
    }

    if let Some(cfg) = config {
        println!("\n  Configuration file loaded:");
        println!("    Output directory: {}", cfg.general.output_dir);
        println!("    Max error length: {}", cfg.general.max_error_len);
        if let Some(ref log_format) = cfg.general.log_format {
            println!("    Log format: {}", log_format);
        }
        if let Some(ref log_output) = cfg.general.log_output {
            println!("    Log output: {}", log_output);
        }
        println!("    Progress mode: {}", cfg.progress.mode);
        println!(
            "    Color: {}",
            if cfg.progress.color {
                "enabled"
            } else {
                "disabled"
            }
        );
        if !cfg.stories.is_empty() {
            println!("    Story table: {} override(s)", cfg.stories.len());
        }
    } else {
        println!("\n  No configuration file loaded");
        println!("  Create one with: reportify --init-config .reportifyrc.toml");
    }

    println!("\n  Environment variables:");
    if let Ok(dir) = std::env::var(config::ENV_REPORTIFY_OUTPUT_DIR) {
        println!("    {}: {}", config::ENV_REPORTIFY_OUTPUT_DIR, dir);
    } else {
        println!(
            "    {}: not set (default: {})",
            config::ENV_REPORTIFY_OUTPUT_DIR,
            config::default_output_dir()
        );
    }

    println!("\nConfiguration precedence:");
    println!("  1. Command-line arguments (highest)");
    println!("  2. Configuration file");
    println!("  3. Environment variables");
    println!("  4. Built-in defaults (lowest)");
}

fn handle_completion(shell_type: &str) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{Shell, generate};

    let shell = match shell_type {
        "bash" => Shell::Bash,
        "zsh" => Shell::Zsh,
        "fish" => Shell::Fish,
        "elvish" => Shell::Elvish,
        "powershell" => Shell::PowerShell,
        _ => {
            eprintln!("Error: Unsupported shell type '{}'", shell_type);
            eprintln!("Supported shells: bash, zsh, fish, elvish, powershell");
            return Err(anyhow::anyhow!("Unsupported shell type"));
        }
    };

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, &bin_name, &mut std::io::stdout());

    Ok(())
}

/// Output directory, by precedence: CLI argument, config file, environment
/// variable, built-in default.
fn resolve_output_dir(args: &RenderArgs, config: Option<&config::Config>) -> PathBuf {
    if let Some(dir) = &args.output_dir {
        return dir.clone();
    }

    if let Some(cfg) = config {
        if cfg.general.output_dir != config::default_output_dir() {
            return PathBuf::from(&cfg.general.output_dir);
        }
    }

    if let Ok(dir) = std::env::var(config::ENV_REPORTIFY_OUTPUT_DIR) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }

    PathBuf::from(config::default_output_dir())
}

fn render_reports(cli: &Cli, args: &RenderArgs, config: Option<&config::Config>) -> Result<()> {
    // Collect event files
    let mut event_files = Vec::new();
    for path in &args.event_paths {
        if path.is_dir() {
            event_files.extend(FileUtils::collect_event_files(path));
        } else if path.is_file() {
            event_files.push(path.clone());
        }
    }

    info!("Found {} event file(s)", event_files.len());

    if event_files.is_empty() {
        warn!("No event files found");
        return Ok(());
    }

    FileUtils::sort_files(&mut event_files, &args.sort);

    // Decode everything up front so the reporters know the test count
    let mut batches = Vec::new();
    let mut total_events = 0usize;
    let mut degraded_events = 0u64;
    for file in &event_files {
        let batch = ingest::load_events(file)?;
        total_events += batch.events.len();
        degraded_events += batch.degraded;
        batches.push(batch);
    }

    println!(
        "ℹ️  INFO [{}]: Replaying {} outcome event(s) from {} file(s)...",
        chrono::Local::now().format("%H:%M:%S"),
        total_events,
        event_files.len()
    );

    let output_dir = resolve_output_dir(args, config);
    let stories = config.map(|c| c.story_map()).unwrap_or_default();
    let max_error_len = config
        .map(|c| c.general.max_error_len)
        .unwrap_or(state::DEFAULT_MAX_ERROR_LEN);

    // Setup Reporters
    let mut reporters: Vec<Box<dyn Reporter>> = Vec::new();

    let run_info = report::console::RunInfo {
        output_dir: output_dir.display().to_string(),
        event_files: event_files.len(),
        sheet_enabled: !args.no_sheet,
    };

    reporters.push(Box::new(ConsoleReporter::new(
        cli.progress_mode(),
        total_events as u64,
        run_info,
    )));

    if !args.no_sheet {
        reporters.push(Box::new(SheetReporter::new(output_dir.clone())));
    }

    // Add extra file reporter if configured
    let log_output = args.log_output.clone().or_else(|| {
        config.and_then(|c| c.general.log_output.as_ref().map(PathBuf::from))
    });
    let log_format = cli.log_format_mode().or_else(|| {
        config
            .and_then(|c| c.general.log_format.as_deref())
            .map(|fmt| match fmt {
                "junit" => LogFormat::JUnit,
                "json" => LogFormat::Json,
                _ => LogFormat::Console,
            })
    });
    if let Some(format) = log_format {
        if let Some(output_path) = log_output {
            match format {
                LogFormat::Json => {
                    reporters.push(Box::new(JsonReporter::new(output_path)));
                }
                LogFormat::JUnit => {
                    reporters.push(Box::new(JunitReporter::new(output_path)));
                }
                _ => {}
            }
        } else {
            warn!(
                "--log-format specified but --log-output is missing. File report will be skipped."
            );
        }
    }

    // Collect records
    let mut log = RunLog::with_error_limit(max_error_len);
    for batch in &batches {
        for raw in &batch.events {
            for r in reporters.iter() {
                r.on_test_start(raw.test_name());
            }

            let record = log.record(raw, &stories);
            for r in reporters.iter() {
                r.on_test_end(raw.test_name(), record);
            }
        }
    }

    // Update metrics. The replay itself is instant, so the run duration
    // reported is the recorded test time.
    log.metrics.degraded_events = degraded_events;
    log.metrics.update_time();
    log.metrics.total_duration_ms = log
        .all()
        .iter()
        .map(|r| (r.duration_secs * 1000.0) as u64)
        .sum();

    // Notify suite end
    for r in reporters.iter() {
        r.on_suite_end(&log)?;
    }

    if !log.all_passed() {
        std::process::exit(1);
    }

    Ok(())
}

fn handle_check(args: &CheckArgs) -> Result<()> {
    use report::{CheckReport, CheckSummary, Diagnostic, DiagnosticSeverity};
    use state::CaseStatus;

    let mut files = Vec::new();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    for path in &args.files {
        if path.is_dir() {
            files.extend(FileUtils::collect_event_files(path));
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            diagnostics.push(Diagnostic::error(
                &path.to_string_lossy(),
                "FILE_NOT_FOUND",
                "Path not found",
                1,
            ));
        }
    }

    info!("Checking {} file(s)...", files.len());

    let mut total_events = 0usize;
    for file in &files {
        let file_str = file.to_string_lossy().to_string();
        let content = FileUtils::read_file(file)?;

        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match ingest::decode_line(line) {
                Ok(event) => {
                    total_events += 1;
                    if CaseStatus::from_word(&event.status).is_none() {
                        diagnostics.push(Diagnostic::warning(
                            &file_str,
                            "UNKNOWN_STATUS",
                            &format!("Status '{}' will be recorded as ERROR", event.status),
                            index + 1,
                        ));
                    }
                }
                Err(e) => {
                    diagnostics.push(Diagnostic::error(
                        &file_str,
                        "MALFORMED_EVENT",
                        &e.to_string(),
                        index + 1,
                    ));
                }
            }
        }
    }

    let total_errors = diagnostics
        .iter()
        .filter(|d| matches!(d.severity, DiagnosticSeverity::Error))
        .count();
    let total_warnings = diagnostics
        .iter()
        .filter(|d| matches!(d.severity, DiagnosticSeverity::Warning))
        .count();

    if args.is_json() {
        let report = CheckReport {
            diagnostics,
            summary: CheckSummary {
                total_files: files.len(),
                total_events,
                total_errors,
                total_warnings,
            },
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for diagnostic in &diagnostics {
            let severity = match diagnostic.severity {
                DiagnosticSeverity::Error => "error",
                DiagnosticSeverity::Warning => "warning",
            };
            println!(
                "{}:{}: {} [{}] {}",
                diagnostic.file, diagnostic.line, severity, diagnostic.code, diagnostic.message
            );
        }
        println!(
            "{} file(s), {} event(s), {} error(s), {} warning(s)",
            files.len(),
            total_events,
            total_errors,
            total_warnings
        );
    }

    if total_errors > 0 {
        std::process::exit(1);
    }

    Ok(())
}
