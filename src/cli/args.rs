// CLI argument definitions using Clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Progress indicator modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    Dots,
    Bar,
    None,
    Verbose,
}

impl std::str::FromStr for ProgressMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dots" => Ok(Self::Dots),
            "bar" => Ok(Self::Bar),
            "none" => Ok(Self::None),
            _ => Ok(Self::Dots),
        }
    }
}

/// Log format types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Console,
    Json,
    JUnit,
}

/// Test run reporting utility
#[derive(Parser, Debug)]
#[command(name = "reportify")]
#[command(author = "reportify team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Collect E2E outcome events and render styled spreadsheet reports",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    // Flatten RenderArgs to support the implicit render command, so
    // `reportify results/run.jsonl` works without the subcommand.
    #[command(flatten)]
    pub render_args: RenderArgs,

    /// Enable verbose debug output
    #[arg(short = 'v', long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(short = 'c', long, global = true, default_value_t = false)]
    pub no_color: bool,

    /// Show current configuration and exit
    #[arg(long, default_value_t = false)]
    pub config: bool,

    /// Create default configuration file
    #[arg(long, value_name = "CONFIG_FILE")]
    pub init_config: Option<PathBuf>,

    /// Install shell completion (bash, zsh, fish, elvish, powershell)
    #[arg(long, value_name = "SHELL_TYPE", value_parser = ["bash", "zsh", "fish", "elvish", "powershell"])]
    pub completion: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render reports from recorded outcome events (default)
    Render(RenderArgs),

    /// Check outcome event files for undecodable lines
    Check(CheckArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Outcome event files or directories to replay
    #[arg(required = false)]
    pub event_paths: Vec<PathBuf>,

    /// Directory the spreadsheet report is written to
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Sort event files by type before replay
    #[arg(short = 's', long, default_value = "path")]
    pub sort: String,

    /// Generate an additional report in the specified format (json, junit)
    #[arg(long, value_name = "FORMAT")]
    pub log_format: Option<String>,

    /// Output file for the additional report (use with --log-format)
    #[arg(long, value_name = "OUTPUT_FILE")]
    pub log_output: Option<PathBuf>,

    /// Skip the spreadsheet report
    #[arg(long, default_value_t = false)]
    pub no_sheet: bool,

    /// Progress indicator style
    #[arg(long, default_value = "auto")]
    pub progress: String,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Event files to validate
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub format: String,
}

impl Cli {
    /// Get progress mode
    pub fn progress_mode(&self) -> ProgressMode {
        let progress = match &self.command {
            Some(Commands::Render(args)) => &args.progress,
            _ => &self.render_args.progress,
        };

        match progress.as_str() {
            "dots" => ProgressMode::Dots,
            "bar" => ProgressMode::Bar,
            "none" => ProgressMode::None,
            "auto" => {
                if self.verbose {
                    ProgressMode::Verbose
                } else {
                    ProgressMode::Dots
                }
            }
            _ => ProgressMode::Dots,
        }
    }

    /// Get log format
    pub fn log_format_mode(&self) -> Option<LogFormat> {
        let log_format = match &self.command {
            Some(Commands::Render(args)) => &args.log_format,
            _ => &self.render_args.log_format,
        };

        log_format.as_ref().map(|fmt| match fmt.as_str() {
            "junit" => LogFormat::JUnit,
            "json" => LogFormat::Json,
            _ => LogFormat::Console,
        })
    }

    /// Helper to get effective RenderArgs
    pub fn get_render_args(&self) -> &RenderArgs {
        match &self.command {
            Some(Commands::Render(args)) => args,
            _ => &self.render_args,
        }
    }
}

fn is_json_format(value: &str) -> bool {
    value.eq_ignore_ascii_case("json")
}

impl CheckArgs {
    pub fn is_json(&self) -> bool {
        is_json_format(&self.format)
    }
}
