//! Command-line interface module for tidyext.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing and the usage message
//! - Logging setup
//! - Configuration loading
//! - Running the organizer and rendering its report

use crate::config::{Config, ConfigError};
use crate::error::RunError;
use crate::organizer::{Organizer, RunReport};
use crate::output::OutputFormatter;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Sort the files of a directory into subdirectories named after their extensions.
#[derive(Debug, Parser)]
#[command(name = "tidyext", version, about)]
pub struct CliArgs {
    /// Directory whose files should be organized
    pub directory: PathBuf,

    /// Show what would be moved without touching anything
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Filter configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the report as JSON instead of progress lines
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Errors that end the CLI with a non-zero status.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("error loading configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to organize directory: {0}")]
    Run(#[from] RunError),
}

/// The usage line printed when the arguments are wrong.
pub fn usage() -> String {
    CliArgs::command().render_usage().to_string()
}

/// Parses the process arguments.
///
/// Help and version requests exit through clap. Any other parse failure,
/// including a missing or extra directory argument, prints the usage message
/// on stdout, clap's reason on stderr, and yields `Err` with the status to
/// exit with.
pub fn parse_args() -> Result<CliArgs, ExitCode> {
    match CliArgs::try_parse() {
        Ok(args) => Ok(args),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            println!("{}", usage());
            eprint!("{}", e.render());
            Err(ExitCode::FAILURE)
        }
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides the verbosity flag.
pub fn init_logging(verbose: u8) {
    let default_directive = match verbose {
        0 => "tidyext=error",
        1 => "tidyext=info",
        _ => "tidyext=debug",
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directive.into()),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Runs one organizing pass as described by `args`.
///
/// Progress lines are printed as entries are processed unless `args.json` is
/// set, in which case the whole report is printed as one JSON document.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use tidyext::cli::{CliArgs, run_cli};
///
/// let args = CliArgs::parse_from(["tidyext", "/path/to/downloads", "--dry-run"]);
/// match run_cli(&args) {
///     Ok(report) => println!("{} files would move", report.planned_count()),
///     Err(e) => eprintln!("{}", e),
/// }
/// ```
pub fn run_cli(args: &CliArgs) -> Result<RunReport, CliError> {
    let filters = Config::load(args.config.as_deref())?.compile()?;
    let organizer = Organizer::new().filters(filters).dry_run(args.dry_run);

    if args.json {
        let report = organizer.run(&args.directory)?;
        match serde_json::to_string_pretty(&report.to_json()) {
            Ok(text) => println!("{}", text),
            Err(e) => OutputFormatter::error(&format!("JSON serialization failed: {}", e)),
        }
        return Ok(report);
    }

    OutputFormatter::scan_header(&args.directory);
    let report = organizer.run_with(&args.directory, OutputFormatter::outcome)?;
    OutputFormatter::completion(&report);

    Ok(report)
}

/// Runs the CLI end to end and maps the result to an exit status.
pub fn main_with_args(args: CliArgs) -> ExitCode {
    init_logging(args.verbose);

    match run_cli(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            OutputFormatter::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
