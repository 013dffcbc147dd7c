//! # Star Tracker CLI
//!
//! Command-line interface for tracking the star counts of a GitHub account's
//! repositories over time.
//!
//! Each `track` run appends a snapshot to the history in the data directory
//! and rewrites the reports next to it. Scheduling the runs and committing
//! the data directory is left to the caller (cron, a CI workflow, ...).
//!
//! # Commands
//!
//! - `track` - Record a snapshot and render the reports
//! - `forecast` - Project the star counts from the stored history
//! - `config` - Manage configuration files and settings
//! - `auth` - Store a GitHub token in the system keyring
//!
//! # Examples
//!
//! ```bash
//! # Store a token
//! star-tracker auth github
//!
//! # Record a snapshot, notifying only after 5 stars of change
//! star-tracker track --data-dir data --notification-threshold 5
//!
//! # Show the forecast
//! star-tracker forecast --data-dir data
//! ```

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::{ExitCode, Termination};
use tracing::{error, info, instrument};

/// Command implementations for the CLI.
mod commands;

/// Configuration management for the CLI.
mod config;

/// Error types specific to the CLI.
mod errors;

/// File-based persistence of the tracking data.
mod storage;

use commands::{
    auth::AuthCommands, config_cmd::ConfigCommands, forecast::ForecastArgs, track::TrackArgs,
};
use errors::CliError;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter directives
const LOG_ENV_VAR: &str = "STAR_TRACKER_LOG";

/// Command-line interface structure for Star Tracker.
///
/// This struct defines the top-level CLI interface using clap's derive API.
/// It includes global options like verbose logging and the main command structure.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

/// Available commands for the Star Tracker CLI.
#[derive(Subcommand)]
enum Commands {
    /// Record a snapshot of the star counts and render the reports
    Track(TrackArgs),

    /// Forecast star growth from the stored history
    Forecast(ForecastArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Authenticate with GitHub
    #[command(subcommand)]
    Auth(AuthCommands),
}

/// Installs the log subscriber.
///
/// `STAR_TRACKER_LOG` takes the usual `EnvFilter` directives; without it only
/// warnings are shown, or debug output when `verbose` is set.
fn init_logging(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };

    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(fmt::layer().pretty())
        .with(filter)
        .init();
}

/// Dispatches to the handler of the selected command.
async fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Track(args) => commands::track::execute(args).await.inspect_err(|e| {
            error!("Error tracking stars: {}", e);
        }),
        Commands::Forecast(args) => commands::forecast::execute(args).await.inspect_err(|e| {
            error!("Error forecasting stars: {}", e);
        }),
        Commands::Config(cmd) => commands::config_cmd::execute(cmd).await.inspect_err(|e| {
            error!("Error executing config command: {}", e);
        }),
        Commands::Auth(cmd) => commands::auth::execute(cmd).await.inspect_err(|e| {
            error!("Error executing auth command: {}", e);
        }),
    }
}

/// Main entry point for the Star Tracker CLI.
///
/// This function initializes logging, parses command-line arguments,
/// and dispatches to the appropriate command handler based on the
/// user's input.
///
/// The exit code identifies the kind of failure:
/// - 1 when the tracking run failed
/// - 2 for configuration errors
/// - 3 for authentication errors
/// - 4 for network errors
/// - 5 for invalid arguments
/// - 6 for storage errors
#[tokio::main]
#[instrument]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            e.report()
        }
    }
}
