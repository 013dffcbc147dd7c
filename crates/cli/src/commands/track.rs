use anyhow::Result;
use clap::Args;
use star_tracker_core::{
    config::{parse_bool, parse_list, parse_notification_threshold, parse_number, TrackerConfig},
    formatting::delta_indicator,
    StarTracker, TrackingOutcome,
};
use star_tracker_developer_platforms::github::GitHubProvider;
use tracing::{debug, info, instrument};

use crate::commands::auth::resolve_token;
use crate::config::{get_config_path, AppConfig};
use crate::errors::CliError;
use crate::storage::DataDirectoryStore;

#[cfg(test)]
#[path = "track_tests.rs"]
mod tests;

/// Arguments for the track command.
///
/// Every option overrides the matching value from the configuration file.
#[derive(Args, Debug, Default)]
pub struct TrackArgs {
    /// Path to the configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory holding the history, the stargazers and the reports
    #[arg(short, long)]
    pub data_dir: Option<String>,

    /// Which repositories to list: public, private, all or owned
    #[arg(long)]
    pub visibility: Option<String>,

    /// Skip repositories with fewer stars
    #[arg(long)]
    pub min_stars: Option<String>,

    /// Number of snapshots to keep
    #[arg(long)]
    pub max_history: Option<String>,

    /// Number of repositories that get an individual forecast
    #[arg(long)]
    pub top_repos: Option<String>,

    /// Stars of change needed before notifying, or "auto"
    #[arg(long)]
    pub notification_threshold: Option<String>,

    /// Fetch and diff the individual stargazers ("true" or "false")
    #[arg(long)]
    pub track_stargazers: Option<String>,

    /// Render the history chart ("true" or "false")
    #[arg(long)]
    pub include_charts: Option<String>,

    /// Comma-separated names or /regex/flags patterns to skip
    #[arg(long)]
    pub exclude_repos: Option<String>,

    /// Comma-separated names; when set only these repositories are tracked
    #[arg(long)]
    pub only_repos: Option<String>,

    /// Print the run outputs as JSON instead of a summary line
    #[arg(long)]
    pub json: bool,
}

fn invalid(flag: &str, value: &str) -> CliError {
    CliError::InvalidArguments(format!("Invalid value for --{}: {}", flag, value))
}

fn count(flag: &str, value: &str) -> Result<usize, CliError> {
    parse_number(value)
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| invalid(flag, value))
}

/// Applies the command-line overrides on top of the configured values.
pub(crate) fn apply_overrides(
    args: &TrackArgs,
    config: &mut TrackerConfig,
) -> Result<(), CliError> {
    if let Some(value) = &args.visibility {
        config.visibility = value.parse().map_err(CliError::InvalidArguments)?;
    }

    if let Some(value) = &args.min_stars {
        config.min_stars = count("min-stars", value)? as u64;
    }

    if let Some(value) = &args.max_history {
        config.max_history = count("max-history", value)?;
    }

    if let Some(value) = &args.top_repos {
        config.top_repos = count("top-repos", value)?;
    }

    if let Some(value) = &args.notification_threshold {
        config.notification_threshold = parse_notification_threshold(value)
            .ok_or_else(|| invalid("notification-threshold", value))?;
    }

    // an empty flag value leaves the configured setting alone
    if let Some(value) = args.track_stargazers.as_deref().and_then(parse_bool) {
        config.track_stargazers = value;
    }

    if let Some(value) = args.include_charts.as_deref().and_then(parse_bool) {
        config.include_charts = value;
    }

    if let Some(value) = &args.exclude_repos {
        config.exclude_repos = parse_list(value);
    }

    if let Some(value) = &args.only_repos {
        config.only_repos = parse_list(value);
    }

    config
        .validate()
        .map_err(|e| CliError::InvalidArguments(e.to_string()))
}

/// One line describing the run, e.g. `Total stars: 120 (+3) | new: 4 | lost: 1 | notify: yes`.
pub(crate) fn summary_line(outcome: &TrackingOutcome) -> String {
    let summary = &outcome.results.summary;
    let mut line = format!(
        "Total stars: {} ({}) | new: {} | lost: {} | notify: {}",
        summary.total_stars,
        delta_indicator(summary.total_delta),
        summary.new_stars,
        summary.lost_stars,
        if outcome.should_notify { "yes" } else { "no" }
    );

    if let Some(diff) = &outcome.stargazer_diff {
        line.push_str(&format!(" | new stargazers: {}", diff.total_new));
    }

    line
}

/// Execute the track command
#[instrument(skip(args))]
pub async fn execute(args: TrackArgs) -> Result<(), CliError> {
    let config_path = get_config_path(args.config.as_deref());
    let mut app_config = AppConfig::load_or_default(&config_path)?;
    apply_overrides(&args, &mut app_config.tracker)?;

    let data_dir = args
        .data_dir
        .clone()
        .unwrap_or_else(|| app_config.storage.data_dir.clone());
    debug!(data_dir = %data_dir, "Using data directory");

    let token = resolve_token()?;
    let provider = GitHubProvider::new(&token)?;
    let store = DataDirectoryStore::new(data_dir);

    let tracker = StarTracker::with_config(provider, app_config.tracker);
    let outcome = tracker.run(&store).await?;

    info!(
        total_stars = outcome.results.summary.total_stars,
        should_notify = outcome.should_notify,
        "Tracking run complete"
    );

    if args.json {
        let json = serde_json::to_string_pretty(&outcome.outputs()).map_err(|e| {
            CliError::Other(format!("Failed to serialize the run outputs: {}", e))
        })?;
        println!("{}", json);
    } else {
        println!("{}", summary_line(&outcome));
    }

    Ok(())
}
