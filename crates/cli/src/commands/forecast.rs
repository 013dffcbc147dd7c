use anyhow::Result;
use clap::Args;
use star_tracker_core::{
    forecast::{compute_forecast, ForecastData, ForecastResult, MIN_SNAPSHOTS},
    models::History,
    SnapshotStore,
};
use tracing::{debug, instrument};

use crate::config::{get_config_path, AppConfig};
use crate::errors::CliError;
use crate::storage::DataDirectoryStore;

#[cfg(test)]
#[path = "forecast_tests.rs"]
mod tests;

/// Arguments for the forecast command
#[derive(Args, Debug, Default)]
pub struct ForecastArgs {
    /// Path to the configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory holding the stored history
    #[arg(short, long)]
    pub data_dir: Option<String>,

    /// Number of repositories that get an individual forecast
    #[arg(long)]
    pub top_repos: Option<usize>,
}

/// The most starred repositories of the newest snapshot.
fn top_repositories(history: &History, count: usize) -> Vec<String> {
    let Some(last) = history.snapshots.last() else {
        return Vec::new();
    };

    let mut entries: Vec<_> = last.repos.iter().collect();
    entries.sort_by(|a, b| b.stars.cmp(&a.stars));
    entries
        .into_iter()
        .take(count)
        .map(|e| e.full_name.clone())
        .collect()
}

fn table_rows(out: &mut String, label: &str, results: &[ForecastResult]) {
    for result in results {
        let weeks: Vec<String> = result
            .points
            .iter()
            .map(|p| format!("{:>8}", p.predicted))
            .collect();
        out.push_str(&format!(
            "{:<32} {:<20} {}\n",
            label,
            result.method.label(),
            weeks.join(" ")
        ));
    }
}

/// Plain-text forecast tables: the total first, then each repository.
pub(crate) fn render_forecast(forecast: &ForecastData) -> String {
    let mut out = format!(
        "{:<32} {:<20} {:>8} {:>8} {:>8} {:>8}\n",
        "Repository", "Method", "Week 1", "Week 2", "Week 3", "Week 4"
    );

    table_rows(&mut out, "Total", &forecast.aggregate);
    for repo in &forecast.repos {
        table_rows(&mut out, &repo.repo_full_name, &repo.forecasts);
    }

    out
}

/// Execute the forecast command
#[instrument(skip(args))]
pub async fn execute(args: ForecastArgs) -> Result<(), CliError> {
    let config_path = get_config_path(args.config.as_deref());
    let app_config = AppConfig::load_or_default(&config_path)?;

    let data_dir = args.data_dir.unwrap_or(app_config.storage.data_dir);
    let top_repos = args.top_repos.unwrap_or(app_config.tracker.top_repos);

    let store = DataDirectoryStore::new(data_dir);
    let history = store.read_history().await?;
    debug!(snapshots = history.len(), "Loaded history");

    let names = top_repositories(&history, top_repos);
    match compute_forecast(&history, &names) {
        Some(forecast) => print!("{}", render_forecast(&forecast)),
        None => println!(
            "Insufficient data: a forecast needs at least {} snapshots, found {}",
            MIN_SNAPSHOTS,
            history.len()
        ),
    }

    Ok(())
}
