//! # Star Tracker Core
//!
//! Core business logic for tracking the star counts of a GitHub account's
//! repositories over time.
//!
//! Each run:
//! - lists and filters the account's repositories
//! - compares their star counts with the last stored snapshot
//! - optionally diffs the individual stargazers
//! - forecasts growth from the stored history
//! - renders the reports and appends a snapshot to the bounded history
//! - decides whether the accumulated change is worth a notification
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use star_tracker_core::{config::TrackerConfig, SnapshotStore, StarTracker};
//! use star_tracker_developer_platforms::github::GitHubProvider;
//! use anyhow::Result;
//!
//! async fn track<S: SnapshotStore>(store: &S) -> Result<()> {
//!     let provider = GitHubProvider::new("ghp_example")?;
//!     let config = TrackerConfig {
//!         top_repos: 5,
//!         ..TrackerConfig::default()
//!     };
//!
//!     let tracker = StarTracker::with_config(provider, config);
//!     let outcome = tracker.run(store).await?;
//!
//!     println!("{} stars", outcome.results.summary.total_stars);
//!     if outcome.should_notify {
//!         println!("{}", outcome.markdown);
//!     }
//!
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use star_tracker_developer_platforms::RepositoryProvider;
use tracing::{debug, info, instrument, warn};

pub mod comparison;
pub mod config;
use config::TrackerConfig;

pub mod errors;
use errors::StarTrackerError;

pub mod filters;
pub mod forecast;
use forecast::ForecastData;

pub mod formatting;
pub mod history;
pub mod models;
use models::{ComparisonResults, RepositoryInfo};

pub mod notification;
pub mod report;
use report::markdown::MarkdownReport;

pub mod stargazers;
use stargazers::{RepoStargazers, StargazerDiffResult};

pub mod storage;
pub use storage::SnapshotStore;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Report text used when no repository survives the filters.
pub const NO_REPOSITORIES_MESSAGE: &str = "No repositories matched the configured filters.";

/// Everything a tracking run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingOutcome {
    pub results: ComparisonResults,

    /// `None` when the history was too short to forecast
    pub forecast: Option<ForecastData>,

    /// `None` when stargazer tracking is disabled
    pub stargazer_diff: Option<StargazerDiffResult>,

    /// Whether the stars changed and the accumulated change reached the threshold
    pub should_notify: bool,

    pub markdown: String,

    pub csv: String,
}

impl TrackingOutcome {
    fn empty() -> Self {
        Self {
            results: ComparisonResults::default(),
            forecast: None,
            stargazer_diff: None,
            should_notify: false,
            markdown: NO_REPOSITORIES_MESSAGE.to_string(),
            csv: String::new(),
        }
    }

    /// The scalar values a scheduler typically acts on.
    pub fn outputs(&self) -> TrackingOutputs {
        let summary = &self.results.summary;
        TrackingOutputs {
            total_stars: summary.total_stars,
            stars_changed: summary.changed,
            new_stars: summary.new_stars,
            lost_stars: summary.lost_stars,
            should_notify: self.should_notify,
            new_stargazers: self
                .stargazer_diff
                .as_ref()
                .map(|d| d.total_new)
                .unwrap_or(0),
        }
    }
}

/// Scalar summary of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TrackingOutputs {
    pub total_stars: u64,
    pub stars_changed: bool,
    pub new_stars: u64,
    pub lost_stars: u64,
    pub should_notify: bool,
    pub new_stargazers: usize,
}

/// The repositories with the most stars, most starred first.
///
/// Removed repositories are skipped; ties keep diff order.
pub fn top_repository_names(results: &ComparisonResults, count: usize) -> Vec<String> {
    let mut active: Vec<_> = results.repos.iter().filter(|r| !r.is_removed).collect();
    active.sort_by(|a, b| b.current.cmp(&a.current));
    active
        .into_iter()
        .take(count)
        .map(|r| r.full_name.clone())
        .collect()
}

/// Runs the star tracking pipeline against a repository provider.
///
/// # Examples
///
/// ```rust,no_run
/// use star_tracker_core::StarTracker;
/// use star_tracker_developer_platforms::github::GitHubProvider;
///
/// fn example() -> anyhow::Result<()> {
///     let provider = GitHubProvider::new("ghp_example")?;
///     let tracker = StarTracker::new(provider);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct StarTracker<P: RepositoryProvider> {
    provider: P,
    config: TrackerConfig,
}

impl<P: RepositoryProvider> StarTracker<P> {
    /// Creates a tracker with the default configuration.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            config: TrackerConfig::default(),
        }
    }

    /// Creates a tracker with a custom configuration.
    pub fn with_config(provider: P, config: TrackerConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    async fn fetch_repositories(&self) -> Result<Vec<RepositoryInfo>, StarTrackerError> {
        info!(visibility = %self.config.visibility, "Fetching repositories");

        let repos = self
            .provider
            .list_repositories(self.config.visibility)
            .await
            .inspect_err(|e| {
                warn!(error = e.to_string(), "Failed to list the repositories");
            })?;

        info!(count = repos.len(), "Fetched repositories");

        let filtered = filters::filter_repositories(&repos, &self.config);
        Ok(filtered.iter().map(filters::to_repository_info).collect())
    }

    /// Fetches the stargazers of every repository.
    ///
    /// A repository whose stargazers cannot be fetched is reported with an
    /// empty list so a single failure does not abort the run.
    async fn fetch_stargazers(&self, repos: &[RepositoryInfo]) -> Vec<RepoStargazers> {
        let mut result = Vec::with_capacity(repos.len());

        for repo in repos {
            let stargazers = match self.provider.list_stargazers(&repo.owner, &repo.name).await {
                Ok(stargazers) => stargazers,
                Err(e) => {
                    warn!(
                        repository = repo.full_name,
                        error = e.to_string(),
                        "Failed to fetch stargazers, treating the repository as having none"
                    );
                    Vec::new()
                }
            };

            debug!(
                repository = repo.full_name,
                count = stargazers.len(),
                "Fetched stargazers"
            );

            result.push(RepoStargazers {
                repo_full_name: repo.full_name.clone(),
                stargazers,
            });
        }

        result
    }

    /// Runs one tracking pass and persists its results.
    ///
    /// This method:
    /// 1. Lists, filters and maps the repositories
    /// 2. Compares them with the last stored snapshot
    /// 3. Diffs the stargazers (if enabled)
    /// 4. Forecasts growth from the stored history
    /// 5. Renders the reports
    /// 6. Appends the new snapshot and records the notification decision
    /// 7. Writes the history and the artifacts to `store`
    ///
    /// When no repository survives the filters nothing is written and the
    /// outcome is empty.
    ///
    /// # Arguments
    ///
    /// * `store` - Where the history is read from and the results are written to
    ///
    /// # Returns
    ///
    /// A `Result` containing the [`TrackingOutcome`] of the run
    #[instrument(skip(self, store))]
    pub async fn run<S: SnapshotStore>(
        &self,
        store: &S,
    ) -> Result<TrackingOutcome, StarTrackerError> {
        let repos = self.fetch_repositories().await?;
        if repos.is_empty() {
            warn!("{}", NO_REPOSITORIES_MESSAGE);
            return Ok(TrackingOutcome::empty());
        }

        info!(count = repos.len(), "Tracking repositories");

        let history = store.read_history().await?;
        let last_snapshot = history::get_last_snapshot(&history);
        let previous_timestamp = last_snapshot.map(|s| s.timestamp);

        let results = comparison::compare_stars(&repos, last_snapshot);
        let summary = &results.summary;
        info!(
            total_stars = summary.total_stars,
            total_delta = summary.total_delta,
            "Compared star counts"
        );

        let stargazer_diff = if self.config.track_stargazers {
            let current = self.fetch_stargazers(&repos).await;
            let previous = store.read_stargazers().await?;
            let diff = stargazers::diff_stargazers(&current, &previous);
            store
                .write_stargazers(&stargazers::build_stargazer_map(&current))
                .await?;
            info!(new_stargazers = diff.total_new, "Diffed stargazers");
            Some(diff)
        } else {
            None
        };

        let top_repo_names = top_repository_names(&results, self.config.top_repos);
        let forecast = forecast::compute_forecast(&history, &top_repo_names);

        let generated_at = chrono::Utc::now();
        let markdown = report::markdown::render_markdown_report(&MarkdownReport {
            results: &results,
            previous_timestamp,
            generated_at,
            history: Some(&history),
            include_charts: self.config.include_charts,
            top_repos: &top_repo_names,
            stargazer_diff: stargazer_diff.as_ref(),
            forecast: forecast.as_ref(),
        });
        let csv = report::csv::render_csv_report(&results)?;
        let badge = report::badge::render_badge(summary.total_stars);
        let charts = if self.config.include_charts {
            report::chart::render_charts(&history, &top_repo_names, forecast.as_ref())
        } else {
            Vec::new()
        };

        let snapshot = comparison::create_snapshot(&repos, summary);
        let mut updated_history =
            history::add_snapshot(&history, snapshot, self.config.max_history);

        let threshold_reached = notification::should_notify(
            summary.total_stars,
            history.stars_at_last_notification,
            self.config.notification_threshold,
        );
        let should_notify = summary.changed && threshold_reached;
        if should_notify {
            updated_history.stars_at_last_notification = Some(summary.total_stars);
        }

        info!(
            changed = summary.changed,
            threshold_reached = threshold_reached,
            should_notify = should_notify,
            "Evaluated notification threshold"
        );

        store.write_history(&updated_history).await?;
        store
            .write_artifact(report::MARKDOWN_REPORT_PATH, &markdown)
            .await?;
        store.write_artifact(report::CSV_REPORT_PATH, &csv).await?;
        store.write_artifact(report::BADGE_PATH, &badge).await?;
        for (path, svg) in &charts {
            store.write_artifact(path, svg).await?;
        }
        debug!(count = charts.len(), "Wrote charts");

        Ok(TrackingOutcome {
            results,
            forecast,
            stargazer_diff,
            should_notify,
            markdown,
            csv,
        })
    }
}
