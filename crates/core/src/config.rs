//! Configuration settings for the Star Tracker core functionality.
//!
//! The tracker configuration is a flat TOML table. Every key is optional and
//! falls back to the defaults below, so an empty (or missing) file is a valid
//! configuration.
use serde::{Deserialize, Serialize};
use star_tracker_developer_platforms::models::RepositoryVisibility;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::errors::ConfigLoadError;
use crate::notification::NotificationThreshold;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Default number of snapshots retained in the history
pub const DEFAULT_MAX_HISTORY: usize = 52;

/// Default number of repositories that get an individual forecast
pub const DEFAULT_TOP_REPOS: usize = 10;

/// Default name of the tracker configuration file
pub const DEFAULT_CONFIG_FILE: &str = "star-tracker.toml";

/// Settings controlling which repositories are tracked and what a run produces.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Which repositories of the authenticated user are listed
    #[serde(default)]
    pub visibility: RepositoryVisibility,

    #[serde(default)]
    pub include_archived: bool,

    #[serde(default)]
    pub include_forks: bool,

    /// Exact names or `/regex/flags` patterns to skip
    #[serde(default)]
    pub exclude_repos: Vec<String>,

    /// When non-empty, only these repository names are tracked and every
    /// other filter is ignored
    #[serde(default)]
    pub only_repos: Vec<String>,

    /// Repositories with fewer stars are skipped; 0 disables the filter
    #[serde(default)]
    pub min_stars: u64,

    /// Maximum number of snapshots kept in the history
    #[serde(default = "TrackerConfig::default_max_history")]
    pub max_history: usize,

    /// Number of repositories that get an individual forecast
    #[serde(default = "TrackerConfig::default_top_repos")]
    pub top_repos: usize,

    /// Whether the history chart is rendered
    #[serde(default = "TrackerConfig::default_include_charts")]
    pub include_charts: bool,

    /// Whether individual stargazers are fetched and diffed
    #[serde(default)]
    pub track_stargazers: bool,

    #[serde(default)]
    pub notification_threshold: NotificationThreshold,
}

impl TrackerConfig {
    fn default_max_history() -> usize {
        DEFAULT_MAX_HISTORY
    }

    fn default_top_repos() -> usize {
        DEFAULT_TOP_REPOS
    }

    fn default_include_charts() -> bool {
        true
    }

    /// Checks the constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.max_history == 0 {
            return Err(ConfigLoadError::Invalid(
                "max_history must be at least 1".to_string(),
            ));
        }

        if self.top_repos == 0 {
            return Err(ConfigLoadError::Invalid(
                "top_repos must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            visibility: RepositoryVisibility::default(),
            include_archived: false,
            include_forks: false,
            exclude_repos: Vec::new(),
            only_repos: Vec::new(),
            min_stars: 0,
            max_history: Self::default_max_history(),
            top_repos: Self::default_top_repos(),
            include_charts: Self::default_include_charts(),
            track_stargazers: false,
            notification_threshold: NotificationThreshold::default(),
        }
    }
}

/// Loads the tracker configuration from the given path.
///
/// A missing file is not an error: the defaults are returned and the fact is
/// logged.
///
/// # Arguments
/// * `path` - Path to the configuration file
///
/// # Returns
/// * `Ok(TrackerConfig)` if the file is absent, or present and valid
/// * `Err(ConfigLoadError)` if the file cannot be read, parsed or validated
pub fn load_tracker_config<P: AsRef<Path>>(path: P) -> Result<TrackerConfig, ConfigLoadError> {
    let path_ref = path.as_ref();
    let content = match fs::read_to_string(path_ref) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!(
                path = %path_ref.display(),
                "No tracker configuration file found, using defaults"
            );
            return Ok(TrackerConfig::default());
        }
        Err(e) => return Err(ConfigLoadError::Io(e)),
    };

    let config: TrackerConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Splits a comma-separated list, trimming entries and dropping empty ones.
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// `"true"` is true, any other non-empty value is false, empty is unset.
pub fn parse_bool(value: &str) -> Option<bool> {
    if value.is_empty() {
        return None;
    }

    Some(value == "true")
}

/// Parses the leading integer of `value`, so `"12 stars"` gives 12.
///
/// Returns `None` for empty input or input without leading digits.
pub fn parse_number(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());

    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// `"auto"` or a leading integer; anything else is unset.
pub fn parse_notification_threshold(value: &str) -> Option<NotificationThreshold> {
    if value == "auto" {
        return Some(NotificationThreshold::Auto);
    }

    parse_number(value)
        .and_then(|n| u64::try_from(n).ok())
        .map(NotificationThreshold::Stars)
}
