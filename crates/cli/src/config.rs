use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use star_tracker_core::{
    config::{load_tracker_config, TrackerConfig, DEFAULT_CONFIG_FILE},
    errors::StarTrackerError,
};
use tracing::{debug, info};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = ".star-tracker.toml";

/// Default directory holding the history, the stargazers and the reports
pub const DEFAULT_DATA_DIR: &str = "star-tracker-data";

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Configuration for the Star Tracker CLI
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Which repositories are tracked and what a run produces
    #[serde(default)]
    pub tracker: TrackerConfig,

    /// Where the data carried between runs lives
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub authentication: AuthenticationConfig,
}

impl AppConfig {
    /// Load configuration from the specified file
    pub fn load(path: &Path) -> Result<Self, StarTrackerError> {
        debug!("Loading configuration from {:?}", path);

        if !path.exists() {
            return Err(StarTrackerError::ConfigError(format!(
                "Configuration file not found: {:?}",
                path
            )));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            StarTrackerError::ConfigError(format!("Failed to read configuration file: {}", e))
        })?;

        let config: AppConfig = toml::from_str(&content).map_err(|e| {
            StarTrackerError::ConfigError(format!("Failed to parse configuration file: {}", e))
        })?;

        config.tracker.validate()?;

        Ok(config)
    }

    /// Load configuration from the specified file.
    ///
    /// When the file does not exist the tracker settings are read from a bare
    /// `star-tracker.toml` next to it, and everything else takes its default.
    pub fn load_or_default(path: &Path) -> Result<Self, StarTrackerError> {
        if path.exists() {
            return Self::load(path);
        }

        info!(path = ?path, "No configuration file found, using defaults");
        let tracker_path = path
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(DEFAULT_CONFIG_FILE);

        Ok(Self {
            tracker: load_tracker_config(&tracker_path)?,
            ..Self::default()
        })
    }

    /// Save configuration to the specified file
    pub fn save(&self, path: &Path) -> Result<(), StarTrackerError> {
        debug!("Saving configuration to {:?}", path);

        let content = toml::to_string_pretty(self).map_err(|e| {
            StarTrackerError::ConfigError(format!("Failed to serialize configuration: {}", e))
        })?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    StarTrackerError::ConfigError(format!("Failed to create directory: {}", e))
                })?;
            }
        }

        fs::write(path, content).map_err(|e| {
            StarTrackerError::ConfigError(format!("Failed to write configuration file: {}", e))
        })?;

        info!("Configuration saved to {:?}", path);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationConfig {
    #[serde(default = "AuthenticationConfig::default_auth_method")]
    pub auth_method: String,
}

impl AuthenticationConfig {
    fn default_auth_method() -> String {
        "token".to_string()
    }
}

impl Default for AuthenticationConfig {
    fn default() -> Self {
        Self {
            auth_method: AuthenticationConfig::default_auth_method(),
        }
    }
}

/// Location of the persisted data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory that receives `stars-data.json`, `stargazers.json` and the reports
    #[serde(default = "StorageConfig::default_data_dir")]
    pub data_dir: String,
}

impl StorageConfig {
    fn default_data_dir() -> String {
        DEFAULT_DATA_DIR.to_string()
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: StorageConfig::default_data_dir(),
        }
    }
}

/// Get the path to the configuration file
pub fn get_config_path(config_path: Option<&str>) -> PathBuf {
    if let Some(path) = config_path {
        PathBuf::from(path)
    } else {
        // Look for config in current directory
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        current_dir.join(DEFAULT_CONFIG_FILENAME)
    }
}
