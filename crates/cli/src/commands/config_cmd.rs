use anyhow::Result;
use clap::Subcommand;
use star_tracker_core::config::{
    parse_bool, parse_list, parse_notification_threshold, parse_number,
};
use tracing::debug;

use crate::config::{get_config_path, AppConfig};
use crate::errors::CliError;

#[cfg(test)]
#[path = "config_cmd_tests.rs"]
mod tests;

/// Subcommands for the config command
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Create initial configuration file
    Init {
        /// Path to save the configuration file
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Check configuration syntax
    Validate {
        /// Path to the configuration file
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Show current configuration
    Get {
        /// Path to the configuration file
        #[arg(short, long)]
        path: Option<String>,

        /// Configuration key to get (e.g., "tracker.min_stars")
        key: Option<String>,
    },

    /// Update configuration values
    Set {
        /// Path to the configuration file
        #[arg(short, long)]
        path: Option<String>,

        /// Configuration key to set (e.g., "tracker.notification_threshold")
        key: String,

        /// Value to set
        value: String,
    },
}

/// Execute the config command
pub async fn execute(cmd: ConfigCommands) -> Result<(), CliError> {
    match cmd {
        ConfigCommands::Init { path } => init_config(path.as_deref()),
        ConfigCommands::Validate { path } => validate_config(path.as_deref()),
        ConfigCommands::Get { path, key } => get_config(path.as_deref(), key.as_deref()),
        ConfigCommands::Set { path, key, value } => set_config(path.as_deref(), &key, &value),
    }
}

/// Initialize a new configuration file
fn init_config(path: Option<&str>) -> Result<(), CliError> {
    let config_path = get_config_path(path);
    debug!("Initializing configuration at {:?}", config_path);

    if config_path.exists() {
        return Err(CliError::ConfigError(format!(
            "Configuration file already exists at {:?}",
            config_path
        )));
    }

    let config = AppConfig::default();
    config.save(&config_path)?;

    println!("Configuration initialized at {:?}", config_path);
    Ok(())
}

/// Validate a configuration file
fn validate_config(path: Option<&str>) -> Result<(), CliError> {
    let config_path = get_config_path(path);
    debug!("Validating configuration at {:?}", config_path);

    AppConfig::load(&config_path)?;
    println!("Configuration is valid");
    Ok(())
}

/// Get a configuration value
fn get_config(path: Option<&str>, key: Option<&str>) -> Result<(), CliError> {
    let config_path = get_config_path(path);
    debug!("Getting configuration from {:?}", config_path);

    let config = AppConfig::load(&config_path)?;

    if let Some(key) = key {
        let value = get_config_value(&config, key)?;
        println!("{}: {}", key, value);
    } else {
        let config_str = toml::to_string_pretty(&config).map_err(|e| {
            CliError::ConfigError(format!("Failed to serialize configuration: {}", e))
        })?;
        println!("{}", config_str);
    }

    Ok(())
}

/// Set a configuration value
fn set_config(path: Option<&str>, key: &str, value: &str) -> Result<(), CliError> {
    let config_path = get_config_path(path);
    debug!("Setting configuration at {:?}", config_path);

    let mut config = AppConfig::load_or_default(&config_path)?;

    set_config_value(&mut config, key, value)?;
    config
        .tracker
        .validate()
        .map_err(|e| CliError::InvalidArguments(e.to_string()))?;

    config.save(&config_path)?;

    println!("Configuration updated: {} = {}", key, value);
    Ok(())
}

fn invalid_key(key: &str) -> CliError {
    CliError::InvalidArguments(format!("Invalid configuration key: {}", key))
}

fn invalid_value(key: &str, value: &str) -> CliError {
    CliError::InvalidArguments(format!("Invalid value for {}: {}", key, value))
}

/// Get a value from the configuration by key path
fn get_config_value(config: &AppConfig, key: &str) -> Result<String, CliError> {
    let parts: Vec<&str> = key.split('.').collect();
    let tracker = &config.tracker;

    match (parts[0], parts.get(1).copied()) {
        ("tracker", Some(field)) => match field {
            "visibility" => Ok(tracker.visibility.to_string()),
            "include_archived" => Ok(tracker.include_archived.to_string()),
            "include_forks" => Ok(tracker.include_forks.to_string()),
            "exclude_repos" => Ok(tracker.exclude_repos.join(",")),
            "only_repos" => Ok(tracker.only_repos.join(",")),
            "min_stars" => Ok(tracker.min_stars.to_string()),
            "max_history" => Ok(tracker.max_history.to_string()),
            "top_repos" => Ok(tracker.top_repos.to_string()),
            "include_charts" => Ok(tracker.include_charts.to_string()),
            "track_stargazers" => Ok(tracker.track_stargazers.to_string()),
            "notification_threshold" => Ok(tracker.notification_threshold.to_string()),
            _ => Err(invalid_key(key)),
        },
        ("storage", Some("data_dir")) => Ok(config.storage.data_dir.clone()),
        ("authentication", Some("auth_method")) => Ok(config.authentication.auth_method.clone()),
        _ => Err(invalid_key(key)),
    }
}

/// Set a value in the configuration by key path
fn set_config_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), CliError> {
    let parts: Vec<&str> = key.split('.').collect();
    let tracker = &mut config.tracker;

    let count = |value: &str| -> Result<usize, CliError> {
        parse_number(value)
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| invalid_value(key, value))
    };
    let flag = |value: &str| parse_bool(value).ok_or_else(|| invalid_value(key, value));

    match (parts[0], parts.get(1).copied()) {
        ("tracker", Some(field)) => match field {
            "visibility" => {
                tracker.visibility = value.parse().map_err(CliError::InvalidArguments)?;
            }
            "include_archived" => tracker.include_archived = flag(value)?,
            "include_forks" => tracker.include_forks = flag(value)?,
            "exclude_repos" => tracker.exclude_repos = parse_list(value),
            "only_repos" => tracker.only_repos = parse_list(value),
            "min_stars" => tracker.min_stars = count(value)? as u64,
            "max_history" => tracker.max_history = count(value)?,
            "top_repos" => tracker.top_repos = count(value)?,
            "include_charts" => tracker.include_charts = flag(value)?,
            "track_stargazers" => tracker.track_stargazers = flag(value)?,
            "notification_threshold" => {
                tracker.notification_threshold =
                    parse_notification_threshold(value).ok_or_else(|| invalid_value(key, value))?;
            }
            _ => return Err(invalid_key(key)),
        },
        ("storage", Some("data_dir")) => {
            if value.is_empty() {
                return Err(invalid_value(key, value));
            }
            config.storage.data_dir = value.to_string();
        }
        ("authentication", Some("auth_method")) => {
            config.authentication.auth_method = value.to_string();
        }
        _ => return Err(invalid_key(key)),
    }

    Ok(())
}
