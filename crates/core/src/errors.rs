use star_tracker_developer_platforms::errors::Error as ProviderError;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

#[derive(Error, Debug)]
pub enum StarTrackerError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Developer platform error: {0}")]
    ProviderError(#[from] ProviderError),

    #[error("Failed to render the {0} report. Issue was: '{1}'.")]
    RenderError(String, String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

/// Errors raised while loading the tracker configuration file.
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("Failed to read the configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse the configuration file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigLoadError> for StarTrackerError {
    fn from(err: ConfigLoadError) -> Self {
        StarTrackerError::ConfigError(err.to_string())
    }
}
