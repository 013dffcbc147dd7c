use star_tracker_core::errors::StarTrackerError;
use star_tracker_developer_platforms::errors::Error as ProviderError;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Authentication error
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Network error
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Invalid arguments
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Reading or writing the data directory failed
    #[error("Storage error: {0}")]
    StorageError(String),

    /// The tracking run failed
    #[error("Tracking failed: {0}")]
    TrackingFailed(String),

    /// Other errors
    #[error("Error: {0}")]
    Other(String),
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::Other(err.to_string())
    }
}

impl From<ProviderError> for CliError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::AuthError(_) => CliError::AuthError(err.to_string()),
            ProviderError::RequestFailed(_) | ProviderError::RateLimitExceeded => {
                CliError::NetworkError(err.to_string())
            }
            ProviderError::ApiError(_, _) | ProviderError::InvalidResponse(_) => {
                CliError::TrackingFailed(err.to_string())
            }
        }
    }
}

impl From<StarTrackerError> for CliError {
    fn from(err: StarTrackerError) -> Self {
        match err {
            StarTrackerError::ConfigError(msg) => CliError::ConfigError(msg),
            StarTrackerError::ProviderError(e) => CliError::from(e),
            StarTrackerError::StorageError(msg) => CliError::StorageError(msg),
            StarTrackerError::RenderError(_, _) => CliError::TrackingFailed(err.to_string()),
        }
    }
}

impl std::process::Termination for CliError {
    fn report(self) -> std::process::ExitCode {
        match self {
            CliError::ConfigError(_) => std::process::ExitCode::from(2),
            CliError::AuthError(_) => std::process::ExitCode::from(3),
            CliError::NetworkError(_) => std::process::ExitCode::from(4),
            CliError::InvalidArguments(_) => std::process::ExitCode::from(5),
            CliError::StorageError(_) => std::process::ExitCode::from(6),
            CliError::TrackingFailed(_) => std::process::ExitCode::from(1),
            CliError::Other(_) => std::process::ExitCode::FAILURE,
        }
    }
}
