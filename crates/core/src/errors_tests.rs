use super::*;

#[test]
fn test_config_error_display() {
    let err = StarTrackerError::ConfigError("max_history must be at least 1".to_string());
    assert_eq!(
        err.to_string(),
        "Configuration error: max_history must be at least 1"
    );
}

#[test]
fn test_provider_error_from_platform_error() {
    let err: StarTrackerError = ProviderError::RateLimitExceeded.into();
    assert!(matches!(err, StarTrackerError::ProviderError(_)));
    assert_eq!(
        err.to_string(),
        "Developer platform error: Rate limit exceeded"
    );
}

#[test]
fn test_render_error_display() {
    let err = StarTrackerError::RenderError("csv".to_string(), "writer closed".to_string());
    assert_eq!(
        err.to_string(),
        "Failed to render the csv report. Issue was: 'writer closed'."
    );
}

#[test]
fn test_storage_error_display() {
    let err = StarTrackerError::StorageError("disk full".to_string());
    assert_eq!(err.to_string(), "Storage error: disk full");
}

#[test]
fn test_config_load_error_converts_to_config_error() {
    let err: StarTrackerError = ConfigLoadError::Invalid("top_repos must be at least 1".into()).into();
    match err {
        StarTrackerError::ConfigError(message) => {
            assert_eq!(message, "Invalid configuration: top_repos must be at least 1")
        }
        other => panic!("Expected ConfigError, got {:?}", other),
    }
}

#[test]
fn test_config_load_error_from_io() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err: ConfigLoadError = io.into();
    assert!(err.to_string().starts_with("Failed to read the configuration file"));
}
