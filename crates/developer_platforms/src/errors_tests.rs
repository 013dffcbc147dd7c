use super::*;
use std::error::Error as StdError;

#[test]
fn test_api_error() {
    let error = Error::ApiError(500, "Server Error".to_string());

    assert_eq!(
        error.to_string(),
        "API request failed with status 500: Server Error"
    );
    assert!(error.source().is_none());
}

#[test]
fn test_auth_error() {
    let error = Error::AuthError("Bad credentials".to_string());

    assert_eq!(error.to_string(), "Authentication failed: Bad credentials");
    assert!(error.source().is_none());
}

#[test]
fn test_invalid_response_error() {
    let error = Error::InvalidResponse("missing field `name`".to_string());

    assert_eq!(
        error.to_string(),
        "Invalid response format: missing field `name`"
    );
    assert!(error.source().is_none());
}

#[test]
fn test_rate_limit_exceeded_error() {
    let error = Error::RateLimitExceeded;

    assert_eq!(error.to_string(), "Rate limit exceeded");
    assert!(error.source().is_none());
}

#[test]
fn test_request_failed_error() {
    let error = Error::RequestFailed("connection refused".to_string());

    assert_eq!(
        error.to_string(),
        "Failed to send the request: connection refused"
    );
    assert!(error.source().is_none());
}

#[test]
fn test_error_debug_format() {
    let error = Error::ApiError(404, "Not Found".to_string());
    let debug = format!("{:?}", error);

    assert!(debug.contains("ApiError"));
    assert!(debug.contains("404"));
}
