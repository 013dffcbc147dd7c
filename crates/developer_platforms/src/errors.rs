#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Error types for developer platform operations.
///
/// This enum represents all possible errors that can occur when reading
/// repository and stargazer data from developer platforms like GitHub. Each
/// variant provides specific context about the type of failure encountered.
///
/// # Examples
///
/// ```rust
/// use star_tracker_developer_platforms::errors::Error;
///
/// // Authentication error
/// let auth_error = Error::AuthError("Bad credentials".to_string());
/// println!("{}", auth_error);
///
/// // Rate limit error
/// let rate_limit = Error::RateLimitExceeded;
/// assert_eq!(rate_limit.to_string(), "Rate limit exceeded");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The platform answered with a non-success status code.
    ///
    /// Parameters: the HTTP status code and the response body, which for
    /// GitHub usually carries a JSON `message` explaining the failure.
    #[error("API request failed with status {0}: {1}")]
    ApiError(u16, String),

    /// Authentication failed with the platform.
    ///
    /// This error indicates that the provided token is invalid, expired, or
    /// lacks the scopes needed to list the repositories of the account.
    #[error("Authentication failed: {0}")]
    AuthError(String),

    /// Invalid response format from platform API.
    ///
    /// The body could not be decoded into the expected shape. This usually
    /// means the API changed or an intermediary returned an error page.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// Platform rate limit exceeded.
    ///
    /// GitHub allows 5000 authenticated requests per hour. Stargazer
    /// tracking on accounts with many popular repositories can exhaust this.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("Failed to send the request: {0}")]
    RequestFailed(String),
}
