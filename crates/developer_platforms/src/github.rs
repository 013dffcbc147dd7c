use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION},
    Client, Response, StatusCode,
};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    errors::Error,
    models::{ForgeRepository, RepositoryVisibility, Stargazer, StargazerRecord},
    RepositoryProvider,
};

#[cfg(test)]
#[path = "github_tests.rs"]
mod tests;

/// Base URL of the public GitHub REST API.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Maximum page size accepted by the GitHub REST API.
const PER_PAGE: usize = 100;

const API_VERSION: &str = "2022-11-28";
const DEFAULT_MEDIA_TYPE: &str = "application/vnd.github+json";
const STAR_MEDIA_TYPE: &str = "application/vnd.github.star+json";
const USER_AGENT: &str = concat!("star-tracker/", env!("CARGO_PKG_VERSION"));

/// Reads repositories and stargazers from the GitHub REST API using a
/// personal access token.
///
/// # Example
///
/// ```rust,no_run
/// use star_tracker_developer_platforms::github::GitHubProvider;
/// use star_tracker_developer_platforms::models::RepositoryVisibility;
/// use star_tracker_developer_platforms::RepositoryProvider;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let provider = GitHubProvider::new("ghp_example")?;
///     let repos = provider.list_repositories(RepositoryVisibility::Public).await?;
///     println!("Found {} repositories", repos.len());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct GitHubProvider {
    client: Client,
    base_url: String,
}

impl GitHubProvider {
    /// Creates a provider that talks to `api.github.com`.
    pub fn new(token: &str) -> Result<Self, Error> {
        Self::with_base_url(token, DEFAULT_API_BASE_URL)
    }

    /// Creates a provider that talks to a different API root, e.g. a GitHub
    /// Enterprise Server instance (`https://ghe.example.com/api/v3`).
    pub fn with_base_url(token: &str, base_url: &str) -> Result<Self, Error> {
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
            .map_err(|_| {
                Error::AuthError(
                    "The token contains characters that are not valid in an HTTP header"
                        .to_string(),
                )
            })?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(ACCEPT, HeaderValue::from_static(DEFAULT_MEDIA_TYPE));
        headers.insert("X-GitHub-Api-Version", HeaderValue::from_static(API_VERSION));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::RequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetches every page of a list endpoint.
    ///
    /// GitHub does not report a total count for these endpoints, so paging
    /// stops at the first page that is not full.
    async fn fetch_all_pages<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        media_type: Option<&'static str>,
    ) -> Result<Vec<T>, Error> {
        let url = format!("{}{}", self.base_url, path);
        let per_page = PER_PAGE.to_string();

        let mut items = Vec::new();
        let mut page: u32 = 1;
        loop {
            let page_number = page.to_string();
            let mut request = self
                .client
                .get(&url)
                .query(query)
                .query(&[("per_page", per_page.as_str()), ("page", page_number.as_str())]);
            if let Some(media_type) = media_type {
                request = request.header(ACCEPT, media_type);
            }

            let response = request.send().await.map_err(|e| {
                log_reqwest_error("Failed to send request to GitHub", path, &e);
                Error::RequestFailed(e.to_string())
            })?;
            let response = error_for_status(path, response).await?;

            let batch: Vec<T> = response.json().await.map_err(|e| {
                log_reqwest_error("Failed to decode GitHub response", path, &e);
                Error::InvalidResponse(e.to_string())
            })?;

            let count = batch.len();
            items.extend(batch);
            debug!(path, page, count, "Fetched page");

            if count < PER_PAGE {
                break;
            }
            page += 1;
        }

        Ok(items)
    }
}

/// Converts a non-success response into the matching [`Error`].
async fn error_for_status(path: &str, response: Response) -> Result<Response, Error> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let rate_limit_exhausted = response
        .headers()
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim() == "0")
        .unwrap_or(false);
    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body);

    error!(
        path,
        status = status.as_u16(),
        error_message = message.as_str(),
        "Received an error from GitHub"
    );

    match status {
        StatusCode::UNAUTHORIZED => Err(Error::AuthError(message)),
        StatusCode::FORBIDDEN if rate_limit_exhausted => Err(Error::RateLimitExceeded),
        StatusCode::TOO_MANY_REQUESTS => Err(Error::RateLimitExceeded),
        _ => Err(Error::ApiError(status.as_u16(), message)),
    }
}

/// Pulls the `message` field out of a GitHub error body, falling back to
/// the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

fn log_reqwest_error(message: &str, path: &str, e: &reqwest::Error) {
    if e.is_timeout() {
        error!(
            path,
            error_message = e.to_string(),
            "{}. The request timed out.",
            message
        )
    } else if e.is_connect() {
        error!(
            path,
            error_message = e.to_string(),
            "{}. Could not connect.",
            message
        )
    } else if e.is_decode() {
        error!(
            path,
            error_message = e.to_string(),
            "{}. The body was not valid JSON for the expected type.",
            message
        )
    } else {
        error!(path, error_message = e.to_string(), message)
    }
}

#[async_trait]
impl RepositoryProvider for GitHubProvider {
    #[instrument(skip(self))]
    async fn list_repositories(
        &self,
        visibility: RepositoryVisibility,
    ) -> Result<Vec<ForgeRepository>, Error> {
        let mut query = visibility.query_parameters();
        query.push(("sort", "full_name"));

        let repos: Vec<ForgeRepository> = self.fetch_all_pages("/user/repos", &query, None).await?;

        info!(count = repos.len(), "Fetched repositories from GitHub");
        Ok(repos)
    }

    #[instrument(skip(self))]
    async fn list_stargazers(
        &self,
        repo_owner: &str,
        repo_name: &str,
    ) -> Result<Vec<Stargazer>, Error> {
        let path = format!(
            "/repos/{}/{}/stargazers",
            urlencoding::encode(repo_owner),
            urlencoding::encode(repo_name)
        );

        let records: Vec<StargazerRecord> = self
            .fetch_all_pages(&path, &[], Some(STAR_MEDIA_TYPE))
            .await
            .inspect_err(|e| {
                warn!(
                    repository_owner = repo_owner,
                    repository = repo_name,
                    error = e.to_string(),
                    "Failed to list stargazers",
                );
            })?;

        Ok(records.into_iter().map(Stargazer::from).collect())
    }
}
