//! # Models
//!
//! This module contains the data models returned by developer platforms.
//!
//! The shapes mirror the GitHub REST API closely enough to be deserialized
//! straight from its responses, while exposing only the fields that star
//! tracking needs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// Which repositories of the authenticated account are listed.
///
/// # Examples
///
/// ```
/// use star_tracker_developer_platforms::models::RepositoryVisibility;
///
/// let visibility: RepositoryVisibility = "owned".parse().unwrap();
/// assert_eq!(visibility, RepositoryVisibility::Owned);
/// assert_eq!(
///     visibility.query_parameters(),
///     vec![("visibility", "all"), ("affiliation", "owner")]
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryVisibility {
    /// Public repositories only
    Public,
    /// Private repositories only
    Private,
    /// Every repository the token can see, including organisation and collaborator repos
    #[default]
    All,
    /// Every repository owned by the account, public or private
    Owned,
}

impl RepositoryVisibility {
    /// All accepted visibility values, in their configuration spelling.
    pub const VALUES: [&'static str; 4] = ["public", "private", "all", "owned"];

    pub fn as_str(&self) -> &'static str {
        match self {
            RepositoryVisibility::Public => "public",
            RepositoryVisibility::Private => "private",
            RepositoryVisibility::All => "all",
            RepositoryVisibility::Owned => "owned",
        }
    }

    /// Query parameters to send to the repository listing endpoint.
    ///
    /// `owned` has no direct API counterpart; it is expressed as all
    /// visibilities restricted to the `owner` affiliation.
    pub fn query_parameters(&self) -> Vec<(&'static str, &'static str)> {
        match self {
            RepositoryVisibility::Public => vec![("visibility", "public")],
            RepositoryVisibility::Private => vec![("visibility", "private")],
            RepositoryVisibility::All => vec![("visibility", "all")],
            RepositoryVisibility::Owned => vec![("visibility", "all"), ("affiliation", "owner")],
        }
    }
}

impl fmt::Display for RepositoryVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RepositoryVisibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(RepositoryVisibility::Public),
            "private" => Ok(RepositoryVisibility::Private),
            "all" => Ok(RepositoryVisibility::All),
            "owned" => Ok(RepositoryVisibility::Owned),
            other => Err(format!(
                "Invalid visibility \"{}\". Must be one of: {}",
                other,
                Self::VALUES.join(", ")
            )),
        }
    }
}

/// The account that owns a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    /// The account login, e.g. `octocat`
    pub login: String,
}

/// A repository as reported by the developer platform.
///
/// # Examples
///
/// ```
/// use star_tracker_developer_platforms::models::ForgeRepository;
///
/// let json = r#"{
///     "name": "hello-world",
///     "full_name": "octocat/hello-world",
///     "owner": { "login": "octocat" },
///     "private": false,
///     "archived": false,
///     "fork": false,
///     "stargazers_count": 42
/// }"#;
///
/// let repo: ForgeRepository = serde_json::from_str(json).unwrap();
/// assert_eq!(repo.stargazers_count, 42);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgeRepository {
    /// The repository name without the owner
    pub name: String,

    /// The `owner/name` identifier
    pub full_name: String,

    /// The owning account
    pub owner: Owner,

    #[serde(default)]
    pub private: bool,

    #[serde(default)]
    pub archived: bool,

    #[serde(default)]
    pub fork: bool,

    /// The current number of stars
    #[serde(default)]
    pub stargazers_count: u64,
}

/// An account that starred a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stargazer {
    /// The account login
    pub login: String,

    /// URL of the account avatar image
    pub avatar_url: String,

    /// URL of the account profile page
    pub profile_url: String,

    /// When the star was given
    pub starred_at: DateTime<Utc>,
}

/// Wire shape of a stargazer returned with the `star+json` media type.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StargazerRecord {
    pub starred_at: DateTime<Utc>,
    pub user: StargazerUser,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StargazerUser {
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub html_url: String,
}

impl From<StargazerRecord> for Stargazer {
    fn from(record: StargazerRecord) -> Self {
        Stargazer {
            login: record.user.login,
            avatar_url: record.user.avatar_url,
            profile_url: record.user.html_url,
            starred_at: record.starred_at,
        }
    }
}
