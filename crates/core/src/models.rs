//! # Models
//!
//! Data structures shared by the comparison, history and forecast engines.
//!
//! The persisted types ([`Snapshot`], [`SnapshotRepoEntry`], [`History`]) use
//! camelCase keys so that data files written by earlier versions of the
//! tracker keep loading.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// Current observed state of one repository.
///
/// Fetched fresh on every run and never persisted directly; the persisted
/// subset is [`SnapshotRepoEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryInfo {
    /// The owning account
    pub owner: String,

    /// The repository name without the owner
    pub name: String,

    /// The `owner/name` identifier, unique across runs
    pub full_name: String,

    pub private: bool,

    pub archived: bool,

    pub fork: bool,

    /// Current star count
    pub stars: u64,
}

/// The persisted part of a repository inside a [`Snapshot`].
///
/// `name` and `owner` are optional because data files from early versions
/// only stored the full name and the star count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRepoEntry {
    /// The `owner/name` identifier; unique within one snapshot
    pub full_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    pub stars: u64,
}

impl SnapshotRepoEntry {
    /// The stored name, or the part of the full name after the first `/`.
    pub fn resolved_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => split_full_name(&self.full_name).1.to_string(),
        }
    }

    /// The stored owner, or the part of the full name before the first `/`.
    pub fn resolved_owner(&self) -> String {
        match &self.owner {
            Some(owner) => owner.clone(),
            None => split_full_name(&self.full_name).0.to_string(),
        }
    }
}

/// Splits `owner/name`. A value without a slash is treated as a bare name.
pub(crate) fn split_full_name(full_name: &str) -> (&str, &str) {
    full_name.split_once('/').unwrap_or(("", full_name))
}

/// One point-in-time observation of all tracked repositories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// When the observation was made
    pub timestamp: DateTime<Utc>,

    /// Sum of the star counts of all entries at capture time
    pub total_stars: u64,

    /// The tracked repositories, in the order they were observed
    #[serde(default)]
    pub repos: Vec<SnapshotRepoEntry>,
}

impl Snapshot {
    /// The star count stored for `full_name`, if the repository was tracked.
    pub fn stars_for(&self, full_name: &str) -> Option<u64> {
        self.repos
            .iter()
            .find(|r| r.full_name == full_name)
            .map(|r| r.stars)
    }
}

/// The ordered sequence of retained snapshots, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct History {
    #[serde(default)]
    pub snapshots: Vec<Snapshot>,

    /// Total star count at the moment the last notification fired
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stars_at_last_notification: Option<u64>,
}

impl History {
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// One row of a star-count diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoResult {
    pub name: String,

    pub full_name: String,

    pub owner: String,

    /// Current star count; 0 for removed repositories
    pub current: u64,

    /// Star count in the previous snapshot; `None` when the repository is new
    pub previous: Option<u64>,

    /// `current - previous`; 0 for new repositories
    pub delta: i64,

    pub is_new: bool,

    pub is_removed: bool,
}

/// Aggregate of a star-count diff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Sum of `current` over all non-removed rows
    pub total_stars: u64,

    /// The previous snapshot's stored total, or 0 without a previous snapshot
    pub total_previous: u64,

    /// `total_stars - total_previous`
    pub total_delta: i64,

    /// Sum of the positive row deltas
    pub new_stars: u64,

    /// Sum of the magnitudes of the negative row deltas
    pub lost_stars: u64,

    /// Whether any row changed, appeared or disappeared
    pub changed: bool,
}

/// The result of comparing current repositories with a previous snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResults {
    pub repos: Vec<RepoResult>,
    pub summary: Summary,
}
