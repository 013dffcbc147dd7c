//! Stargazer tracking.
//!
//! The previous run's stargazers are stored as a map of repository full name
//! to login list. Diffing the freshly fetched stargazers against that map
//! yields the people who starred a repository since the last run.

use serde::{Deserialize, Serialize};
use star_tracker_developer_platforms::models::Stargazer;
use std::collections::{BTreeMap, HashSet};

#[cfg(test)]
#[path = "stargazers_tests.rs"]
mod tests;

/// Repository full name to stargazer logins, as persisted between runs.
pub type StargazerMap = BTreeMap<String, Vec<String>>;

/// All stargazers currently listed for one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoStargazers {
    pub repo_full_name: String,
    pub stargazers: Vec<Stargazer>,
}

/// Stargazers that were not present in the previous run for one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StargazerDiffEntry {
    pub repo_full_name: String,
    pub new_stargazers: Vec<Stargazer>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StargazerDiffResult {
    /// Only repositories that gained at least one stargazer, in input order
    pub entries: Vec<StargazerDiffEntry>,
    pub total_new: usize,
}

/// Finds the stargazers of each repository that are missing from `previous`.
///
/// A repository absent from `previous` reports all of its stargazers as new.
pub fn diff_stargazers(current: &[RepoStargazers], previous: &StargazerMap) -> StargazerDiffResult {
    let mut entries = Vec::new();
    let mut total_new = 0;

    for repo in current {
        let known: HashSet<&str> = previous
            .get(&repo.repo_full_name)
            .map(|logins| logins.iter().map(String::as_str).collect())
            .unwrap_or_default();

        let new_stargazers: Vec<Stargazer> = repo
            .stargazers
            .iter()
            .filter(|s| !known.contains(s.login.as_str()))
            .cloned()
            .collect();

        if !new_stargazers.is_empty() {
            total_new += new_stargazers.len();
            entries.push(StargazerDiffEntry {
                repo_full_name: repo.repo_full_name.clone(),
                new_stargazers,
            });
        }
    }

    StargazerDiffResult { entries, total_new }
}

/// Builds the map stored for the next run.
pub fn build_stargazer_map(current: &[RepoStargazers]) -> StargazerMap {
    current
        .iter()
        .map(|repo| {
            (
                repo.repo_full_name.clone(),
                repo.stargazers.iter().map(|s| s.login.clone()).collect(),
            )
        })
        .collect()
}
