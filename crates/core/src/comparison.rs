//! # Star Comparison
//!
//! Reconciles the repositories observed in this run against the last stored
//! snapshot and captures the observation as a new snapshot.

use chrono::{DateTime, SubsecRound, Utc};
use std::collections::{HashMap, HashSet};

use crate::models::{
    ComparisonResults, RepoResult, RepositoryInfo, Snapshot, SnapshotRepoEntry, Summary,
};

#[cfg(test)]
#[path = "comparison_tests.rs"]
mod tests;

/// Compares the current repositories with the previous snapshot.
///
/// Rows for current repositories come first, in input order, followed by a
/// synthetic row for every repository that only exists in the previous
/// snapshot (in stored order).
///
/// A repository seen for the first time gets `previous = None` and a delta of
/// zero, so it adds to `total_stars` but not to `new_stars`. Downstream report
/// text relies on that arithmetic.
///
/// # Examples
///
/// ```
/// use star_tracker_core::comparison::compare_stars;
/// use star_tracker_core::models::RepositoryInfo;
///
/// let repos = vec![RepositoryInfo {
///     owner: "octocat".to_string(),
///     name: "alpha".to_string(),
///     full_name: "octocat/alpha".to_string(),
///     private: false,
///     archived: false,
///     fork: false,
///     stars: 10,
/// }];
///
/// let results = compare_stars(&repos, None);
/// assert!(results.repos[0].is_new);
/// assert_eq!(results.summary.total_delta, 10);
/// assert_eq!(results.summary.new_stars, 0);
/// ```
pub fn compare_stars(
    current_repos: &[RepositoryInfo],
    previous_snapshot: Option<&Snapshot>,
) -> ComparisonResults {
    let previous_stars: HashMap<&str, u64> = previous_snapshot
        .map(|s| {
            s.repos
                .iter()
                .map(|r| (r.full_name.as_str(), r.stars))
                .collect()
        })
        .unwrap_or_default();

    let mut repos: Vec<RepoResult> = current_repos
        .iter()
        .map(|repo| {
            let previous = previous_stars.get(repo.full_name.as_str()).copied();
            let delta = match previous {
                Some(p) => signed(repo.stars) - signed(p),
                None => 0,
            };

            RepoResult {
                name: repo.name.clone(),
                full_name: repo.full_name.clone(),
                owner: repo.owner.clone(),
                current: repo.stars,
                previous,
                delta,
                is_new: previous.is_none(),
                is_removed: false,
            }
        })
        .collect();

    if let Some(snapshot) = previous_snapshot {
        let current_names: HashSet<&str> =
            current_repos.iter().map(|r| r.full_name.as_str()).collect();

        repos.extend(
            snapshot
                .repos
                .iter()
                .filter(|entry| !current_names.contains(entry.full_name.as_str()))
                .map(|entry| RepoResult {
                    name: entry.resolved_name(),
                    full_name: entry.full_name.clone(),
                    owner: entry.resolved_owner(),
                    current: 0,
                    previous: Some(entry.stars),
                    delta: -signed(entry.stars),
                    is_new: false,
                    is_removed: true,
                }),
        );
    }

    let total_stars: u64 = repos
        .iter()
        .filter(|r| !r.is_removed)
        .map(|r| r.current)
        .sum();
    let total_previous = previous_snapshot.map(|s| s.total_stars).unwrap_or(0);

    let new_stars: u64 = repos
        .iter()
        .filter(|r| r.delta > 0)
        .map(|r| r.delta.unsigned_abs())
        .sum();
    let lost_stars: u64 = repos
        .iter()
        .filter(|r| r.delta < 0)
        .map(|r| r.delta.unsigned_abs())
        .sum();

    let changed = repos
        .iter()
        .any(|r| r.delta != 0 || r.is_new || r.is_removed);

    ComparisonResults {
        repos,
        summary: Summary {
            total_stars,
            total_previous,
            total_delta: signed(total_stars) - signed(total_previous),
            new_stars,
            lost_stars,
            changed,
        },
    }
}

/// Captures the current repositories as a snapshot taken now.
pub fn create_snapshot(current_repos: &[RepositoryInfo], summary: &Summary) -> Snapshot {
    // stored timestamps carry millisecond precision
    create_snapshot_at(current_repos, summary, Utc::now().trunc_subsecs(3))
}

/// Captures the current repositories as a snapshot taken at `timestamp`.
pub fn create_snapshot_at(
    current_repos: &[RepositoryInfo],
    summary: &Summary,
    timestamp: DateTime<Utc>,
) -> Snapshot {
    Snapshot {
        timestamp,
        total_stars: summary.total_stars,
        repos: current_repos
            .iter()
            .map(|repo| SnapshotRepoEntry {
                full_name: repo.full_name.clone(),
                name: Some(repo.name.clone()),
                owner: Some(repo.owner.clone()),
                stars: repo.stars,
            })
            .collect(),
    }
}

fn signed(count: u64) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}
