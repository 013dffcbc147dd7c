use chrono::{DateTime, Utc};

use crate::models::{ComparisonResults, RepoResult};

#[cfg(test)]
#[path = "shared_tests.rs"]
mod tests;

/// Date format used in every report.
pub const REPORT_DATE_FORMAT: &str = "%Y-%m-%d";

/// The diff rows grouped the way the reports present them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportData<'a> {
    /// Rows that still exist, in diff order
    pub active_repos: Vec<&'a RepoResult>,

    pub new_repos: Vec<&'a RepoResult>,

    pub removed_repos: Vec<&'a RepoResult>,

    /// `active_repos` by current stars, most starred first; ties keep diff order
    pub sorted: Vec<&'a RepoResult>,

    /// The run date as `YYYY-MM-DD`
    pub now: String,

    /// The previous run date as `YYYY-MM-DD`, `None` on the first run
    pub previous: Option<String>,
}

pub fn prepare_report_data<'a>(
    results: &'a ComparisonResults,
    previous_timestamp: Option<DateTime<Utc>>,
    generated_at: DateTime<Utc>,
) -> ReportData<'a> {
    let active_repos: Vec<&RepoResult> = results.repos.iter().filter(|r| !r.is_removed).collect();

    let mut sorted = active_repos.clone();
    sorted.sort_by(|a, b| b.current.cmp(&a.current));

    ReportData {
        new_repos: results.repos.iter().filter(|r| r.is_new).collect(),
        removed_repos: results.repos.iter().filter(|r| r.is_removed).collect(),
        active_repos,
        sorted,
        now: generated_at.format(REPORT_DATE_FORMAT).to_string(),
        previous: previous_timestamp.map(|t| t.format(REPORT_DATE_FORMAT).to_string()),
    }
}
