use ::csv::WriterBuilder;

use crate::errors::StarTrackerError;
use crate::models::{ComparisonResults, RepoResult};

#[cfg(test)]
#[path = "csv_tests.rs"]
mod tests;

pub const CSV_HEADER: [&str; 7] = [
    "repository",
    "owner",
    "name",
    "stars",
    "previous",
    "delta",
    "status",
];

fn repo_status(repo: &RepoResult) -> &'static str {
    if repo.is_new {
        "new"
    } else if repo.is_removed {
        "removed"
    } else {
        "active"
    }
}

/// Renders one row per diff entry, in diff order.
///
/// Fields are quoted only when they contain a delimiter, quote or line break.
pub fn render_csv_report(results: &ComparisonResults) -> Result<String, StarTrackerError> {
    let to_render_error = |e: String| StarTrackerError::RenderError("csv".to_string(), e);

    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer
        .write_record(CSV_HEADER)
        .map_err(|e| to_render_error(e.to_string()))?;

    for repo in &results.repos {
        let current = repo.current.to_string();
        let previous = repo.previous.map(|p| p.to_string()).unwrap_or_default();
        let delta = repo.delta.to_string();
        writer
            .write_record([
                repo.full_name.as_str(),
                repo.owner.as_str(),
                repo.name.as_str(),
                current.as_str(),
                previous.as_str(),
                delta.as_str(),
                repo_status(repo),
            ])
            .map_err(|e| to_render_error(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| to_render_error(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| to_render_error(e.to_string()))
}
