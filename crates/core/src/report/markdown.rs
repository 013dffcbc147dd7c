//! Markdown summary of a run, suitable as a repository README.

use chrono::{DateTime, SecondsFormat, Utc};
use indoc::formatdoc;

use super::shared::{prepare_report_data, REPORT_DATE_FORMAT};
use super::chart::repo_chart_path;
use super::{
    COMPARISON_CHART_PATH, FORECAST_CHART_PATH, HISTORY_CHART_PATH, MIN_SNAPSHOTS_FOR_CHART,
};
use crate::forecast::{ForecastData, ForecastResult, FORECAST_WEEKS};
use crate::formatting::{delta_indicator, trend_icon};
use crate::models::{ComparisonResults, History};
use crate::stargazers::StargazerDiffResult;

#[cfg(test)]
#[path = "markdown_tests.rs"]
mod tests;

const PROJECT_LINK: &str = "[Star Tracker](https://github.com/pvandervelde/star_tracker)";

/// Everything the markdown report can show.
///
/// Only `results` and the timestamps are required; every optional section is
/// omitted when its input is `None`.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownReport<'a> {
    pub results: &'a ComparisonResults,

    /// When the previous snapshot was taken, `None` on the first run
    pub previous_timestamp: Option<DateTime<Utc>>,

    pub generated_at: DateTime<Utc>,

    /// Stored history, used to decide whether a chart exists
    pub history: Option<&'a History>,

    pub include_charts: bool,

    /// Repositories with their own chart, most starred first
    pub top_repos: &'a [String],

    /// `Some` when stargazer tracking ran, even with no new stargazers
    pub stargazer_diff: Option<&'a StargazerDiffResult>,

    pub forecast: Option<&'a ForecastData>,
}

fn stars_count(count: u64) -> String {
    if count == 1 {
        "1 star".to_string()
    } else {
        format!("{} stars", count)
    }
}

fn repo_link(full_name: &str) -> String {
    format!("[{}](https://github.com/{})", full_name, full_name)
}

pub fn render_markdown_report(report: &MarkdownReport<'_>) -> String {
    let summary = &report.results.summary;
    let data = prepare_report_data(
        report.results,
        report.previous_timestamp,
        report.generated_at,
    );

    let has_chart_history = report.include_charts
        && report
            .history
            .is_some_and(|h| h.snapshots.len() >= MIN_SNAPSHOTS_FOR_CHART);

    let mut lines: Vec<String> = vec![
        "# Star Tracker Report".to_string(),
        String::new(),
        format!(
            "**{}** | Total: **{}** | Change: **{}**",
            data.now,
            stars_count(summary.total_stars),
            delta_indicator(summary.total_delta)
        ),
        String::new(),
    ];

    if let Some(previous) = &data.previous {
        lines.push(format!("> Compared to snapshot from {}", previous));
        lines.push(String::new());
    }

    if has_chart_history {
        lines.push("## 📈 Star Trend".to_string());
        lines.push(String::new());
        lines.push(format!("![Star History](./{})", HISTORY_CHART_PATH));
        lines.push(String::new());
        lines.extend(repo_charts_section(report.top_repos));
    }

    if !data.sorted.is_empty() {
        lines.push("## Repositories".to_string());
        lines.push(String::new());
        lines.push("| Repository | Stars | Change | Trend |".to_string());
        lines.push("|:-----------|------:|-------:|:-----:|".to_string());
        for repo in &data.sorted {
            let badge = if repo.is_new { " `new`" } else { "" };
            lines.push(format!(
                "| {}{} | {} | {} | {} |",
                repo_link(&repo.full_name),
                badge,
                repo.current,
                delta_indicator(repo.delta),
                trend_icon(repo.delta)
            ));
        }
        lines.push(String::new());
    }

    if !data.new_repos.is_empty() {
        lines.push("## New Repositories".to_string());
        lines.push(String::new());
        for repo in &data.new_repos {
            lines.push(format!(
                "- {}: {}",
                repo_link(&repo.full_name),
                stars_count(repo.current)
            ));
        }
        lines.push(String::new());
    }

    if !data.removed_repos.is_empty() {
        lines.push("## Removed Repositories".to_string());
        lines.push(String::new());
        for repo in &data.removed_repos {
            lines.push(format!(
                "- ~~{}~~ (was {})",
                repo.full_name,
                stars_count(repo.previous.unwrap_or(0))
            ));
        }
        lines.push(String::new());
    }

    if summary.total_delta != 0 {
        lines.push(formatdoc!(
            "
            ## Summary

            - **Stars gained:** {gained}
            - **Stars lost:** {lost}
            - **Net change:** {net}
            ",
            gained = summary.new_stars,
            lost = summary.lost_stars,
            net = delta_indicator(summary.total_delta),
        ));
    }

    if let Some(diff) = report.stargazer_diff {
        lines.extend(stargazer_section(diff));
    }

    if let Some(forecast) = report.forecast {
        lines.extend(forecast_section(forecast, has_chart_history));
    }

    lines.push("---".to_string());
    lines.push(format!(
        "*Generated by {} on {}*",
        PROJECT_LINK,
        report
            .generated_at
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    ));

    lines.join("\n")
}

fn stargazer_section(diff: &StargazerDiffResult) -> Vec<String> {
    let mut lines = vec!["## 👤 New Stargazers".to_string(), String::new()];

    if diff.total_new == 0 {
        lines.push("No new stargazers since the last run.".to_string());
        lines.push(String::new());
        return lines;
    }

    let noun = if diff.total_new == 1 {
        "stargazer"
    } else {
        "stargazers"
    };
    lines.push(format!("{} new {} since the last run.", diff.total_new, noun));
    lines.push(String::new());

    for entry in &diff.entries {
        lines.push("<details>".to_string());
        lines.push(format!(
            "<summary>{} ({})</summary>",
            entry.repo_full_name,
            entry.new_stargazers.len()
        ));
        lines.push(String::new());
        for stargazer in &entry.new_stargazers {
            lines.push(format!(
                "- <img src=\"{}\" width=\"20\" height=\"20\" style=\"border-radius:50%;vertical-align:middle;\"> [{}]({}) starred on {}",
                stargazer.avatar_url,
                stargazer.login,
                stargazer.profile_url,
                stargazer.starred_at.format(REPORT_DATE_FORMAT)
            ));
        }
        lines.push(String::new());
        lines.push("</details>".to_string());
        lines.push(String::new());
    }

    lines
}

fn repo_charts_section(top_repos: &[String]) -> Vec<String> {
    if top_repos.is_empty() {
        return Vec::new();
    }

    let mut lines = vec![
        "### By Repository".to_string(),
        String::new(),
        format!("![Top Repositories](./{})", COMPARISON_CHART_PATH),
        String::new(),
        "<details>".to_string(),
        "<summary>Individual Repository Charts</summary>".to_string(),
        String::new(),
    ];

    for name in top_repos {
        lines.push(format!("#### {}", name));
        lines.push(String::new());
        lines.push(format!("![{}](./{})", name, repo_chart_path(name)));
        lines.push(String::new());
    }

    lines.push("</details>".to_string());
    lines.push(String::new());
    lines
}

fn forecast_section(forecast: &ForecastData, with_chart: bool) -> Vec<String> {
    let mut lines = vec![
        "## 🔮 Growth Forecast".to_string(),
        String::new(),
        forecast_table("Total stars", &forecast.aggregate),
        String::new(),
    ];

    if with_chart {
        lines.push(format!("![Growth Forecast](./{})", FORECAST_CHART_PATH));
        lines.push(String::new());
    }

    if !forecast.repos.is_empty() {
        lines.push("### By Repository".to_string());
        lines.push(String::new());
        for repo in &forecast.repos {
            lines.push("<details>".to_string());
            lines.push(format!("<summary>{}</summary>", repo.repo_full_name));
            lines.push(String::new());
            lines.push(forecast_table(&repo.repo_full_name, &repo.forecasts));
            lines.push(String::new());
            lines.push("</details>".to_string());
            lines.push(String::new());
        }
    }

    lines
}

fn forecast_table(title: &str, forecasts: &[ForecastResult]) -> String {
    let week_headers: Vec<String> = (1..=FORECAST_WEEKS).map(|w| format!("Week {}", w)).collect();

    let mut lines = vec![
        format!("**{}**", title),
        String::new(),
        format!("| Method | {} |", week_headers.join(" | ")),
        format!("|:---|{}|", vec!["---:"; week_headers.len()].join("|")),
    ];

    for result in forecasts {
        let values: Vec<String> = result
            .points
            .iter()
            .map(|p| p.predicted.to_string())
            .collect();
        lines.push(format!(
            "| {} | {} |",
            result.method.label(),
            values.join(" | ")
        ));
    }

    lines.join("\n")
}
