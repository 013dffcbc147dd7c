use super::*;
use crate::forecast::{ForecastPoint, ForecastResult};
use crate::models::{Snapshot, SnapshotRepoEntry};
use chrono::{Duration, TimeZone, Utc};

fn history(totals: &[u64]) -> History {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 6, 0, 0).unwrap();
    History {
        snapshots: totals
            .iter()
            .enumerate()
            .map(|(i, total)| Snapshot {
                timestamp: start + Duration::weeks(i as i64),
                total_stars: *total,
                repos: vec![],
            })
            .collect(),
        stars_at_last_notification: None,
    }
}

fn repo_history(weeks: &[&[(&str, u64)]]) -> History {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 6, 0, 0).unwrap();
    History {
        snapshots: weeks
            .iter()
            .enumerate()
            .map(|(i, entries)| Snapshot {
                timestamp: start + Duration::weeks(i as i64),
                total_stars: entries.iter().map(|(_, s)| s).sum(),
                repos: entries
                    .iter()
                    .map(|(name, stars)| SnapshotRepoEntry {
                        full_name: name.to_string(),
                        name: None,
                        owner: None,
                        stars: *stars,
                    })
                    .collect(),
            })
            .collect(),
        stars_at_last_notification: None,
    }
}

fn forecast(linear: &[u64], weighted: &[u64]) -> ForecastData {
    let result = |method, values: &[u64]| ForecastResult {
        method,
        points: values
            .iter()
            .enumerate()
            .map(|(i, v)| ForecastPoint {
                week_offset: i as u32 + 1,
                predicted: *v,
            })
            .collect(),
    };

    ForecastData {
        aggregate: vec![
            result(ForecastMethod::LinearRegression, linear),
            result(ForecastMethod::WeightedMovingAverage, weighted),
        ],
        repos: vec![],
    }
}

fn names(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[test]
fn test_no_chart_below_two_snapshots() {
    assert!(render_history_chart(&History::default()).is_none());
    assert!(render_history_chart(&history(&[10])).is_none());
}

#[test]
fn test_chart_contains_one_point_per_snapshot() {
    let svg = render_history_chart(&history(&[10, 12, 15])).unwrap();

    assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
    assert!(svg.contains(r#"width="800" height="400""#));
    assert_eq!(svg.matches("<circle").count(), 3);
    assert!(svg.contains("2024-01-01"));
    assert!(svg.contains("2024-01-15"));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn test_chart_keeps_only_recent_snapshots() {
    let totals: Vec<u64> = (0..45).collect();
    let svg = render_history_chart(&history(&totals)).unwrap();

    assert_eq!(svg.matches("<circle").count(), MAX_DATA_POINTS);
    // the oldest plotted snapshot is week 15
    assert!(!svg.contains(">2024-01-01<"));
    assert!(svg.contains(">2024-04-15<"));
}

#[test]
fn test_chart_spans_plot_area() {
    let svg = render_history_chart(&history(&[5, 5])).unwrap();

    // flat series sits on the vertical middle of the plot area
    assert!(svg.contains("M60.0,200.0 L770.0,200.0"));
}

#[test]
fn test_nice_axis_steps() {
    assert_eq!(nice_axis_steps(0.0, 100.0, 5), vec![0, 20, 40, 60, 80, 100]);
    assert_eq!(nice_axis_steps(0.0, 8.0, 5), vec![0, 2, 4, 6, 8]);
    assert_eq!(nice_axis_steps(7.0, 7.0, 5), vec![7]);
}

#[test]
fn test_history_chart_marks_crossed_milestones() {
    let svg = render_history_chart(&history(&[40, 60])).unwrap();

    assert!(svg.contains("50 ★"));
    assert!(svg.contains(r#"stroke-dasharray="6,6""#));
    assert!(!svg.contains("10 ★"));
    assert!(!svg.contains("100 ★"));
}

#[test]
fn test_history_chart_without_crossed_milestones() {
    let svg = render_history_chart(&history(&[12, 14])).unwrap();

    assert!(!svg.contains("★"));
}

#[test]
fn test_repo_chart_plots_single_repository() {
    let history = repo_history(&[
        &[("octocat/alpha", 3), ("octocat/beta", 1)],
        &[("octocat/beta", 2)],
        &[("octocat/alpha", 7), ("octocat/beta", 2)],
    ]);

    let svg = render_repo_chart(&history, "octocat/alpha").unwrap();

    assert!(svg.contains(">octocat/alpha Star History<"));
    assert_eq!(svg.matches("<circle").count(), 3);
    assert!(!svg.contains("★"));
    let short = repo_history(&[&[("octocat/alpha", 3)]]);
    assert!(render_repo_chart(&short, "octocat/alpha").is_none());
}

#[test]
fn test_comparison_chart_shortens_labels_for_single_owner() {
    let history = repo_history(&[
        &[("octocat/alpha", 3), ("octocat/beta", 1)],
        &[("octocat/alpha", 5), ("octocat/beta", 2)],
    ]);

    let top = names(&["octocat/alpha", "octocat/beta"]);
    let svg = render_comparison_chart(&history, &top).unwrap();

    assert!(svg.contains(">Top Repositories<"));
    assert!(svg.contains(">alpha<"));
    assert!(svg.contains(">beta<"));
    assert!(svg.contains(r##"stroke="#dfb317""##));
    assert!(svg.contains(r##"stroke="#28a745""##));
    assert!(!svg.contains("fill-opacity"));
    assert_eq!(svg.matches("<circle").count(), 4);
}

#[test]
fn test_comparison_chart_keeps_full_names_for_mixed_owners() {
    let history = repo_history(&[
        &[("octocat/alpha", 3), ("hubot/beta", 1)],
        &[("octocat/alpha", 5), ("hubot/beta", 2)],
    ]);

    let svg = render_comparison_chart(&history, &names(&["octocat/alpha", "hubot/beta"])).unwrap();

    assert!(svg.contains(">octocat/alpha<"));
    assert!(svg.contains(">hubot/beta<"));
}

#[test]
fn test_comparison_chart_caps_repositories() {
    let repos: Vec<String> = (0..12).map(|i| format!("octocat/repo{}", i)).collect();
    let entries: Vec<(&str, u64)> = repos.iter().map(|r| (r.as_str(), 1)).collect();
    let history = repo_history(&[entries.as_slice(), entries.as_slice()]);

    let svg = render_comparison_chart(&history, &repos).unwrap();

    assert_eq!(svg.matches(r#"stroke-width="2""#).count(), MAX_COMPARISON_REPOS);
    assert!(svg.contains(">repo9<"));
    assert!(!svg.contains(">repo10<"));
}

#[test]
fn test_comparison_chart_needs_repositories() {
    let history = repo_history(&[&[("octocat/alpha", 1)], &[("octocat/alpha", 2)]]);

    assert!(render_comparison_chart(&history, &[]).is_none());
}

#[test]
fn test_forecast_chart_extends_history_with_dashed_projections() {
    let svg = render_forecast_chart(&history(&[100, 110, 120]), &forecast(&[130, 140], &[125, 128]))
        .unwrap();

    assert!(svg.contains(">Growth Forecast<"));
    assert!(svg.contains(">Week 1<"));
    assert!(svg.contains(">Week 2<"));
    assert!(svg.contains(">Linear Regression<"));
    assert!(svg.contains(">Weighted Moving Avg<"));
    assert_eq!(svg.matches(r#"stroke-dasharray="8,4""#).count(), 2);
    assert!(svg.contains(r##"stroke="#d73a49""##));
    // only the recorded snapshots get points
    assert_eq!(svg.matches("<circle").count(), 3);
    // projections start at the newest snapshot, the third of five columns
    assert_eq!(svg.matches(r#"d="M415.0,"#).count(), 2);
}

#[test]
fn test_repo_chart_path() {
    assert_eq!(repo_chart_path("octocat/hello"), "charts/octocat-hello.svg");
}

#[test]
fn test_render_charts_writes_every_chart() {
    let history = repo_history(&[
        &[("octocat/alpha", 3), ("octocat/beta", 1)],
        &[("octocat/alpha", 5), ("octocat/beta", 2)],
        &[("octocat/alpha", 8), ("octocat/beta", 2)],
    ]);
    let top = names(&["octocat/alpha", "octocat/beta"]);
    let forecast = forecast(&[11, 12], &[10, 11]);

    let paths: Vec<String> = render_charts(&history, &top, Some(&forecast))
        .into_iter()
        .map(|(path, _)| path)
        .collect();

    assert_eq!(
        paths,
        vec![
            HISTORY_CHART_PATH,
            "charts/octocat-alpha.svg",
            "charts/octocat-beta.svg",
            COMPARISON_CHART_PATH,
            FORECAST_CHART_PATH,
        ]
    );
}

#[test]
fn test_render_charts_short_history() {
    let history = repo_history(&[&[("octocat/alpha", 3)]]);

    assert!(render_charts(&history, &names(&["octocat/alpha"]), None).is_empty());
}
