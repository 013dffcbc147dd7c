use super::*;
use crate::models::{Snapshot, SnapshotRepoEntry};
use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

fn entry(full_name: &str, stars: u64) -> SnapshotRepoEntry {
    SnapshotRepoEntry {
        full_name: full_name.to_string(),
        name: None,
        owner: None,
        stars,
    }
}

fn history_of(snapshots: Vec<(u64, Vec<SnapshotRepoEntry>)>) -> History {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    History {
        snapshots: snapshots
            .into_iter()
            .enumerate()
            .map(|(i, (total_stars, repos))| Snapshot {
                timestamp: start + Duration::weeks(i as i64),
                total_stars,
                repos,
            })
            .collect(),
        stars_at_last_notification: None,
    }
}

fn totals_history(totals: &[u64]) -> History {
    history_of(totals.iter().map(|t| (*t, vec![])).collect())
}

fn predictions(result: &ForecastResult) -> Vec<u64> {
    result.points.iter().map(|p| p.predicted).collect()
}

#[test]
fn test_linear_regression_on_a_line() {
    let fit = linear_regression(&[100.0, 110.0, 120.0]);
    assert!((fit.slope - 10.0).abs() < 1e-9);
    assert!((fit.intercept - 100.0).abs() < 1e-9);
}

#[test]
fn test_linear_regression_degenerate_inputs() {
    assert_eq!(
        linear_regression(&[7.0]),
        LinearFit {
            slope: 0.0,
            intercept: 7.0
        }
    );
    assert_eq!(
        linear_regression(&[]),
        LinearFit {
            slope: 0.0,
            intercept: 0.0
        }
    );
}

#[test]
fn test_weighted_moving_average_weights_recent_deltas() {
    // deltas [1, 2] with weights [1, 2] -> (1 + 4) / 3
    let average = weighted_moving_average(&[1.0, 2.0, 4.0]);
    assert!((average - 5.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_weighted_moving_average_short_series() {
    assert_eq!(weighted_moving_average(&[]), 0.0);
    assert_eq!(weighted_moving_average(&[42.0]), 0.0);
    assert_eq!(weighted_moving_average(&[1.0, 4.0]), 3.0);
}

#[test]
fn test_compute_forecast_needs_three_snapshots() {
    assert!(compute_forecast(&totals_history(&[]), &[]).is_none());
    assert!(compute_forecast(&totals_history(&[1, 2]), &[]).is_none());
    assert!(compute_forecast(&totals_history(&[1, 2, 3]), &[]).is_some());
}

#[test]
fn test_compute_forecast_linear_data() {
    let forecast = compute_forecast(&totals_history(&[100, 110, 120]), &[]).unwrap();

    assert_eq!(forecast.aggregate.len(), 2);
    assert_eq!(forecast.aggregate[0].method, ForecastMethod::LinearRegression);
    assert_eq!(predictions(&forecast.aggregate[0]), vec![130, 140, 150, 160]);
    assert_eq!(
        forecast.aggregate[1].method,
        ForecastMethod::WeightedMovingAverage
    );
    assert_eq!(predictions(&forecast.aggregate[1]), vec![130, 140, 150, 160]);
    assert!(forecast.repos.is_empty());
}

#[test]
fn test_compute_forecast_week_offsets() {
    let forecast = compute_forecast(&totals_history(&[1, 2, 3]), &[]).unwrap();

    for result in &forecast.aggregate {
        let weeks: Vec<u32> = result.points.iter().map(|p| p.week_offset).collect();
        assert_eq!(weeks, vec![1, 2, 3, 4]);
    }
}

#[test]
fn test_compute_forecast_clamps_decreasing_series() {
    let forecast = compute_forecast(&totals_history(&[5, 3, 1]), &[]).unwrap();

    assert_eq!(predictions(&forecast.aggregate[0]), vec![0, 0, 0, 0]);
    assert_eq!(predictions(&forecast.aggregate[1]), vec![0, 0, 0, 0]);
}

#[test]
fn test_estimators_disagree_on_accelerating_series() {
    // 0, 0, 0, 10: regression slope 3, intercept -2
    let forecast = compute_forecast(&totals_history(&[0, 0, 0, 10]), &[]).unwrap();

    assert_eq!(predictions(&forecast.aggregate[0]), vec![10, 13, 16, 19]);
    // deltas [0, 0, 10] -> weighted average 30 / 6 = 5
    assert_eq!(predictions(&forecast.aggregate[1]), vec![15, 20, 25, 30]);
}

#[test]
fn test_per_repository_series_fill_gaps_with_zero() {
    let history = history_of(vec![
        (10, vec![entry("octocat/alpha", 10)]),
        (20, vec![entry("octocat/beta", 20)]),
        (40, vec![entry("octocat/alpha", 20), entry("octocat/beta", 20)]),
    ]);

    let names = vec!["octocat/alpha".to_string(), "octocat/unknown".to_string()];
    let forecast = compute_forecast(&history, &names).unwrap();

    assert_eq!(forecast.repos.len(), 2);
    assert_eq!(forecast.repos[0].repo_full_name, "octocat/alpha");
    assert_eq!(forecast.repos[1].repo_full_name, "octocat/unknown");

    // alpha series is [10, 0, 20]: slope 5, intercept 5
    assert_eq!(
        predictions(&forecast.repos[0].forecasts[0]),
        vec![20, 25, 30, 35]
    );
    // unknown series is [0, 0, 0]
    assert_eq!(predictions(&forecast.repos[1].forecasts[0]), vec![0, 0, 0, 0]);
    assert_eq!(predictions(&forecast.repos[1].forecasts[1]), vec![0, 0, 0, 0]);
}

#[test]
fn test_forecast_method_names() {
    assert_eq!(ForecastMethod::LinearRegression.as_str(), "linear-regression");
    assert_eq!(
        ForecastMethod::WeightedMovingAverage.to_string(),
        "weighted-moving-average"
    );
    assert_eq!(
        serde_json::to_string(&ForecastMethod::WeightedMovingAverage).unwrap(),
        "\"weighted-moving-average\""
    );
}

#[test]
fn test_clamp_prediction_rounding() {
    assert_eq!(clamp_prediction(2.4), 2);
    assert_eq!(clamp_prediction(2.5), 3);
    assert_eq!(clamp_prediction(-0.4), 0);
    assert_eq!(clamp_prediction(-100.0), 0);
    assert_eq!(clamp_prediction(f64::NAN), 0);
}

proptest! {
    #[test]
    fn test_every_prediction_has_four_points(values in prop::collection::vec(0u64..1_000_000, 0..50)) {
        for result in forecast_from_values(&values) {
            prop_assert_eq!(result.points.len(), FORECAST_WEEKS as usize);
        }
    }

    #[test]
    fn test_flat_series_forecasts_flat(value in 0u64..1_000_000, len in 1usize..30) {
        let values = vec![value; len];
        for result in forecast_from_values(&values) {
            for point in &result.points {
                prop_assert_eq!(point.predicted, value);
            }
        }
    }
}
