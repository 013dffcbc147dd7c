//! # Star Forecast
//!
//! Projects star counts four weeks ahead using two independent estimators:
//!
//! * ordinary least squares over the position in the series, which follows
//!   the long-run trend, and
//! * a weighted moving average of the step-to-step deltas, with the most
//!   recent delta weighted highest, which follows recent acceleration.
//!
//! Positions are snapshot indices, not calendar time, so irregular spacing
//! between runs is ignored. Every projection is rounded and clamped at zero.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::History;

#[cfg(test)]
#[path = "forecast_tests.rs"]
mod tests;

/// Minimum number of snapshots needed before a forecast is produced.
pub const MIN_SNAPSHOTS: usize = 3;

/// Number of weeks projected ahead.
pub const FORECAST_WEEKS: u32 = 4;

/// The estimator that produced a forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ForecastMethod {
    LinearRegression,
    WeightedMovingAverage,
}

impl ForecastMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastMethod::LinearRegression => "linear-regression",
            ForecastMethod::WeightedMovingAverage => "weighted-moving-average",
        }
    }

    /// Human readable name used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            ForecastMethod::LinearRegression => "Linear Regression",
            ForecastMethod::WeightedMovingAverage => "Weighted Moving Avg",
        }
    }
}

impl fmt::Display for ForecastMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A projected value `week_offset` weeks after the newest snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    /// 1 to [`FORECAST_WEEKS`]
    pub week_offset: u32,
    pub predicted: u64,
}

/// The output of one estimator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub method: ForecastMethod,
    /// One point per week, in order
    pub points: Vec<ForecastPoint>,
}

/// Forecasts for a single repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoForecast {
    pub repo_full_name: String,
    pub forecasts: Vec<ForecastResult>,
}

/// Forecasts for the total star count and for the top repositories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastData {
    /// One result per method for the total star count
    pub aggregate: Vec<ForecastResult>,
    /// One entry per requested repository, in request order
    pub repos: Vec<RepoForecast>,
}

/// Slope and intercept of a least-squares line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

/// Fits `value = slope * index + intercept` by ordinary least squares.
///
/// A single value (or an empty series) has no slope; the fit degenerates to a
/// flat line through the first value (or zero).
pub fn linear_regression(values: &[f64]) -> LinearFit {
    let n = values.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);

    for (i, value) in values.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += value;
        sum_xy += x * value;
        sum_xx += x * x;
    }

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator == 0.0 {
        return LinearFit {
            slope: 0.0,
            intercept: values.first().copied().unwrap_or(0.0),
        };
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;

    LinearFit { slope, intercept }
}

/// Average of the step-to-step deltas, weighting the i-th delta by `i + 1`.
///
/// Returns 0 for series with fewer than two values.
pub fn weighted_moving_average(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let (weighted_sum, total_weight) = values
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .enumerate()
        .fold((0.0, 0.0), |(sum, weight_sum), (i, delta)| {
            let weight = (i + 1) as f64;
            (sum + delta * weight, weight_sum + weight)
        });

    weighted_sum / total_weight
}

fn clamp_prediction(value: f64) -> u64 {
    // `as` saturates; NaN becomes 0
    value.round().max(0.0) as u64
}

/// Runs both estimators over one series.
pub fn forecast_from_values(values: &[u64]) -> Vec<ForecastResult> {
    let series: Vec<f64> = values.iter().map(|v| *v as f64).collect();
    let n = series.len() as f64;
    let last_value = series.last().copied().unwrap_or(0.0);

    let fit = linear_regression(&series);
    let average_delta = weighted_moving_average(&series);

    let weeks = 1..=FORECAST_WEEKS;
    let regression_points = weeks
        .clone()
        .map(|w| ForecastPoint {
            week_offset: w,
            predicted: clamp_prediction(fit.slope * (n - 1.0 + w as f64) + fit.intercept),
        })
        .collect();
    let average_points = weeks
        .map(|w| ForecastPoint {
            week_offset: w,
            predicted: clamp_prediction(last_value + average_delta * w as f64),
        })
        .collect();

    vec![
        ForecastResult {
            method: ForecastMethod::LinearRegression,
            points: regression_points,
        },
        ForecastResult {
            method: ForecastMethod::WeightedMovingAverage,
            points: average_points,
        },
    ]
}

/// Forecasts the total star count and each of `top_repo_names`.
///
/// Returns `None` when the history holds fewer than [`MIN_SNAPSHOTS`]
/// snapshots. A repository missing from a snapshot contributes 0 for that
/// point so every series has the same length.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use star_tracker_core::forecast::{compute_forecast, ForecastMethod};
/// use star_tracker_core::models::{History, Snapshot};
///
/// let history = History {
///     snapshots: [100, 110, 120]
///         .into_iter()
///         .map(|total| Snapshot { timestamp: Utc::now(), total_stars: total, repos: vec![] })
///         .collect(),
///     stars_at_last_notification: None,
/// };
///
/// let forecast = compute_forecast(&history, &[]).unwrap();
/// let regression = &forecast.aggregate[0];
/// assert_eq!(regression.method, ForecastMethod::LinearRegression);
/// assert_eq!(regression.points[0].predicted, 130);
/// ```
pub fn compute_forecast(history: &History, top_repo_names: &[String]) -> Option<ForecastData> {
    if history.snapshots.len() < MIN_SNAPSHOTS {
        return None;
    }

    let totals: Vec<u64> = history.snapshots.iter().map(|s| s.total_stars).collect();

    let repos = top_repo_names
        .iter()
        .map(|full_name| {
            let values: Vec<u64> = history
                .snapshots
                .iter()
                .map(|s| s.stars_for(full_name).unwrap_or(0))
                .collect();

            RepoForecast {
                repo_full_name: full_name.clone(),
                forecasts: forecast_from_values(&values),
            }
        })
        .collect();

    Some(ForecastData {
        aggregate: forecast_from_values(&totals),
        repos,
    })
}
