//! # Notification Policy
//!
//! Decides whether a run has accumulated enough star movement to notify.
//!
//! The comparison is always made against the total at the last run that
//! actually notified, so small gains across several quiet runs add up until
//! they clear the threshold.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[cfg(test)]
#[path = "notification_tests.rs"]
mod tests;

/// Adaptive bands as `(inclusive upper bound on total stars, threshold)`.
pub const ADAPTIVE_THRESHOLDS: [(u64, u64); 3] = [(50, 1), (200, 5), (500, 10)];

/// Threshold used above the last adaptive band.
pub const ADAPTIVE_THRESHOLD_MAX: u64 = 20;

/// How much the total star count must move before a notification is sent.
///
/// Written in configuration either as a number of stars or as `"auto"`.
/// A fixed threshold of `0` notifies on every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ThresholdValue", into = "ThresholdValue")]
pub enum NotificationThreshold {
    /// Scale the threshold with the size of the collection
    Auto,
    /// A fixed number of stars
    Stars(u64),
}

impl Default for NotificationThreshold {
    fn default() -> Self {
        NotificationThreshold::Stars(0)
    }
}

impl fmt::Display for NotificationThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationThreshold::Auto => write!(f, "auto"),
            NotificationThreshold::Stars(n) => write!(f, "{}", n),
        }
    }
}

impl FromStr for NotificationThreshold {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "auto" {
            return Ok(NotificationThreshold::Auto);
        }

        s.parse::<u64>()
            .map(NotificationThreshold::Stars)
            .map_err(|_| {
                format!(
                    "Invalid notification threshold \"{}\". Expected a number of stars or \"auto\"",
                    s
                )
            })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ThresholdValue {
    Number(u64),
    Text(String),
}

impl TryFrom<ThresholdValue> for NotificationThreshold {
    type Error = String;

    fn try_from(value: ThresholdValue) -> Result<Self, Self::Error> {
        match value {
            ThresholdValue::Number(n) => Ok(NotificationThreshold::Stars(n)),
            ThresholdValue::Text(s) => s.parse(),
        }
    }
}

impl From<NotificationThreshold> for ThresholdValue {
    fn from(value: NotificationThreshold) -> Self {
        match value {
            NotificationThreshold::Auto => ThresholdValue::Text("auto".to_string()),
            NotificationThreshold::Stars(n) => ThresholdValue::Number(n),
        }
    }
}

/// Maps a total star count to the adaptive notification threshold.
///
/// # Examples
///
/// ```
/// use star_tracker_core::notification::get_adaptive_threshold;
///
/// assert_eq!(get_adaptive_threshold(10), 1);
/// assert_eq!(get_adaptive_threshold(150), 5);
/// assert_eq!(get_adaptive_threshold(4000), 20);
/// ```
pub fn get_adaptive_threshold(total_stars: u64) -> u64 {
    ADAPTIVE_THRESHOLDS
        .iter()
        .find(|(limit, _)| total_stars <= *limit)
        .map(|(_, threshold)| *threshold)
        .unwrap_or(ADAPTIVE_THRESHOLD_MAX)
}

/// Whether the movement since the last notification reaches the threshold.
///
/// # Arguments
///
/// * `total_stars` - The total observed in this run
/// * `stars_at_last_notification` - The total when the last notification fired,
///   `None` if no notification was ever sent
/// * `threshold` - The configured threshold
pub fn should_notify(
    total_stars: u64,
    stars_at_last_notification: Option<u64>,
    threshold: NotificationThreshold,
) -> bool {
    let effective_threshold = match threshold {
        NotificationThreshold::Stars(0) => return true,
        NotificationThreshold::Stars(n) => n,
        NotificationThreshold::Auto => get_adaptive_threshold(total_stars),
    };

    let accumulated_delta = total_stars.abs_diff(stars_at_last_notification.unwrap_or(0));
    accumulated_delta >= effective_threshold
}
