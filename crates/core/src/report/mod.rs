//! # Reports
//!
//! Renderers that turn a [`ComparisonResults`](crate::models::ComparisonResults)
//! into the artifacts written after each run: a markdown summary, a CSV
//! export, a shields-style badge and the SVG charts of the star history.
//!
//! All renderers are pure; writing the output is left to the
//! [`SnapshotStore`](crate::SnapshotStore).

pub mod badge;
pub mod chart;
pub mod csv;
pub mod markdown;
pub mod shared;

/// Minimum number of snapshots before a history chart is drawn.
pub const MIN_SNAPSHOTS_FOR_CHART: usize = 2;

/// Location of the markdown report relative to the data directory.
pub const MARKDOWN_REPORT_PATH: &str = "README.md";

/// Location of the CSV export relative to the data directory.
pub const CSV_REPORT_PATH: &str = "stars.csv";

/// Location of the badge relative to the data directory.
pub const BADGE_PATH: &str = "stars-badge.svg";

/// Location of the history chart relative to the data directory.
pub const HISTORY_CHART_PATH: &str = "charts/star-history.svg";

/// Location of the chart comparing the top repositories.
pub const COMPARISON_CHART_PATH: &str = "charts/comparison.svg";

/// Location of the history chart extended by the forecasts.
pub const FORECAST_CHART_PATH: &str = "charts/forecast.svg";

/// Colours shared by the SVG renderers.
pub(crate) mod colors {
    pub const ACCENT: &str = "#dfb317";
    pub const MUTED: &str = "#555";
    pub const NEUTRAL: &str = "#6a737d";
    pub const TEXT: &str = "#24292e";
    pub const WHITE: &str = "#fff";
    pub const SHADOW: &str = "#010101";
    pub const GRID: &str = "#eee";
    pub const GRADIENT_START: &str = "#bbb";
    pub const POSITIVE: &str = "#28a745";
    pub const NEGATIVE: &str = "#d73a49";
}

/// Escapes the characters that are significant in XML text and attributes.
pub(crate) fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
