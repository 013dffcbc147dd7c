//! SVG line charts of star counts over time.
//!
//! Every chart is drawn by the same multi-series renderer: the total star
//! history, one chart per top repository, a comparison of the top
//! repositories and the history extended by both forecasts.

use super::colors::{ACCENT, GRID, NEGATIVE, NEUTRAL, POSITIVE, TEXT, WHITE};
use super::shared::REPORT_DATE_FORMAT;
use super::{
    escape_xml, COMPARISON_CHART_PATH, FORECAST_CHART_PATH, HISTORY_CHART_PATH,
    MIN_SNAPSHOTS_FOR_CHART,
};
use crate::forecast::{ForecastData, ForecastMethod};
use crate::models::{History, Snapshot};

#[cfg(test)]
#[path = "chart_tests.rs"]
mod tests;

pub const CHART_WIDTH: f64 = 800.0;
pub const CHART_HEIGHT: f64 = 400.0;

/// Only the most recent snapshots are plotted.
pub const MAX_DATA_POINTS: usize = 30;

/// Upper bound on the repositories drawn in the comparison chart.
pub const MAX_COMPARISON_REPOS: usize = 10;

/// Star counts marked with a dashed line when the total history crosses them.
pub const MILESTONE_THRESHOLDS: [u64; 7] = [10, 50, 100, 500, 1_000, 5_000, 10_000];

const COMPARISON_COLORS: [&str; MAX_COMPARISON_REPOS] = [
    "#dfb317", "#28a745", "#e74c3c", "#3498db", "#9b59b6", "#e67e22", "#1abc9c", "#e84393",
    "#795548", "#00bcd4",
];

const MARGIN_TOP: f64 = 50.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_BOTTOM: f64 = 50.0;
const MARGIN_LEFT: f64 = 60.0;
const MAX_X_LABELS: usize = 10;
const Y_STEPS: usize = 5;
const LEGEND_ITEM_WIDTH: f64 = 120.0;
const FONT: &str = "-apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif";

/// One line of a chart. `None` values leave a gap.
#[derive(Debug, Clone)]
struct Series {
    label: String,
    data: Vec<Option<u64>>,
    color: &'static str,
    dashed: bool,
    fill: bool,
}

impl Series {
    fn solid(label: &str, data: Vec<Option<u64>>, color: &'static str) -> Self {
        Self {
            label: label.to_string(),
            data,
            color,
            dashed: false,
            fill: true,
        }
    }
}

#[derive(Debug)]
struct ChartSpec {
    title: String,
    labels: Vec<String>,
    series: Vec<Series>,
    show_legend: bool,
    milestones: bool,
}

struct Scale {
    min: f64,
    max: f64,
    count: usize,
}

impl Scale {
    fn y(&self, value: f64) -> f64 {
        let height = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        if self.max == self.min {
            return MARGIN_TOP + height / 2.0;
        }

        MARGIN_TOP + height - (value - self.min) / (self.max - self.min) * height
    }

    fn x(&self, index: usize) -> f64 {
        let width = CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        MARGIN_LEFT + index as f64 / self.count.saturating_sub(1).max(1) as f64 * width
    }
}

/// Round axis values covering `min..=max` with roughly `count` steps.
fn nice_axis_steps(min: f64, max: f64, count: usize) -> Vec<u64> {
    let range = max - min;
    if range <= 0.0 {
        return vec![min.round() as u64];
    }

    let raw_step = range / (count - 1) as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let residual = raw_step / magnitude;
    let step = match residual {
        r if r <= 1.5 => magnitude,
        r if r <= 3.5 => 2.0 * magnitude,
        r if r <= 7.5 => 5.0 * magnitude,
        _ => 10.0 * magnitude,
    };

    let mut steps = Vec::new();
    let mut value = (min / step).floor() * step;
    while value <= max + step * 0.5 {
        if value >= min - step * 0.5 {
            steps.push(value.round().max(0.0) as u64);
        }
        value += step;
    }

    steps
}

/// Runs of consecutive present values as `(first index, values)`.
fn segments(data: &[Option<u64>]) -> Vec<(usize, Vec<u64>)> {
    let mut result = Vec::new();
    let mut current: Option<(usize, Vec<u64>)> = None;

    for (i, value) in data.iter().enumerate() {
        match value {
            Some(v) => current.get_or_insert_with(|| (i, Vec::new())).1.push(*v),
            None => result.extend(current.take()),
        }
    }
    result.extend(current);

    result
}

fn text(x: f64, y: f64, anchor: &str, fill_attr: &str, size: u32, content: &str) -> String {
    format!(
        r#"<text x="{x:.1}" y="{y:.1}" text-anchor="{anchor}" {fill_attr} font-size="{size}" font-family="{FONT}">{content}</text>"#
    )
}

fn render_svg(spec: &ChartSpec) -> Option<String> {
    let values: Vec<f64> = spec
        .series
        .iter()
        .flat_map(|s| s.data.iter().flatten())
        .map(|v| *v as f64)
        .collect();
    if values.is_empty() {
        return None;
    }

    let min_data = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max_data = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let padding = ((max_data - min_data) * 0.1).ceil().max(1.0);
    let scale = Scale {
        min: (min_data - padding).max(0.0),
        max: max_data + padding,
        count: spec.labels.len(),
    };

    let bottom = CHART_HEIGHT - MARGIN_BOTTOM;
    let right = CHART_WIDTH - MARGIN_RIGHT;
    let muted = format!(r#"fill="{NEUTRAL}""#);

    let mut grid = String::new();
    for step in nice_axis_steps(scale.min, scale.max, Y_STEPS) {
        let y = scale.y(step as f64);
        grid.push_str(&format!(
            r#"
    <line x1="{MARGIN_LEFT}" y1="{y:.1}" x2="{right}" y2="{y:.1}" stroke="{GRID}" />
    {}"#,
            text(MARGIN_LEFT - 8.0, y + 4.0, "end", &muted, 11, &step.to_string())
        ));
    }

    let mut milestones = String::new();
    if spec.milestones {
        for value in MILESTONE_THRESHOLDS
            .iter()
            .filter(|m| (**m as f64) > min_data && (**m as f64) < max_data)
        {
            let y = scale.y(*value as f64);
            milestones.push_str(&format!(
                r#"
    <line x1="{MARGIN_LEFT}" y1="{y:.1}" x2="{right}" y2="{y:.1}" stroke="{NEUTRAL}" stroke-dasharray="6,6" />
    {}"#,
                text(MARGIN_LEFT + 4.0, y - 4.0, "start", &muted, 10, &format!("{} ★", value))
            ));
        }
    }

    let count = spec.labels.len();
    let label_step = count.div_ceil(MAX_X_LABELS).max(1);
    let mut labels = String::new();
    for (i, label) in spec.labels.iter().enumerate() {
        if i % label_step != 0 && i != count - 1 {
            continue;
        }
        labels.push_str("\n    ");
        labels.push_str(&text(
            scale.x(i),
            bottom + 20.0,
            "middle",
            &muted,
            11,
            &escape_xml(label),
        ));
    }

    let mut fills = String::new();
    let mut paths = String::new();
    let mut circles = String::new();
    for series in &spec.series {
        for (start, run) in segments(&series.data) {
            let points: Vec<(f64, f64)> = run
                .iter()
                .enumerate()
                .map(|(offset, v)| (scale.x(start + offset), scale.y(*v as f64)))
                .collect();

            let line = points
                .iter()
                .enumerate()
                .map(|(i, (x, y))| format!("{}{:.1},{:.1}", if i == 0 { 'M' } else { 'L' }, x, y))
                .collect::<Vec<_>>()
                .join(" ");
            let color = series.color;

            if series.fill && !series.dashed {
                let (first_x, last_x) = (points[0].0, points[points.len() - 1].0);
                fills.push_str(&format!(
                    r#"
  <path d="{line} L{last_x:.1},{bottom:.1} L{first_x:.1},{bottom:.1} Z" fill="{color}" fill-opacity="0.1" />"#
                ));
            }

            let dash = if series.dashed {
                r#" stroke-dasharray="8,4""#
            } else {
                ""
            };
            paths.push_str(&format!(
                r#"
  <path d="{line}" fill="none" stroke="{color}" stroke-width="2.5"{dash} />"#
            ));

            if !series.dashed {
                for (x, y) in &points {
                    circles.push_str(&format!(
                        r#"
    <circle cx="{x:.1}" cy="{y:.1}" r="4" fill="{color}" />"#
                    ));
                }
            }
        }
    }

    let mut legend = String::new();
    if spec.show_legend {
        let legend_y = MARGIN_TOP - 20.0;
        let start_x = (CHART_WIDTH - spec.series.len() as f64 * LEGEND_ITEM_WIDTH) / 2.0;
        for (i, series) in spec.series.iter().enumerate() {
            let x = start_x + i as f64 * LEGEND_ITEM_WIDTH;
            let dash = if series.dashed {
                r#" stroke-dasharray="4,2""#
            } else {
                ""
            };
            legend.push_str(&format!(
                r#"
    <line x1="{x:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="2"{dash} />
    {}"#,
                legend_y - 3.5,
                x + 12.0,
                legend_y - 3.5,
                series.color,
                text(
                    x + 16.0,
                    legend_y,
                    "start",
                    &format!(r#"fill="{TEXT}""#),
                    10,
                    &escape_xml(&series.label)
                )
            ));
        }
    }

    let title_y = if spec.show_legend {
        MARGIN_TOP - 36.0
    } else {
        MARGIN_TOP - 16.0
    };
    let title = format!(
        r#"<text x="{:.1}" y="{title_y:.1}" text-anchor="middle" fill="{TEXT}" font-size="16" font-weight="bold" font-family="{FONT}">{}</text>"#,
        CHART_WIDTH / 2.0,
        escape_xml(&spec.title)
    );

    Some(format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {CHART_WIDTH} {CHART_HEIGHT}" width="{CHART_WIDTH}" height="{CHART_HEIGHT}">
  <rect width="{CHART_WIDTH}" height="{CHART_HEIGHT}" fill="{WHITE}" />
  {title}
  <g class="legend">{legend}
  </g>
  <g class="grid">{grid}
  </g>
  <g class="milestones">{milestones}
  </g>
  <g class="x-axis">{labels}
  </g>
  <line x1="{MARGIN_LEFT}" y1="{MARGIN_TOP}" x2="{MARGIN_LEFT}" y2="{bottom}" stroke="{NEUTRAL}" />
  <line x1="{MARGIN_LEFT}" y1="{bottom}" x2="{right}" y2="{bottom}" stroke="{NEUTRAL}" />{fills}{paths}
  <g class="points">{circles}
  </g>
</svg>
"#
    ))
}

/// The snapshots a chart plots, or `None` when there are too few to connect.
fn recent_snapshots(history: &History) -> Option<&[Snapshot]> {
    if history.snapshots.len() < MIN_SNAPSHOTS_FOR_CHART {
        return None;
    }

    let skip = history.snapshots.len().saturating_sub(MAX_DATA_POINTS);
    Some(&history.snapshots[skip..])
}

fn date_labels(snapshots: &[Snapshot]) -> Vec<String> {
    snapshots
        .iter()
        .map(|s| s.timestamp.format(REPORT_DATE_FORMAT).to_string())
        .collect()
}

/// Stars of `full_name` per snapshot; snapshots without it count as 0.
fn repo_values(snapshots: &[Snapshot], full_name: &str) -> Vec<Option<u64>> {
    snapshots
        .iter()
        .map(|s| Some(s.stars_for(full_name).unwrap_or(0)))
        .collect()
}

/// Where the chart of a single repository is written, e.g. `charts/octocat-hello.svg`.
pub fn repo_chart_path(full_name: &str) -> String {
    format!("charts/{}.svg", full_name.replacen('/', "-", 1))
}

/// Renders the total star count of the newest snapshots, with milestone lines.
///
/// Returns `None` when there are fewer than two snapshots to connect.
pub fn render_history_chart(history: &History) -> Option<String> {
    let snapshots = recent_snapshots(history)?;
    let totals = snapshots.iter().map(|s| Some(s.total_stars)).collect();

    render_svg(&ChartSpec {
        title: "Star History".to_string(),
        labels: date_labels(snapshots),
        series: vec![Series::solid("Stars", totals, ACCENT)],
        show_legend: false,
        milestones: true,
    })
}

/// Renders the star count of one repository.
pub fn render_repo_chart(history: &History, full_name: &str) -> Option<String> {
    let snapshots = recent_snapshots(history)?;

    render_svg(&ChartSpec {
        title: format!("{} Star History", full_name),
        labels: date_labels(snapshots),
        series: vec![Series::solid(
            "Stars",
            repo_values(snapshots, full_name),
            ACCENT,
        )],
        show_legend: false,
        milestones: false,
    })
}

/// Renders up to [`MAX_COMPARISON_REPOS`] repositories on one chart with a legend.
///
/// Legend entries drop the owner when every repository has the same one.
pub fn render_comparison_chart(history: &History, repo_names: &[String]) -> Option<String> {
    let snapshots = recent_snapshots(history)?;
    if repo_names.is_empty() {
        return None;
    }

    let capped = &repo_names[..repo_names.len().min(MAX_COMPARISON_REPOS)];
    let owner = |name: &str| name.split_once('/').map(|(o, _)| o.to_string());
    let single_owner = capped.iter().all(|name| owner(name) == owner(&capped[0]));

    let series = capped
        .iter()
        .zip(COMPARISON_COLORS)
        .map(|(name, color)| {
            let label = match name.split_once('/') {
                Some((_, repo)) if single_owner => repo,
                _ => name.as_str(),
            };
            Series {
                fill: false,
                ..Series::solid(label, repo_values(snapshots, name), color)
            }
        })
        .collect();

    render_svg(&ChartSpec {
        title: "Top Repositories".to_string(),
        labels: date_labels(snapshots),
        series,
        show_legend: true,
        milestones: false,
    })
}

/// Renders the total star history followed by the forecast weeks, with one
/// dashed line per forecast method starting at the newest total.
pub fn render_forecast_chart(history: &History, forecast: &ForecastData) -> Option<String> {
    let snapshots = recent_snapshots(history)?;
    let weeks = forecast
        .aggregate
        .first()
        .map(|f| f.points.len())
        .unwrap_or(0);

    let mut labels = date_labels(snapshots);
    labels.extend((1..=weeks).map(|w| format!("Week {}", w)));

    let totals: Vec<u64> = snapshots.iter().map(|s| s.total_stars).collect();
    let last_total = totals.last().copied();

    let mut history_values: Vec<Option<u64>> = totals.iter().copied().map(Some).collect();
    history_values.extend(std::iter::repeat(None).take(weeks));

    let projection = |method: ForecastMethod, color: &'static str| {
        let mut data = vec![None; totals.len() - 1];
        data.push(last_total);
        if let Some(result) = forecast.aggregate.iter().find(|f| f.method == method) {
            data.extend(result.points.iter().map(|p| Some(p.predicted)));
        }
        Series {
            dashed: true,
            fill: false,
            ..Series::solid(method.label(), data, color)
        }
    };

    render_svg(&ChartSpec {
        title: "Growth Forecast".to_string(),
        labels,
        series: vec![
            Series::solid("Star History", history_values, ACCENT),
            projection(ForecastMethod::LinearRegression, POSITIVE),
            projection(ForecastMethod::WeightedMovingAverage, NEGATIVE),
        ],
        show_legend: true,
        milestones: false,
    })
}

/// Every chart a run produces, as `(relative path, svg)` pairs.
///
/// Empty when the history is too short to chart.
pub fn render_charts(
    history: &History,
    top_repo_names: &[String],
    forecast: Option<&ForecastData>,
) -> Vec<(String, String)> {
    let Some(history_chart) = render_history_chart(history) else {
        return Vec::new();
    };

    let mut charts = vec![(HISTORY_CHART_PATH.to_string(), history_chart)];

    for name in top_repo_names {
        if let Some(svg) = render_repo_chart(history, name) {
            charts.push((repo_chart_path(name), svg));
        }
    }

    if let Some(svg) = render_comparison_chart(history, top_repo_names) {
        charts.push((COMPARISON_CHART_PATH.to_string(), svg));
    }

    if let Some(svg) = forecast.and_then(|f| render_forecast_chart(history, f)) {
        charts.push((FORECAST_CHART_PATH.to_string(), svg));
    }

    charts
}
