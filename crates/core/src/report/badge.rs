use indoc::formatdoc;

use super::colors::{ACCENT, GRADIENT_START, MUTED, SHADOW, WHITE};
use crate::formatting::format_count;

#[cfg(test)]
#[path = "badge_tests.rs"]
mod tests;

pub const BADGE_LABEL: &str = "total stars";

const LABEL_CHAR_WIDTH: f64 = 6.5;
const VALUE_CHAR_WIDTH: f64 = 7.0;
const HORIZONTAL_PADDING: f64 = 12.0;
const HEIGHT: u32 = 20;
const BORDER_RADIUS: u32 = 3;

/// Renders a flat shields-style badge showing the total star count.
pub fn render_badge(total_stars: u64) -> String {
    let label = BADGE_LABEL;
    let value = format!("\u{2605} {}", format_count(total_stars));

    let label_width = label.chars().count() as f64 * LABEL_CHAR_WIDTH + HORIZONTAL_PADDING;
    let value_width = value.chars().count() as f64 * VALUE_CHAR_WIDTH + HORIZONTAL_PADDING;
    let total_width = label_width + value_width;
    let label_x = label_width / 2.0;
    let value_x = label_width + value_width / 2.0;

    formatdoc!(
        r##"
        <svg xmlns="http://www.w3.org/2000/svg" width="{total_width}" height="{HEIGHT}" role="img" aria-label="{label}: {value}">
          <title>{label}: {value}</title>
          <linearGradient id="s" x2="0" y2="100%">
            <stop offset="0" stop-color="{GRADIENT_START}" stop-opacity=".1"/>
            <stop offset="1" stop-opacity=".1"/>
          </linearGradient>
          <clipPath id="r">
            <rect width="{total_width}" height="{HEIGHT}" rx="{BORDER_RADIUS}" fill="{WHITE}"/>
          </clipPath>
          <g clip-path="url(#r)">
            <rect width="{label_width}" height="{HEIGHT}" fill="{MUTED}"/>
            <rect x="{label_width}" width="{value_width}" height="{HEIGHT}" fill="{ACCENT}"/>
            <rect width="{total_width}" height="{HEIGHT}" fill="url(#s)"/>
          </g>
          <g fill="{WHITE}" text-anchor="middle" font-family="Verdana,Geneva,DejaVu Sans,sans-serif" text-rendering="geometricPrecision" font-size="11">
            <text aria-hidden="true" x="{label_x}" y="15" fill="{SHADOW}" fill-opacity=".3">{label}</text>
            <text x="{label_x}" y="14">{label}</text>
            <text aria-hidden="true" x="{value_x}" y="15" fill="{SHADOW}" fill-opacity=".3">{value}</text>
            <text x="{value_x}" y="14">{value}</text>
          </g>
        </svg>
        "##
    )
}
