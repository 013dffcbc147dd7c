//! Small text helpers shared by the report renderers.

#[cfg(test)]
#[path = "formatting_tests.rs"]
mod tests;

const COMPACT_UNITS: [(u64, &str); 4] = [
    (1_000_000_000_000, "T"),
    (1_000_000_000, "B"),
    (1_000_000, "M"),
    (1_000, "K"),
];

/// Formats a count in compact notation with at most one fraction digit.
///
/// # Examples
///
/// ```
/// use star_tracker_core::formatting::format_count;
///
/// assert_eq!(format_count(999), "999");
/// assert_eq!(format_count(1_000), "1K");
/// assert_eq!(format_count(1_500), "1.5K");
/// assert_eq!(format_count(12_345), "12.3K");
/// assert_eq!(format_count(2_000_000), "2M");
/// ```
pub fn format_count(n: u64) -> String {
    let Some((divisor, suffix)) = COMPACT_UNITS.iter().find(|(divisor, _)| n >= *divisor) else {
        return n.to_string();
    };

    let tenths = rounded_tenths(n, *divisor);

    // 999_950 rounds to 1000.0K; promote to the next unit
    if tenths >= 10_000 {
        if let Some((larger, larger_suffix)) = COMPACT_UNITS
            .iter()
            .rev()
            .find(|(candidate, _)| candidate > divisor)
        {
            return with_tenths(rounded_tenths(n, *larger), larger_suffix);
        }
    }

    with_tenths(tenths, suffix)
}

/// `n / divisor` in tenths, rounding half up.
fn rounded_tenths(n: u64, divisor: u64) -> u64 {
    let divisor = u128::from(divisor);
    ((u128::from(n) * 10 + divisor / 2) / divisor) as u64
}

fn with_tenths(tenths: u64, suffix: &str) -> String {
    if tenths % 10 == 0 {
        format!("{}{}", tenths / 10, suffix)
    } else {
        format!("{}.{}{}", tenths / 10, tenths % 10, suffix)
    }
}

/// `+N`, `-N` or `0`.
pub fn delta_indicator(delta: i64) -> String {
    if delta > 0 {
        format!("+{}", delta)
    } else {
        delta.to_string()
    }
}

/// An arrow emoji for the direction of a change.
pub fn trend_icon(delta: i64) -> &'static str {
    match delta {
        d if d > 0 => "\u{2B06}\u{FE0F}",
        d if d < 0 => "\u{2B07}\u{FE0F}",
        _ => "\u{2796}",
    }
}
