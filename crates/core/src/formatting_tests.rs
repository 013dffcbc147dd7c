use super::*;

#[test]
fn test_format_count_small_numbers_unchanged() {
    assert_eq!(format_count(0), "0");
    assert_eq!(format_count(7), "7");
    assert_eq!(format_count(999), "999");
}

#[test]
fn test_format_count_thousands() {
    assert_eq!(format_count(1_000), "1K");
    assert_eq!(format_count(1_049), "1K");
    assert_eq!(format_count(1_050), "1.1K");
    assert_eq!(format_count(1_500), "1.5K");
    assert_eq!(format_count(12_345), "12.3K");
    assert_eq!(format_count(999_000), "999K");
}

#[test]
fn test_format_count_millions_and_beyond() {
    assert_eq!(format_count(1_000_000), "1M");
    assert_eq!(format_count(2_350_000), "2.4M");
    assert_eq!(format_count(7_000_000_000), "7B");
}

#[test]
fn test_format_count_rounding_promotes_unit() {
    assert_eq!(format_count(999_950), "1M");
    assert_eq!(format_count(999_999), "1M");
}

#[test]
fn test_delta_indicator() {
    assert_eq!(delta_indicator(5), "+5");
    assert_eq!(delta_indicator(-3), "-3");
    assert_eq!(delta_indicator(0), "0");
}

#[test]
fn test_trend_icon() {
    assert_eq!(trend_icon(1), "⬆️");
    assert_eq!(trend_icon(-1), "⬇️");
    assert_eq!(trend_icon(0), "➖");
}
