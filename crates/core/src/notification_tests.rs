use super::*;
use proptest::prelude::*;

#[test]
fn test_adaptive_threshold_band_boundaries() {
    assert_eq!(get_adaptive_threshold(0), 1);
    assert_eq!(get_adaptive_threshold(50), 1);
    assert_eq!(get_adaptive_threshold(51), 5);
    assert_eq!(get_adaptive_threshold(200), 5);
    assert_eq!(get_adaptive_threshold(201), 10);
    assert_eq!(get_adaptive_threshold(500), 10);
    assert_eq!(get_adaptive_threshold(501), 20);
    assert_eq!(get_adaptive_threshold(u64::MAX), 20);
}

#[test]
fn test_should_notify_threshold_is_inclusive() {
    assert!(!should_notify(103, Some(100), NotificationThreshold::Stars(5)));
    assert!(should_notify(105, Some(100), NotificationThreshold::Stars(5)));
}

#[test]
fn test_should_notify_counts_losses() {
    assert!(should_notify(95, Some(100), NotificationThreshold::Stars(5)));
    assert!(!should_notify(96, Some(100), NotificationThreshold::Stars(5)));
}

#[test]
fn test_should_notify_zero_threshold_always_notifies() {
    for total in [0, 1, 42, 10_000] {
        assert!(should_notify(total, Some(total), NotificationThreshold::Stars(0)));
    }
    assert!(should_notify(0, None, NotificationThreshold::Stars(0)));
}

#[test]
fn test_should_notify_without_previous_notification_compares_to_zero() {
    assert!(should_notify(5, None, NotificationThreshold::Stars(5)));
    assert!(!should_notify(4, None, NotificationThreshold::Stars(5)));
}

#[test]
fn test_should_notify_auto_uses_adaptive_band() {
    // 300 stars -> band threshold 10
    assert!(!should_notify(309, Some(300), NotificationThreshold::Auto));
    assert!(should_notify(310, Some(300), NotificationThreshold::Auto));

    // 20 stars -> band threshold 1
    assert!(should_notify(21, Some(20), NotificationThreshold::Auto));
    assert!(!should_notify(20, Some(20), NotificationThreshold::Auto));
}

#[test]
fn test_small_gains_accumulate_across_runs() {
    let threshold = NotificationThreshold::Stars(5);
    let last_notified = Some(100);

    assert!(!should_notify(102, last_notified, threshold));
    assert!(!should_notify(104, last_notified, threshold));
    assert!(should_notify(106, last_notified, threshold));
}

#[test]
fn test_threshold_from_str() {
    assert_eq!("auto".parse(), Ok(NotificationThreshold::Auto));
    assert_eq!(" 12 ".parse(), Ok(NotificationThreshold::Stars(12)));
    assert!("-3".parse::<NotificationThreshold>().is_err());
    assert!("often".parse::<NotificationThreshold>().is_err());
}

#[test]
fn test_threshold_display() {
    assert_eq!(NotificationThreshold::Auto.to_string(), "auto");
    assert_eq!(NotificationThreshold::Stars(7).to_string(), "7");
}

#[test]
fn test_threshold_default_notifies_every_run() {
    assert_eq!(NotificationThreshold::default(), NotificationThreshold::Stars(0));
}

#[derive(Debug, Serialize, Deserialize)]
struct Wrapper {
    threshold: NotificationThreshold,
}

#[test]
fn test_threshold_deserializes_from_toml_number_and_text() {
    let number: Wrapper = toml::from_str("threshold = 25").unwrap();
    assert_eq!(number.threshold, NotificationThreshold::Stars(25));

    let auto: Wrapper = toml::from_str("threshold = \"auto\"").unwrap();
    assert_eq!(auto.threshold, NotificationThreshold::Auto);

    let quoted: Wrapper = toml::from_str("threshold = \"8\"").unwrap();
    assert_eq!(quoted.threshold, NotificationThreshold::Stars(8));

    assert!(toml::from_str::<Wrapper>("threshold = \"sometimes\"").is_err());
}

#[test]
fn test_threshold_serializes_to_json() {
    let auto = serde_json::to_string(&Wrapper {
        threshold: NotificationThreshold::Auto,
    })
    .unwrap();
    assert_eq!(auto, r#"{"threshold":"auto"}"#);

    let stars = serde_json::to_string(&Wrapper {
        threshold: NotificationThreshold::Stars(3),
    })
    .unwrap();
    assert_eq!(stars, r#"{"threshold":3}"#);
}

proptest! {
    #[test]
    fn test_adaptive_threshold_never_decreases(a in 0u64..100_000, b in 0u64..100_000) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(get_adaptive_threshold(low) <= get_adaptive_threshold(high));
    }

    #[test]
    fn test_no_movement_never_notifies_with_positive_threshold(
        total in 0u64..100_000,
        threshold in 1u64..1_000,
    ) {
        prop_assert!(!should_notify(total, Some(total), NotificationThreshold::Stars(threshold)));
    }
}
