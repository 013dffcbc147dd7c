use super::*;
use indoc::indoc;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_default_config_values() {
    let config = TrackerConfig::default();

    assert_eq!(config.visibility, RepositoryVisibility::All);
    assert!(!config.include_archived);
    assert!(!config.include_forks);
    assert!(config.exclude_repos.is_empty());
    assert!(config.only_repos.is_empty());
    assert_eq!(config.min_stars, 0);
    assert_eq!(config.max_history, 52);
    assert_eq!(config.top_repos, 10);
    assert!(config.include_charts);
    assert!(!config.track_stargazers);
    assert_eq!(config.notification_threshold, NotificationThreshold::Stars(0));
}

#[test]
fn test_empty_toml_yields_defaults() {
    let config: TrackerConfig = toml::from_str("").unwrap();
    assert_eq!(config, TrackerConfig::default());
}

#[test]
fn test_load_full_config() {
    let file = write_config(indoc! {r#"
        visibility = "owned"
        include_archived = true
        include_forks = true
        exclude_repos = ["dotfiles", "/^test-/i"]
        min_stars = 3
        max_history = 12
        top_repos = 5
        include_charts = false
        track_stargazers = true
        notification_threshold = "auto"
    "#});

    let config = load_tracker_config(file.path()).unwrap();

    assert_eq!(config.visibility, RepositoryVisibility::Owned);
    assert!(config.include_archived);
    assert!(config.include_forks);
    assert_eq!(config.exclude_repos, vec!["dotfiles", "/^test-/i"]);
    assert_eq!(config.min_stars, 3);
    assert_eq!(config.max_history, 12);
    assert_eq!(config.top_repos, 5);
    assert!(!config.include_charts);
    assert!(config.track_stargazers);
    assert_eq!(config.notification_threshold, NotificationThreshold::Auto);
}

#[test]
fn test_load_partial_config_fills_defaults() {
    let file = write_config("notification_threshold = 10\n");

    let config = load_tracker_config(file.path()).unwrap();

    assert_eq!(config.notification_threshold, NotificationThreshold::Stars(10));
    assert_eq!(config.max_history, DEFAULT_MAX_HISTORY);
    assert!(config.include_charts);
}

#[test]
fn test_load_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_tracker_config(dir.path().join("absent.toml")).unwrap();

    assert_eq!(config, TrackerConfig::default());
}

#[test]
fn test_load_malformed_file() {
    let file = write_config("max_history = \"many\"\n");

    let result = load_tracker_config(file.path());

    assert!(matches!(result, Err(ConfigLoadError::Toml(_))));
}

#[test]
fn test_load_invalid_visibility() {
    let file = write_config("visibility = \"internal\"\n");

    assert!(matches!(
        load_tracker_config(file.path()),
        Err(ConfigLoadError::Toml(_))
    ));
}

#[test]
fn test_load_rejects_zero_max_history() {
    let file = write_config("max_history = 0\n");

    let result = load_tracker_config(file.path());

    assert!(matches!(result, Err(ConfigLoadError::Invalid(msg)) if msg.contains("max_history")));
}

#[test]
fn test_validate_rejects_zero_top_repos() {
    let config = TrackerConfig {
        top_repos: 0,
        ..TrackerConfig::default()
    };

    assert!(matches!(config.validate(), Err(ConfigLoadError::Invalid(msg)) if msg.contains("top_repos")));
}

#[test]
fn test_parse_list() {
    assert_eq!(parse_list("a, b ,c"), vec!["a", "b", "c"]);
    assert_eq!(parse_list(" a,,b, "), vec!["a", "b"]);
    assert!(parse_list("").is_empty());
    assert!(parse_list("   ").is_empty());
}

#[test]
fn test_parse_bool() {
    assert_eq!(parse_bool("true"), Some(true));
    assert_eq!(parse_bool("false"), Some(false));
    assert_eq!(parse_bool("yes"), Some(false));
    assert_eq!(parse_bool(""), None);
}

#[test]
fn test_parse_number() {
    assert_eq!(parse_number("42"), Some(42));
    assert_eq!(parse_number("12 stars"), Some(12));
    assert_eq!(parse_number("-7"), Some(-7));
    assert_eq!(parse_number("+3"), Some(3));
    assert_eq!(parse_number(""), None);
    assert_eq!(parse_number("abc"), None);
    assert_eq!(parse_number("-"), None);
}

#[test]
fn test_parse_notification_threshold() {
    assert_eq!(
        parse_notification_threshold("auto"),
        Some(NotificationThreshold::Auto)
    );
    assert_eq!(
        parse_notification_threshold("15"),
        Some(NotificationThreshold::Stars(15))
    );
    assert_eq!(parse_notification_threshold(""), None);
    assert_eq!(parse_notification_threshold("sometimes"), None);
    assert_eq!(parse_notification_threshold("-2"), None);
}
