use super::*;
use crate::models::Summary;

fn row(full_name: &str, current: u64, previous: Option<u64>) -> RepoResult {
    let (owner, name) = full_name.split_once('/').unwrap();
    RepoResult {
        name: name.to_string(),
        full_name: full_name.to_string(),
        owner: owner.to_string(),
        current,
        previous,
        delta: previous.map(|p| current as i64 - p as i64).unwrap_or(0),
        is_new: previous.is_none(),
        is_removed: false,
    }
}

#[test]
fn test_render_csv_header_only_for_empty_results() {
    let csv = render_csv_report(&ComparisonResults::default()).unwrap();

    assert_eq!(csv.trim_end(), "repository,owner,name,stars,previous,delta,status");
}

#[test]
fn test_render_csv_rows_in_diff_order() {
    let mut removed = row("octocat/gone", 0, Some(4));
    removed.delta = -4;
    removed.is_removed = true;

    let results = ComparisonResults {
        repos: vec![
            row("octocat/alpha", 12, Some(10)),
            row("octocat/beta", 3, None),
            removed,
        ],
        summary: Summary::default(),
    };

    let csv = render_csv_report(&results).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 4);
    assert_eq!(lines[1], "octocat/alpha,octocat,alpha,12,10,2,active");
    assert_eq!(lines[2], "octocat/beta,octocat,beta,3,,0,new");
    assert_eq!(lines[3], "octocat/gone,octocat,gone,0,4,-4,removed");
}

#[test]
fn test_render_csv_quotes_special_characters() {
    let mut repo = row("octocat/alpha", 1, Some(1));
    repo.name = "al,pha \"x\"".to_string();

    let results = ComparisonResults {
        repos: vec![repo],
        summary: Summary::default(),
    };

    let csv = render_csv_report(&results).unwrap();

    assert!(csv.contains(r#","al,pha ""x""","#));
}
