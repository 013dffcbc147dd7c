//! Repository selection.
//!
//! Narrows the repositories listed by the forge down to the ones the
//! configuration asks to track, and maps them into [`RepositoryInfo`].

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};
use star_tracker_developer_platforms::models::ForgeRepository;
use tracing::{info, warn};

use crate::config::TrackerConfig;
use crate::models::RepositoryInfo;

#[cfg(test)]
#[path = "filters_tests.rs"]
mod tests;

lazy_static! {
    /// Recognises exclude patterns written as `/body/flags`
    static ref REGEX_PATTERN: Regex =
        Regex::new(r"^/(.+)/([gimsuy]*)$").expect("Failed to compile exclude pattern regex");
}

/// A compiled entry of `exclude_repos`.
#[derive(Debug)]
enum ExcludePattern {
    Exact(String),
    /// `None` when the expression failed to compile; it never matches
    Expression(Option<Regex>),
}

impl ExcludePattern {
    fn parse(pattern: &str) -> Self {
        let Some(captures) = REGEX_PATTERN.captures(pattern) else {
            return ExcludePattern::Exact(pattern.to_string());
        };

        let body = &captures[1];
        let flags = &captures[2];

        // g, u and y have no effect on a single match test
        let compiled = RegexBuilder::new(body)
            .case_insensitive(flags.contains('i'))
            .multi_line(flags.contains('m'))
            .dot_matches_new_line(flags.contains('s'))
            .build();

        match compiled {
            Ok(regex) => ExcludePattern::Expression(Some(regex)),
            Err(e) => {
                warn!(pattern = pattern, error = %e, "Ignoring invalid exclude pattern");
                ExcludePattern::Expression(None)
            }
        }
    }

    fn matches(&self, name: &str) -> bool {
        match self {
            ExcludePattern::Exact(exact) => exact == name,
            ExcludePattern::Expression(Some(regex)) => regex.is_match(name),
            ExcludePattern::Expression(None) => false,
        }
    }
}

/// Applies the repository filters of `config`.
///
/// A non-empty `only_repos` list selects repositories by name and bypasses
/// every other filter. Otherwise archived repositories, forks, excluded names
/// and repositories below `min_stars` are dropped. Input order is preserved.
pub fn filter_repositories(
    repos: &[ForgeRepository],
    config: &TrackerConfig,
) -> Vec<ForgeRepository> {
    if !config.only_repos.is_empty() {
        let filtered: Vec<ForgeRepository> = repos
            .iter()
            .filter(|repo| config.only_repos.contains(&repo.name))
            .cloned()
            .collect();
        info!(count = filtered.len(), "After only_repos filter");
        return filtered;
    }

    let patterns: Vec<ExcludePattern> = config
        .exclude_repos
        .iter()
        .map(|p| ExcludePattern::parse(p))
        .collect();

    let filtered: Vec<ForgeRepository> = repos
        .iter()
        .filter(|repo| config.include_archived || !repo.archived)
        .filter(|repo| config.include_forks || !repo.fork)
        .filter(|repo| !patterns.iter().any(|p| p.matches(&repo.name)))
        .filter(|repo| config.min_stars == 0 || repo.stargazers_count >= config.min_stars)
        .cloned()
        .collect();

    info!(count = filtered.len(), "After filtering");
    filtered
}

pub fn to_repository_info(repo: &ForgeRepository) -> RepositoryInfo {
    RepositoryInfo {
        owner: repo.owner.login.clone(),
        name: repo.name.clone(),
        full_name: repo.full_name.clone(),
        private: repo.private,
        archived: repo.archived,
        fork: repo.fork,
        stars: repo.stargazers_count,
    }
}
