//! Sliding-window retention of snapshots.

use crate::models::{History, Snapshot};

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;

/// Returns the most recent snapshot, if any.
pub fn get_last_snapshot(history: &History) -> Option<&Snapshot> {
    history.snapshots.last()
}

/// Returns a new history with `snapshot` appended, keeping only the most
/// recent `max_history` snapshots.
///
/// The input is left untouched. The notification marker is carried over.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use star_tracker_core::history::add_snapshot;
/// use star_tracker_core::models::{History, Snapshot};
///
/// let snapshot = Snapshot { timestamp: Utc::now(), total_stars: 3, repos: vec![] };
/// let history = History::default();
///
/// let updated = add_snapshot(&history, snapshot, 2);
/// assert_eq!(updated.snapshots.len(), 1);
/// assert!(history.snapshots.is_empty());
/// ```
pub fn add_snapshot(history: &History, snapshot: Snapshot, max_history: usize) -> History {
    let keep_from = (history.snapshots.len() + 1).saturating_sub(max_history);

    let snapshots = history
        .snapshots
        .iter()
        .cloned()
        .chain(std::iter::once(snapshot))
        .skip(keep_from)
        .collect();

    History {
        snapshots,
        stars_at_last_notification: history.stars_at_last_notification,
    }
}
