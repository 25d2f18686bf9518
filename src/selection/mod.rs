//! Selection tracking
//!
//! This module keeps the set of URLs chosen for metadata fetching:
//! - Group toggling with all-or-nothing semantics
//! - Wholesale reset to the tree's limited set
//! - Change detection on the limited set by sorted key comparison

use std::collections::BTreeSet;

/// The set of URLs slated for fetching
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionTracker {
    selected: BTreeSet<String>,
    /// Sorted key of the limited set the selection was last synced to
    synced_key: Option<Vec<String>>,
}

impl SelectionTracker {
    /// Creates an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a selection holding exactly `limited`
    pub fn from_limited<I, S>(limited: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tracker = Self::new();
        tracker.reset_to_limited(limited);
        tracker
    }

    /// Flips a group of URLs as one unit
    ///
    /// If every given URL is already selected, all of them are deselected.
    /// Otherwise all of them are selected. An empty group is a no-op.
    ///
    /// # Returns
    ///
    /// `true` if the group ended up selected
    pub fn toggle_set<I, S>(&mut self, urls: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let urls: Vec<String> = urls.into_iter().map(|u| u.as_ref().to_string()).collect();
        if urls.is_empty() {
            return false;
        }

        let all_selected = urls.iter().all(|url| self.selected.contains(url));
        if all_selected {
            for url in &urls {
                self.selected.remove(url);
            }
            false
        } else {
            self.selected.extend(urls);
            true
        }
    }

    /// Replaces the selection with exactly `limited`
    ///
    /// Prior manual toggles are discarded.
    pub fn reset_to_limited<I, S>(&mut self, limited: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected = limited.into_iter().map(Into::into).collect();
        self.synced_key = Some(self.selected.iter().cloned().collect());
    }

    /// Resets to `limited` only if its membership differs from the set last
    /// synced to
    ///
    /// # Returns
    ///
    /// `true` if the selection was reset
    pub fn sync_with_limited<I, S>(&mut self, limited: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let key: BTreeSet<String> = limited.into_iter().map(Into::into).collect();
        let key: Vec<String> = key.into_iter().collect();

        if self.synced_key.as_ref() == Some(&key) {
            return false;
        }

        tracing::debug!("Limited set changed, reselecting {} URLs", key.len());
        self.reset_to_limited(key);
        true
    }

    /// Drops every selected URL and the sync key
    pub fn clear(&mut self) {
        self.selected.clear();
        self.synced_key = None;
    }

    /// Returns true if `url` is selected
    pub fn contains(&self, url: &str) -> bool {
        self.selected.contains(url)
    }

    /// The selected URLs, sorted
    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    /// Number of selected URLs
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Returns true if nothing is selected
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: &str = "https://example.com/a";
    const B: &str = "https://example.com/b";
    const C: &str = "https://example.com/c";

    #[test]
    fn test_partial_group_selects_all() {
        let mut tracker = SelectionTracker::from_limited([A, B]);
        assert!(tracker.toggle_set([A, B, C]));
        assert_eq!(tracker.len(), 3);
        assert!(tracker.contains(C));
    }

    #[test]
    fn test_full_group_deselects_all() {
        let mut tracker = SelectionTracker::from_limited([A, B, C]);
        assert!(!tracker.toggle_set([A, B]));
        assert_eq!(tracker.selected().iter().collect::<Vec<_>>(), vec![C]);
    }

    #[test]
    fn test_empty_group_is_noop() {
        let mut tracker = SelectionTracker::from_limited([A]);
        assert!(!tracker.toggle_set(Vec::<String>::new()));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_reset_discards_manual_toggles() {
        let mut tracker = SelectionTracker::from_limited([A]);
        tracker.toggle_set([C]);
        tracker.reset_to_limited([A, B]);
        assert!(!tracker.contains(C));
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn test_sync_ignores_unchanged_membership() {
        let mut tracker = SelectionTracker::from_limited([B, A]);
        tracker.toggle_set([C]);

        // Same members in a different order: keep manual toggles
        assert!(!tracker.sync_with_limited([A, B]));
        assert!(tracker.contains(C));

        // Membership changed: reselect
        assert!(tracker.sync_with_limited([A]));
        assert!(!tracker.contains(C));
        assert!(!tracker.contains(B));
    }

    #[test]
    fn test_clear() {
        let mut tracker = SelectionTracker::from_limited([A]);
        tracker.clear();
        assert!(tracker.is_empty());
        assert!(tracker.sync_with_limited([A]));
    }
}
