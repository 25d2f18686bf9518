use crate::selection::SelectionTracker;
use crate::sitemap::SitemapEntry;
use crate::tree::{PathTree, TreeRow, TreeStats, ROOT};
use std::collections::BTreeSet;

/// State of one analysis session
///
/// Built fresh for each resolved sitemap. Changing the limit rebuilds the
/// tree from the stored entries and, when the limited set changed, replaces
/// the selection with it.
#[derive(Debug, Clone)]
pub struct Analysis {
    entries: Vec<SitemapEntry>,
    limit: usize,
    tree: PathTree,
    stats: TreeStats,
    selection: SelectionTracker,
    expanded: BTreeSet<String>,
}

impl Analysis {
    /// Starts a session over freshly resolved entries
    ///
    /// The selection starts out as the limited set.
    pub fn from_entries(entries: Vec<SitemapEntry>, limit: usize) -> Self {
        let (tree, stats) = PathTree::build(&entries, limit);
        let mut selection = SelectionTracker::new();
        selection.sync_with_limited(tree.included_locs());

        Self {
            entries,
            limit,
            tree,
            stats,
            selection,
            expanded: BTreeSet::new(),
        }
    }

    /// Rebuilds the tree with a new per-parent limit
    ///
    /// # Returns
    ///
    /// `true` if the limited set changed and the selection was reset to it;
    /// manual toggles are lost in that case.
    pub fn set_limit(&mut self, limit: usize) -> bool {
        let (tree, stats) = PathTree::build(&self.entries, limit);
        self.tree = tree;
        self.stats = stats;
        self.limit = limit;

        self.selection.sync_with_limited(self.tree.included_locs())
    }

    /// Toggles every URL under `path` as a group, excluded branches included
    ///
    /// # Returns
    ///
    /// * `Some(true)` - The group is now selected
    /// * `Some(false)` - The group is now deselected
    /// * `None` - No node exists at `path`
    pub fn toggle_path(&mut self, path: &str) -> Option<bool> {
        let id = self.tree.find(path)?;
        let urls: Vec<String> = self
            .tree
            .all_urls_unrestricted(id)
            .into_iter()
            .map(|entry| entry.loc.clone())
            .collect();

        Some(self.selection.toggle_set(urls))
    }

    /// Toggles a single URL
    pub fn toggle_url(&mut self, url: &str) -> bool {
        self.selection.toggle_set([url])
    }

    /// Marks `path` as expanded
    pub fn expand(&mut self, path: &str) {
        self.expanded.insert(normalize_path(path));
    }

    /// Marks `path` as collapsed
    pub fn collapse(&mut self, path: &str) {
        self.expanded.remove(&normalize_path(path));
    }

    /// Expands every ancestor of `path` and `path` itself
    pub fn reveal(&mut self, path: &str) {
        let path = normalize_path(path);
        let mut prefix = String::new();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            prefix.push('/');
            prefix.push_str(segment);
            self.expanded.insert(prefix.clone());
        }
    }

    /// Visible rows for the current expand / select state
    pub fn rows(&self) -> Vec<TreeRow> {
        self.tree
            .flatten(ROOT, &self.expanded, self.selection.selected())
    }

    /// Selected URLs, sorted
    pub fn selected_urls(&self) -> Vec<String> {
        self.selection.selected().iter().cloned().collect()
    }

    pub fn entries(&self) -> &[SitemapEntry] {
        &self.entries
    }

    pub fn tree(&self) -> &PathTree {
        &self.tree
    }

    pub fn stats(&self) -> TreeStats {
        self.stats
    }

    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

/// Tree paths are keyed as `/a/b` without a trailing slash
fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> Vec<SitemapEntry> {
        [
            "https://example.com/",
            "https://example.com/blog/one",
            "https://example.com/blog/two",
            "https://example.com/blog/three",
            "https://example.com/docs/intro",
        ]
        .iter()
        .map(|l| SitemapEntry::new(*l))
        .collect()
    }

    #[test]
    fn test_initial_selection_is_limited_set() {
        let analysis = Analysis::from_entries(site(), 2);
        assert_eq!(analysis.selection().len(), 4);
        assert!(!analysis.selection().contains("https://example.com/blog/three"));
        assert_eq!(analysis.stats().total_original_urls, 5);
        assert_eq!(analysis.stats().total_limited_urls, 4);
    }

    #[test]
    fn test_toggle_excluded_branch_directly() {
        let mut analysis = Analysis::from_entries(site(), 2);
        assert_eq!(analysis.toggle_path("/blog/three"), Some(true));
        assert!(analysis.selection().contains("https://example.com/blog/three"));
        assert_eq!(analysis.toggle_path("/nope"), None);
    }

    #[test]
    fn test_toggle_partial_group_selects_all() {
        let mut analysis = Analysis::from_entries(site(), 2);
        // two of three blog posts selected
        assert_eq!(analysis.toggle_path("/blog"), Some(true));
        assert_eq!(analysis.selection().len(), 5);
        assert_eq!(analysis.toggle_path("/blog"), Some(false));
        assert_eq!(analysis.selection().len(), 2);
    }

    #[test]
    fn test_limit_change_reselects() {
        let mut analysis = Analysis::from_entries(site(), 2);
        analysis.toggle_url("https://example.com/docs/intro");
        assert!(!analysis.selection().contains("https://example.com/docs/intro"));

        assert!(analysis.set_limit(3));
        assert_eq!(analysis.selection().len(), 5);
        assert!(analysis.selection().contains("https://example.com/docs/intro"));
    }

    #[test]
    fn test_limit_change_without_membership_change_keeps_toggles() {
        let mut analysis = Analysis::from_entries(site(), 3);
        analysis.toggle_url("https://example.com/");

        // every branch already fits, so raising the limit changes nothing
        assert!(!analysis.set_limit(10));
        assert!(!analysis.selection().contains("https://example.com/"));
        assert_eq!(analysis.limit(), 10);
    }

    #[test]
    fn test_rows_follow_expansion() {
        let mut analysis = Analysis::from_entries(site(), 2);
        assert_eq!(analysis.rows().len(), 2);

        analysis.expand("blog/");
        let rows = analysis.rows();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].full_path, "/blog");
        assert_eq!(rows[1].full_path, "/blog/one");
        assert!(rows[0].is_partially_selected);
        assert!(rows[0].is_limited);

        analysis.collapse("/blog");
        assert_eq!(analysis.rows().len(), 2);
    }

    #[test]
    fn test_reveal_expands_ancestors() {
        let mut analysis = Analysis::from_entries(site(), 2);
        analysis.reveal("/blog/one");
        let paths: Vec<_> = analysis.rows().into_iter().map(|r| r.full_path).collect();
        assert!(paths.contains(&"/blog/one".to_string()));
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/"), "");
        assert_eq!(normalize_path("a/b/"), "/a/b");
        assert_eq!(normalize_path(" /a "), "/a");
    }
}
