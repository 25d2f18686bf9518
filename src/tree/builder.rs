//! Two-pass tree construction and inclusion queries

use crate::sitemap::SitemapEntry;
use crate::tree::{NodeId, PathTree, PathTreeNode, TreeStats, ROOT};
use crate::url::{join_path, path_segments};
use url::Url;

impl PathTree {
    /// Builds a tree over `entries`, limiting each non-root node to its first
    /// `max_children_per_parent` children that carry URLs
    ///
    /// # Build Passes
    ///
    /// 1. Shape: each entry is split into path segments and attached to the
    ///    node its path ends at (the root for `/`). Entries whose `loc` does not
    ///    parse as an absolute URL are dropped.
    /// 2. Limits: depth-first from the root. All of the root's children are
    ///    included. Below the root, only the first `max_children_per_parent`
    ///    children in encounter order are included, and exclusion propagates
    ///    to the whole subtree. Counts are then computed bottom-up.
    ///
    /// # Example
    ///
    /// ```
    /// use sitemap_lens::{PathTree, SitemapEntry};
    ///
    /// let entries: Vec<_> = ["https://example.com/a", "https://example.com/a/b", "https://example.com/c"]
    ///     .iter()
    ///     .map(|l| SitemapEntry::new(*l))
    ///     .collect();
    /// let (tree, stats) = PathTree::build(&entries, 20);
    /// assert_eq!(stats.total_original_urls, 3);
    /// assert_eq!(tree.root().total_url_count, 3);
    /// ```
    pub fn build(entries: &[SitemapEntry], max_children_per_parent: usize) -> (PathTree, TreeStats) {
        let mut tree = PathTree {
            nodes: vec![PathTreeNode::new("root", "")],
            max_children_per_parent,
        };
        let mut stats = TreeStats::default();

        for entry in entries {
            match Url::parse(&entry.loc) {
                Ok(url) => tree.insert(&path_segments(&url), entry.clone()),
                Err(e) => {
                    tracing::debug!("Dropping invalid sitemap URL {}: {}", entry.loc, e);
                    stats.invalid_urls += 1;
                }
            }
        }

        tree.nodes[ROOT].is_included = true;
        tree.apply_limits(ROOT, &mut stats);

        tracing::debug!(
            "Built path tree: {} nodes, {} URLs, {} within limit {}",
            tree.nodes.len(),
            stats.total_original_urls,
            stats.total_limited_urls,
            max_children_per_parent
        );

        (tree, stats)
    }

    /// Walks or creates one node per segment and attaches the entry at the end
    fn insert(&mut self, segments: &[String], entry: SitemapEntry) {
        let mut current = ROOT;

        for (depth, segment) in segments.iter().enumerate() {
            current = match self.nodes[current].child(segment) {
                Some(child) => child,
                None => {
                    let id = self.nodes.len();
                    let full_path = join_path(&segments[..=depth]);
                    self.nodes.push(PathTreeNode::new(segment.as_str(), full_path));
                    self.nodes[current].children.insert(segment.clone(), id);
                    id
                }
            };
        }

        self.nodes[current].urls.push(entry);
    }

    /// Marks inclusion for the children of `id`, recurses, then fills in the
    /// counts of `id`
    ///
    /// The inclusion of `id` itself must already be set.
    fn apply_limits(&mut self, id: NodeId, stats: &mut TreeStats) {
        let included = self.nodes[id].is_included;
        let allowed = if id == ROOT {
            usize::MAX
        } else {
            self.max_children_per_parent
        };

        let mut kept = 0;
        for child in self.children(id) {
            let selected = kept < allowed && self.has_any_urls(child);
            if selected {
                kept += 1;
            }
            self.nodes[child].is_included = selected && included;
            self.apply_limits(child, stats);
        }

        let own = self.nodes[id].urls.len();
        let (mut total, mut limited) = (own, own);
        for child in self.children(id) {
            total += self.nodes[child].total_url_count;
            limited += self.nodes[child].limited_url_count;
        }

        let node = &mut self.nodes[id];
        node.total_url_count = total;
        node.limited_url_count = if node.is_included { limited } else { 0 };

        stats.total_original_urls += own;
        if node.is_included {
            stats.total_limited_urls += own;
        }
    }

    /// Returns true if the node or any descendant holds a URL
    pub fn has_any_urls(&self, id: NodeId) -> bool {
        !self.nodes[id].urls.is_empty()
            || self.nodes[id]
                .children
                .values()
                .any(|&child| self.has_any_urls(child))
    }

    /// Collects the URLs of `id` and its descendants that are included
    ///
    /// Collection stops at the first excluded node; its descendants are never
    /// visited.
    pub fn all_included_urls(&self, id: NodeId) -> Vec<&SitemapEntry> {
        let mut out = Vec::new();
        self.collect_urls(id, true, &mut out);
        out
    }

    /// Collects the URLs of `id` and all of its descendants, ignoring inclusion
    pub fn all_urls_unrestricted(&self, id: NodeId) -> Vec<&SitemapEntry> {
        let mut out = Vec::new();
        self.collect_urls(id, false, &mut out);
        out
    }

    /// Locations of every included URL in the tree
    pub fn included_locs(&self) -> Vec<String> {
        self.all_included_urls(ROOT)
            .into_iter()
            .map(|entry| entry.loc.clone())
            .collect()
    }

    fn collect_urls<'a>(&'a self, id: NodeId, respect_inclusion: bool, out: &mut Vec<&'a SitemapEntry>) {
        let node = &self.nodes[id];
        if respect_inclusion && !node.is_included {
            return;
        }

        out.extend(node.urls.iter());
        for child in self.children(id) {
            self.collect_urls(child, respect_inclusion, out);
        }
    }
}
