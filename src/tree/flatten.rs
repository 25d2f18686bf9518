//! Flattened, render-ready view of a path tree

use crate::tree::{NodeId, PathTree};
use std::collections::BTreeSet;

/// One visible row of a flattened tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub node: NodeId,
    pub name: String,
    pub full_path: String,
    /// Nesting level, 0 for children of the flattened node
    pub depth: usize,
    pub has_children: bool,
    pub is_expanded: bool,
    /// URLs ending exactly at this node
    pub own_url_count: usize,
    pub total_url_count: usize,
    pub limited_url_count: usize,
    pub is_included: bool,
    /// Every URL in the subtree is selected
    pub is_selected: bool,
    /// Some, but not all, URLs in the subtree are selected
    pub is_partially_selected: bool,
    /// The subtree holds URLs outside the limited set
    pub is_limited: bool,
}

impl PathTree {
    /// Flattens the children of `id` into rows
    ///
    /// Children are visited alphabetically by segment name. A row whose
    /// `full_path` is in `expanded` is followed by its own children at
    /// `depth + 1`. Selection state is computed over the subtree's URLs
    /// without regard to inclusion, so excluded branches still report what the
    /// user picked in them.
    pub fn flatten(
        &self,
        id: NodeId,
        expanded: &BTreeSet<String>,
        selected: &BTreeSet<String>,
    ) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        self.flatten_into(id, 0, expanded, selected, &mut rows);
        rows
    }

    fn flatten_into(
        &self,
        id: NodeId,
        depth: usize,
        expanded: &BTreeSet<String>,
        selected: &BTreeSet<String>,
        rows: &mut Vec<TreeRow>,
    ) {
        let mut children = self.children(id);
        children.sort_by(|a, b| self.node(*a).name.cmp(&self.node(*b).name));

        for child in children {
            let node = self.node(child);
            let urls = self.all_urls_unrestricted(child);
            let chosen = urls.iter().filter(|entry| selected.contains(&entry.loc)).count();
            let is_expanded = expanded.contains(&node.full_path);

            rows.push(TreeRow {
                node: child,
                name: node.name.clone(),
                full_path: node.full_path.clone(),
                depth,
                has_children: node.child_count() > 0,
                is_expanded,
                own_url_count: node.urls.len(),
                total_url_count: node.total_url_count,
                limited_url_count: node.limited_url_count,
                is_included: node.is_included,
                is_selected: !urls.is_empty() && chosen == urls.len(),
                is_partially_selected: chosen > 0 && chosen < urls.len(),
                is_limited: node.is_limited(),
            });

            if is_expanded {
                self.flatten_into(child, depth + 1, expanded, selected, rows);
            }
        }
    }
}
