//! Path tree module
//!
//! Arranges a flat list of sitemap entries into a tree keyed by URL path
//! segments, applies the per-parent child limit, and derives flattened,
//! render-ready rows.
//!
//! The tree is an arena: nodes live in one `Vec` owned by [`PathTree`] and
//! refer to their children by [`NodeId`]. There are no parent back-references.
//! A tree is never patched; changing the input or the limit means building a
//! new one.

mod builder;
mod flatten;
mod render;

pub use flatten::TreeRow;
pub use render::render_rows;

use crate::sitemap::SitemapEntry;
use std::collections::HashMap;

/// Index of a node inside its [`PathTree`]
pub type NodeId = usize;

/// Id of the root node of every tree
pub const ROOT: NodeId = 0;

/// One path segment boundary of the tree
#[derive(Debug, Clone)]
pub struct PathTreeNode {
    /// Segment string, `"root"` for the root
    pub name: String,

    /// Absolute path prefix from the root, empty at the root
    pub full_path: String,

    /// Entries whose path terminates exactly at this node, in source order
    pub urls: Vec<SitemapEntry>,

    /// Whether this node's URLs take part in the limited set
    pub is_included: bool,

    /// URLs in the whole subtree
    pub total_url_count: usize,

    /// URLs in the subtree that are included
    pub limited_url_count: usize,

    children: HashMap<String, NodeId>,
}

impl PathTreeNode {
    fn new(name: impl Into<String>, full_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            full_path: full_path.into(),
            urls: Vec::new(),
            is_included: false,
            total_url_count: 0,
            limited_url_count: 0,
            children: HashMap::new(),
        }
    }

    /// Looks up the child for a segment
    pub fn child(&self, segment: &str) -> Option<NodeId> {
        self.children.get(segment).copied()
    }

    /// Number of direct children
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Returns true if the subtree holds more URLs than it contributes
    pub fn is_limited(&self) -> bool {
        self.total_url_count > self.limited_url_count
    }
}

/// Totals accumulated while building a tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// URLs placed in the tree
    pub total_original_urls: usize,

    /// URLs placed in included nodes
    pub total_limited_urls: usize,

    /// Input entries dropped because their `loc` is not an absolute URL
    pub invalid_urls: usize,
}

/// A path tree built from sitemap entries
#[derive(Debug, Clone)]
pub struct PathTree {
    nodes: Vec<PathTreeNode>,
    max_children_per_parent: usize,
}

impl PathTree {
    /// Returns the node with the given id
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this tree.
    pub fn node(&self, id: NodeId) -> &PathTreeNode {
        &self.nodes[id]
    }

    /// Returns the root node
    pub fn root(&self) -> &PathTreeNode {
        &self.nodes[ROOT]
    }

    /// Limit used when this tree was built
    pub fn max_children_per_parent(&self) -> usize {
        self.max_children_per_parent
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree holds only the root and no URLs
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1 && self.nodes[ROOT].urls.is_empty()
    }

    /// Children of a node in encounter order
    ///
    /// Ids are handed out as nodes are created, so ascending id order is the
    /// order in which the source list first reached each child.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.nodes[id].children.values().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Finds the node for an absolute path such as `/blog/2024`
    ///
    /// The empty string and `/` both name the root.
    pub fn find(&self, path: &str) -> Option<NodeId> {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(ROOT, |id, segment| self.nodes[id].child(segment))
    }
}
