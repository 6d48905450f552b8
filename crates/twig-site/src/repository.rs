//! Frozen node repository.
//!
//! Holds the resolved set (imported documents plus synthesized ancestors)
//! for one resolution run.
//!
//! # Architecture
//!
//! Nodes are stored in a flat `Vec<ResolvedNode>` with parent/children
//! relationships tracked by indices. This provides:
//! - O(1) key lookups via `key_index` `HashMap`
//! - O(1) ordered child lookups via a children index built once
//!
//! Sibling lists and the root list are sorted by `order` ascending, then by
//! key, so traversal order never depends on import order.

use std::cmp::Ordering;
use std::collections::HashMap;

use twig_storage::ImportedNode;

use crate::key;
use crate::node::ResolvedNode;
use crate::virtual_nodes::synthesize_virtual_nodes;

/// Immutable resolved set with a parent-key → children index.
#[derive(Debug)]
pub struct NodeRepository {
    nodes: Vec<ResolvedNode>,
    children: Vec<Vec<usize>>,
    roots: Vec<usize>,
    key_index: HashMap<String, usize>,
}

/// Sibling ordering: `order` ascending, then key.
fn compare_siblings(a: &ResolvedNode, b: &ResolvedNode) -> Ordering {
    a.order()
        .cmp(&b.order())
        .then_with(|| a.key().cmp(b.key()))
}

impl NodeRepository {
    /// Build the resolved set from imported documents.
    ///
    /// Missing ancestors are synthesized. If two documents share a key, the
    /// first one is kept.
    #[must_use]
    pub fn new(imported: Vec<ImportedNode>) -> Self {
        let virtual_nodes = synthesize_virtual_nodes(&imported);

        let mut nodes = Vec::with_capacity(imported.len() + virtual_nodes.len());
        let mut key_index = HashMap::with_capacity(nodes.capacity());

        let resolved = imported
            .into_iter()
            .map(ResolvedNode::imported)
            .chain(virtual_nodes.into_iter().map(ResolvedNode::Virtual));
        for node in resolved {
            if key_index.contains_key(node.key()) {
                tracing::warn!(key = node.key(), "Duplicate document key ignored");
                continue;
            }
            key_index.insert(node.key().to_owned(), nodes.len());
            nodes.push(node);
        }

        let mut children = vec![Vec::new(); nodes.len()];
        let mut roots = Vec::new();
        for (idx, node) in nodes.iter().enumerate() {
            match key::parent_key(node.key()) {
                None => roots.push(idx),
                Some(parent) => {
                    let parent_idx = key_index.get(parent).copied();
                    debug_assert!(parent_idx.is_some(), "orphan node {}", node.key());
                    if let Some(parent_idx) = parent_idx {
                        children[parent_idx].push(idx);
                    }
                }
            }
        }

        roots.sort_by(|&a, &b| compare_siblings(&nodes[a], &nodes[b]));
        for siblings in &mut children {
            siblings.sort_by(|&a, &b| compare_siblings(&nodes[a], &nodes[b]));
        }

        Self {
            nodes,
            children,
            roots,
            key_index,
        }
    }

    /// Number of resolved nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the repository holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes, imported first, in no particular hierarchy order.
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedNode> {
        self.nodes.iter()
    }

    /// Number of synthesized nodes.
    #[must_use]
    pub fn virtual_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_virtual()).count()
    }

    /// Get node by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ResolvedNode> {
        self.key_index.get(key).map(|&i| &self.nodes[i])
    }

    /// Level-1 nodes in traversal order.
    pub fn roots(&self) -> impl Iterator<Item = &ResolvedNode> {
        self.roots.iter().map(|&i| &self.nodes[i])
    }

    /// Direct children of `key` in traversal order.
    ///
    /// Returns an empty list for unknown keys.
    #[must_use]
    pub fn children(&self, key: &str) -> Vec<&ResolvedNode> {
        self.key_index
            .get(key)
            .map(|&i| self.child_indices(i).iter().map(|&c| &self.nodes[c]).collect())
            .unwrap_or_default()
    }

    pub(crate) fn node(&self, idx: usize) -> &ResolvedNode {
        &self.nodes[idx]
    }

    pub(crate) fn root_indices(&self) -> &[usize] {
        &self.roots
    }

    pub(crate) fn child_indices(&self, idx: usize) -> &[usize] {
        &self.children[idx]
    }
}
