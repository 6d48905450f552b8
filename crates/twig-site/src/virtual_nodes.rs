//! Virtual ancestor synthesis.
//!
//! Dendron-style vaults may contain `x.y.z` without `x` or `x.y`. Every
//! missing strict prefix of an imported key gets exactly one placeholder
//! node so the hierarchy has no gaps.

use std::collections::HashSet;

use serde::Serialize;
use twig_storage::ImportedNode;

use crate::key;

/// Placeholder for a hierarchy level implied by a deeper document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VirtualNode {
    /// Document key.
    pub key: String,
    /// Last key segment.
    pub title: String,
    /// Always 0, so placeholders sort ahead of default-ordered documents.
    pub order: i64,
}

impl VirtualNode {
    /// Create a placeholder for `key`.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            title: key::last_segment(&key).to_owned(),
            key,
            order: 0,
        }
    }
}

/// Create the missing ancestors of `nodes`.
///
/// Imported keys are never shadowed, and each missing prefix is synthesized
/// once no matter how many descendants imply it. The result follows the
/// input order, ancestors shortest first.
#[must_use]
pub fn synthesize_virtual_nodes(nodes: &[ImportedNode]) -> Vec<VirtualNode> {
    let mut seen: HashSet<&str> = nodes.iter().map(|node| node.key.as_str()).collect();
    let mut virtual_nodes = Vec::new();

    for node in nodes {
        for ancestor in key::ancestor_keys(&node.key) {
            if seen.insert(ancestor) {
                virtual_nodes.push(VirtualNode::new(ancestor));
            }
        }
    }

    tracing::debug!(
        imported = nodes.len(),
        synthesized = virtual_nodes.len(),
        "Synthesized virtual nodes"
    );

    virtual_nodes
}
