//! Resolved node representation.
//!
//! The resolved set mixes documents backed by a file with placeholders
//! synthesized for implied hierarchy levels. [`ResolvedNode`] tags each one
//! explicitly so the resolver never has to probe fields to tell them apart.

use twig_storage::ImportedNode;

use crate::entry::{DocEntryConfig, resolve_entry_config};
use crate::key;
use crate::virtual_nodes::VirtualNode;

/// A node of the resolved set.
#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedNode {
    /// Document backed by a source file.
    Imported {
        /// Imported document.
        node: ImportedNode,
        /// Resolved entry configuration (`Some` marks a sidebar root).
        entry: Option<DocEntryConfig>,
    },
    /// Synthesized ancestor placeholder.
    Virtual(VirtualNode),
}

impl ResolvedNode {
    /// Wrap an imported document, resolving its entry payload.
    #[must_use]
    pub fn imported(node: ImportedNode) -> Self {
        let entry = resolve_entry_config(node.entry_config_raw.as_ref());
        Self::Imported { node, entry }
    }

    /// Document key.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Imported { node, .. } => &node.key,
            Self::Virtual(node) => &node.key,
        }
    }

    /// Display title.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Imported { node, .. } => &node.title,
            Self::Virtual(node) => &node.title,
        }
    }

    /// Sibling order.
    #[must_use]
    pub fn order(&self) -> i64 {
        match self {
            Self::Imported { node, .. } => node.order,
            Self::Virtual(node) => node.order,
        }
    }

    /// Segment count of the key.
    #[must_use]
    pub fn level(&self) -> usize {
        key::level(self.key())
    }

    /// Entry configuration; always `None` for virtual nodes.
    #[must_use]
    pub fn entry(&self) -> Option<&DocEntryConfig> {
        match self {
            Self::Imported { entry, .. } => entry.as_ref(),
            Self::Virtual(_) => None,
        }
    }

    /// The imported document, if this node has one.
    #[must_use]
    pub fn as_imported(&self) -> Option<&ImportedNode> {
        match self {
            Self::Imported { node, .. } => Some(node),
            Self::Virtual(_) => None,
        }
    }

    /// True for synthesized nodes.
    #[must_use]
    pub fn is_virtual(&self) -> bool {
        matches!(self, Self::Virtual(_))
    }
}
