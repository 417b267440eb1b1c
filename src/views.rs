//! Namespace Views
//!
//! Read-only, serializable snapshots of the namespace tree for diagnostics
//! and structural assertions. A view is a deep copy taken under the store
//! lock; it never aliases live nodes.

use crate::tree::{DirectoryNode, Node};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Snapshot of one namespace node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeView {
    Directory { children: BTreeMap<String, NodeView> },
    File { size: usize },
}

impl NodeView {
    /// Snapshot a directory and its whole subtree.
    pub fn from_directory(dir: &DirectoryNode) -> Self {
        NodeView::Directory {
            children: dir
                .children
                .iter()
                .map(|(name, node)| (name.clone(), NodeView::from_node(node)))
                .collect(),
        }
    }

    pub fn from_node(node: &Node) -> Self {
        match node {
            Node::Directory(dir) => NodeView::from_directory(dir),
            Node::File(file) => NodeView::File {
                size: file.contents.len(),
            },
        }
    }

    /// Total node count in the snapshot, the snapshot root included.
    pub fn node_count(&self) -> usize {
        match self {
            NodeView::Directory { children } => {
                1 + children.values().map(NodeView::node_count).sum::<usize>()
            }
            NodeView::File { .. } => 1,
        }
    }
}
