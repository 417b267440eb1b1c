//! Namespace tree: node types and kind tags.

pub mod node;

pub use node::{DirectoryNode, FileNode, Node, NodeKind};
