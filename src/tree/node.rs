//! Namespace node types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// File node representation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    pub contents: Vec<u8>, // opaque blob, accumulated by appends
}

/// Directory node representation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryNode {
    pub children: BTreeMap<String, Node>, // name -> child, sorted by name
}

/// Namespace node type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
    Directory(DirectoryNode),
    File(FileNode),
}

/// Kind tag used by existence checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Directory,
    File,
}

impl FileNode {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DirectoryNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Immediate child names in sorted order.
    pub fn child_names(&self) -> Vec<String> {
        self.children.keys().cloned().collect()
    }
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Directory(_) => NodeKind::Directory,
            Node::File(_) => NodeKind::File,
        }
    }

    pub fn as_directory(&self) -> Option<&DirectoryNode> {
        match self {
            Node::Directory(dir) => Some(dir),
            Node::File(_) => None,
        }
    }

    pub fn as_directory_mut(&mut self) -> Option<&mut DirectoryNode> {
        match self {
            Node::Directory(dir) => Some(dir),
            Node::File(_) => None,
        }
    }

    pub fn as_file(&self) -> Option<&FileNode> {
        match self {
            Node::Directory(_) => None,
            Node::File(file) => Some(file),
        }
    }

    pub fn as_file_mut(&mut self) -> Option<&mut FileNode> {
        match self {
            Node::Directory(_) => None,
            Node::File(file) => Some(file),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Directory => f.write_str("directory"),
            NodeKind::File => f.write_str("file"),
        }
    }
}
