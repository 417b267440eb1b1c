//! Namespace Store
//!
//! Serialized owner of the namespace tree. Every public operation takes an
//! already-absolute, normalized path, acquires the single tree lock once,
//! and completes in time proportional to path depth, so each operation is
//! atomic with respect to all others.
//!
//! Mutations follow a validate-then-apply discipline: every failure
//! condition is checked before the first structural change, and `move_node`
//! validates both endpoints before mutating either.

use crate::error::NamespaceError;
use crate::path::AbsolutePath;
use crate::tree::{DirectoryNode, FileNode, Node, NodeKind};
use crate::views::NodeView;
use parking_lot::Mutex;
use tracing::debug;

/// The single shared namespace tree.
///
/// The root is always a directory and is never deleted, renamed, or
/// replaced. One store instance is constructed explicitly and injected
/// into the session/facade layer; there is no process-global state.
pub struct NamespaceStore {
    root: Mutex<DirectoryNode>,
}

impl NamespaceStore {
    /// Create a store holding an empty root directory.
    pub fn new() -> Self {
        Self {
            root: Mutex::new(DirectoryNode::new()),
        }
    }

    /// Check that `path` resolves to an existing node of the given kind.
    ///
    /// The root path matches `NodeKind::Directory`.
    pub fn path_exists(&self, path: &AbsolutePath, kind: NodeKind) -> Result<(), NamespaceError> {
        let root = self.root.lock();
        if path.is_root() {
            return match kind {
                NodeKind::Directory => Ok(()),
                NodeKind::File => Err(NamespaceError::InvalidPath(
                    "/ is not a file".to_string(),
                )),
            };
        }
        match descend(&root, path.segments()) {
            Some(node) if node.kind() == kind => Ok(()),
            Some(node) => Err(NamespaceError::InvalidPath(format!(
                "{} is a {}, not a {}",
                path,
                node.kind(),
                kind
            ))),
            None => Err(NamespaceError::InvalidPath(format!(
                "{} does not exist",
                path
            ))),
        }
    }

    /// Create the terminal directory, creating missing intermediates.
    pub fn make_directory(&self, path: &AbsolutePath) -> Result<(), NamespaceError> {
        let (parents, name) = path.split_last().ok_or_else(|| {
            NamespaceError::InvalidPath("cannot create the root directory".to_string())
        })?;
        let mut root = self.root.lock();
        let parent = create_intermediates(&mut root, parents)?;
        if parent.children.contains_key(name) {
            return Err(NamespaceError::AlreadyExists(path.to_string()));
        }
        parent
            .children
            .insert(name.to_string(), Node::Directory(DirectoryNode::new()));
        debug!(path = %path, "created directory");
        Ok(())
    }

    /// Immediate child names of the directory at `path`, sorted.
    pub fn list_directory(&self, path: &AbsolutePath) -> Result<Vec<String>, NamespaceError> {
        let root = self.root.lock();
        let dir = descend_dir(&root, path.segments()).ok_or_else(|| {
            NamespaceError::InvalidPath(format!("{} does not resolve to a directory", path))
        })?;
        Ok(dir.child_names())
    }

    /// Remove the subtree rooted at `path` from its parent.
    ///
    /// The root is never deletable. Protecting a session's own cursor is
    /// the facade's responsibility, not the store's.
    pub fn delete_directory(&self, path: &AbsolutePath) -> Result<(), NamespaceError> {
        let (parents, name) = path.split_last().ok_or_else(|| {
            NamespaceError::InvalidPath("the root directory cannot be deleted".to_string())
        })?;
        let mut root = self.root.lock();
        let parent = descend_dir_mut(&mut root, parents).ok_or_else(|| {
            NamespaceError::InvalidPath(format!("{} does not exist", path))
        })?;
        match parent.children.get(name) {
            Some(Node::Directory(_)) => {
                parent.children.remove(name);
                debug!(path = %path, "deleted directory");
                Ok(())
            }
            Some(Node::File(_)) => Err(NamespaceError::InvalidPath(format!(
                "{} is a file, not a directory",
                path
            ))),
            None => Err(NamespaceError::InvalidPath(format!(
                "{} does not exist",
                path
            ))),
        }
    }

    /// Create an empty file at the terminal segment, creating missing
    /// intermediate directories.
    pub fn create_file(&self, path: &AbsolutePath) -> Result<(), NamespaceError> {
        let (parents, name) = path.split_last().ok_or_else(|| {
            NamespaceError::InvalidPath("cannot create a file at the root path".to_string())
        })?;
        let mut root = self.root.lock();
        let parent = create_intermediates(&mut root, parents)?;
        if parent.children.contains_key(name) {
            return Err(NamespaceError::AlreadyExists(path.to_string()));
        }
        parent
            .children
            .insert(name.to_string(), Node::File(FileNode::new()));
        debug!(path = %path, "created file");
        Ok(())
    }

    /// Append `bytes` to the file at `path`. Contents accumulate across
    /// calls; there is no overwrite.
    pub fn write_file(&self, path: &AbsolutePath, bytes: &[u8]) -> Result<(), NamespaceError> {
        let mut root = self.root.lock();
        let file = resolve_file_mut(&mut root, path)?;
        file.contents.extend_from_slice(bytes);
        debug!(path = %path, appended = bytes.len(), "wrote file");
        Ok(())
    }

    /// Full accumulated contents of the file at `path`.
    pub fn read_file(&self, path: &AbsolutePath) -> Result<Vec<u8>, NamespaceError> {
        let root = self.root.lock();
        let segments = path.segments();
        if segments.is_empty() {
            return Err(NamespaceError::InvalidPath("/ is not a file".to_string()));
        }
        match descend(&root, segments) {
            Some(Node::File(file)) => Ok(file.contents.clone()),
            Some(Node::Directory(_)) => Err(NamespaceError::InvalidPath(format!(
                "{} is a directory, not a file",
                path
            ))),
            None => Err(NamespaceError::InvalidPath(format!(
                "{} does not exist",
                path
            ))),
        }
    }

    /// Atomically detach the node at `from` and attach it, subtree and
    /// contents intact, as `to`, creating intermediate directories for
    /// `to` as needed.
    ///
    /// No implicit overwrite: an existing `to` terminal fails, and on any
    /// failure the tree is left exactly as if the call never happened.
    /// Moving a directory into its own subtree is rejected.
    pub fn move_node(&self, from: &AbsolutePath, to: &AbsolutePath) -> Result<(), NamespaceError> {
        let (from_parents, from_name) = from.split_last().ok_or_else(|| {
            NamespaceError::InvalidPath("the root directory cannot be moved".to_string())
        })?;
        if from.is_prefix_of(to) {
            return Err(NamespaceError::InvalidPath(format!(
                "cannot move {} into its own subtree at {}",
                from, to
            )));
        }
        let (to_parents, to_name) = to.split_last().ok_or_else(|| {
            NamespaceError::InvalidPath(format!("{} already exists", to))
        })?;

        let mut root = self.root.lock();

        // Validate the source endpoint.
        let from_parent = descend_dir(&root, from_parents).ok_or_else(|| {
            NamespaceError::InvalidPath(format!("{} does not exist", from))
        })?;
        if !from_parent.children.contains_key(from_name) {
            return Err(NamespaceError::InvalidPath(format!(
                "{} does not exist",
                from
            )));
        }

        // Validate the destination endpoint: every existing hop must be a
        // directory, and the terminal must be absent.
        let mut dir: &DirectoryNode = &root;
        let mut prefix_exists = true;
        for (i, segment) in to_parents.iter().enumerate() {
            match dir.children.get(segment) {
                Some(Node::Directory(child)) => dir = child,
                Some(Node::File(_)) => {
                    return Err(NamespaceError::InvalidPath(format!(
                        "/{} is a file, not a directory",
                        to_parents[..=i].join("/")
                    )));
                }
                None => {
                    prefix_exists = false;
                    break;
                }
            }
        }
        if prefix_exists && dir.children.contains_key(to_name) {
            return Err(NamespaceError::InvalidPath(format!(
                "{} already exists",
                to
            )));
        }

        // Both endpoints validated; everything below is infallible. The
        // detach cannot invalidate the destination chain because `from` is
        // not a prefix of `to`.
        create_intermediates(&mut root, to_parents)?;
        let node = descend_dir_mut(&mut root, from_parents)
            .and_then(|parent| parent.children.remove(from_name))
            .ok_or_else(|| NamespaceError::InvalidPath(format!("{} does not exist", from)))?;
        let target = descend_dir_mut(&mut root, to_parents)
            .ok_or_else(|| NamespaceError::InvalidPath(format!("{} does not exist", to)))?;
        target.children.insert(to_name.to_string(), node);
        debug!(from = %from, to = %to, "moved node");
        Ok(())
    }

    /// Replace the whole tree with a fresh empty root.
    ///
    /// Test scaffolding only; not part of the caller-facing contract.
    pub fn reset(&self) {
        *self.root.lock() = DirectoryNode::new();
    }

    /// Serializable deep snapshot of the tree.
    pub fn snapshot(&self) -> NodeView {
        let root = self.root.lock();
        NodeView::from_directory(&root)
    }
}

impl Default for NamespaceStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Walk `segments` through directory children, returning the terminal
/// node. `None` if any hop is missing or a file.
fn descend<'a>(root: &'a DirectoryNode, segments: &[String]) -> Option<&'a Node> {
    let (first, rest) = segments.split_first()?;
    let mut node = root.children.get(first)?;
    for segment in rest {
        node = node.as_directory()?.children.get(segment)?;
    }
    Some(node)
}

/// Walk `segments` to a directory; the empty list yields the root.
fn descend_dir<'a>(root: &'a DirectoryNode, segments: &[String]) -> Option<&'a DirectoryNode> {
    let mut dir = root;
    for segment in segments {
        dir = dir.children.get(segment)?.as_directory()?;
    }
    Some(dir)
}

fn descend_dir_mut<'a>(
    root: &'a mut DirectoryNode,
    segments: &[String],
) -> Option<&'a mut DirectoryNode> {
    let mut dir = root;
    for segment in segments {
        dir = dir.children.get_mut(segment)?.as_directory_mut()?;
    }
    Some(dir)
}

/// Descend through `segments`, creating missing directories along the way.
///
/// Failure is only possible inside the pre-existing prefix (an existing
/// file blocking the walk); once the first directory is created, every
/// deeper hop is fresh, so no partial mutation precedes an error.
fn create_intermediates<'a>(
    root: &'a mut DirectoryNode,
    segments: &[String],
) -> Result<&'a mut DirectoryNode, NamespaceError> {
    let mut dir = root;
    for (i, segment) in segments.iter().enumerate() {
        let node = dir
            .children
            .entry(segment.clone())
            .or_insert_with(|| Node::Directory(DirectoryNode::new()));
        dir = match node {
            Node::Directory(child) => child,
            Node::File(_) => {
                return Err(NamespaceError::InvalidPath(format!(
                    "/{} is a file, not a directory",
                    segments[..=i].join("/")
                )));
            }
        };
    }
    Ok(dir)
}

/// Resolve `path` to an existing file for mutation.
fn resolve_file_mut<'a>(
    root: &'a mut DirectoryNode,
    path: &AbsolutePath,
) -> Result<&'a mut FileNode, NamespaceError> {
    let (parents, name) = path
        .split_last()
        .ok_or_else(|| NamespaceError::InvalidPath("/ is not a file".to_string()))?;
    let parent = descend_dir_mut(root, parents)
        .ok_or_else(|| NamespaceError::InvalidPath(format!("{} does not exist", path)))?;
    match parent.children.get_mut(name) {
        Some(Node::File(file)) => Ok(file),
        Some(Node::Directory(_)) => Err(NamespaceError::InvalidPath(format!(
            "{} is a directory, not a file",
            path
        ))),
        None => Err(NamespaceError::InvalidPath(format!(
            "{} does not exist",
            path
        ))),
    }
}
