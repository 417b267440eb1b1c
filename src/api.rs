//! Caller-facing namespace facade.
//!
//! Composes the Namespace Store and the Session Manager: every operation
//! resolves the caller's (possibly relative) path against the session
//! cursor, then issues the resolved absolute path to the store. This is
//! the only layer that sees both components, and the only place the
//! delete-own-cwd guard lives.

use crate::error::NamespaceError;
use crate::path::AbsolutePath;
use crate::session::{SessionId, SessionManager};
use crate::store::NamespaceStore;
use crate::views::NodeView;
use std::sync::Arc;
use tracing::debug;

/// Composite API over one shared namespace and many sessions.
///
/// One explicitly constructed store instance backs every session; clone
/// the facade behind an `Arc` to share it across threads.
pub struct Namespace {
    store: Arc<NamespaceStore>,
    sessions: SessionManager,
}

impl Namespace {
    /// Create a facade over a fresh empty namespace.
    pub fn new() -> Self {
        Self::with_store(Arc::new(NamespaceStore::new()))
    }

    /// Create a facade over an existing store instance.
    pub fn with_store(store: Arc<NamespaceStore>) -> Self {
        Self {
            store,
            sessions: SessionManager::new(),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &NamespaceStore {
        &self.store
    }

    pub fn open_session(&self) -> SessionId {
        self.sessions.open()
    }

    pub fn close_session(&self, id: &SessionId) -> Result<(), NamespaceError> {
        self.sessions.close(id)
    }

    pub fn current_working_directory(
        &self,
        id: &SessionId,
    ) -> Result<AbsolutePath, NamespaceError> {
        self.sessions.current_working_directory(id)
    }

    /// Move the session cursor; returns the new absolute path.
    pub fn change_directory(
        &self,
        id: &SessionId,
        path: &str,
    ) -> Result<AbsolutePath, NamespaceError> {
        self.sessions.change_directory(id, path, &self.store)
    }

    /// Sorted child names of `path`, defaulting to the session cursor.
    pub fn list_directory(
        &self,
        id: &SessionId,
        path: Option<&str>,
    ) -> Result<Vec<String>, NamespaceError> {
        let resolved = self.sessions.resolve(id, path.unwrap_or("."))?;
        self.store.list_directory(&resolved)
    }

    pub fn make_directory(&self, id: &SessionId, path: &str) -> Result<(), NamespaceError> {
        let resolved = self.sessions.resolve(id, path)?;
        self.store.make_directory(&resolved)
    }

    /// Delete the directory at `path`.
    ///
    /// Rejected before touching storage when the resolved target is the
    /// calling session's working directory or an ancestor of it. Other
    /// sessions' cursors are not protected; theirs go stale and fail
    /// lazily on next use.
    pub fn delete_directory(&self, id: &SessionId, path: &str) -> Result<(), NamespaceError> {
        let resolved = self.sessions.resolve(id, path)?;
        let cwd = self.sessions.current_working_directory(id)?;
        if resolved.is_prefix_of(&cwd) {
            debug!(session = %id, path = %resolved, "refused deletion of cwd or its ancestor");
            return Err(NamespaceError::InvalidPath(format!(
                "{} is the session's working directory or an ancestor of it",
                resolved
            )));
        }
        self.store.delete_directory(&resolved)
    }

    pub fn create_file(&self, id: &SessionId, path: &str) -> Result<(), NamespaceError> {
        let resolved = self.sessions.resolve(id, path)?;
        self.store.create_file(&resolved)
    }

    /// Append `contents` to the file at `path`.
    pub fn write_file(
        &self,
        id: &SessionId,
        path: &str,
        contents: &[u8],
    ) -> Result<(), NamespaceError> {
        let resolved = self.sessions.resolve(id, path)?;
        self.store.write_file(&resolved, contents)
    }

    pub fn read_file(&self, id: &SessionId, path: &str) -> Result<Vec<u8>, NamespaceError> {
        let resolved = self.sessions.resolve(id, path)?;
        self.store.read_file(&resolved)
    }

    /// Move the node at `from` (with its whole subtree) to `to`. Both
    /// arguments resolve against the session cursor.
    pub fn move_node(&self, id: &SessionId, from: &str, to: &str) -> Result<(), NamespaceError> {
        let from = self.sessions.resolve(id, from)?;
        let to = self.sessions.resolve(id, to)?;
        self.store.move_node(&from, &to)
    }

    /// Serializable snapshot of the whole tree (diagnostics).
    pub fn snapshot(&self) -> NodeView {
        self.store.snapshot()
    }

    /// Number of open sessions (diagnostics).
    pub fn session_count(&self) -> usize {
        self.sessions.session_count()
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self::new()
    }
}
