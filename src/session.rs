//! Session registry and cursor types.
//!
//! Sessions are opaque handles into a table of per-caller working
//! directories. The manager owns only path strings, never tree nodes, and
//! serializes access to the table independently of the store's own
//! serialization. The one place it consults the Namespace Store is the
//! directory check inside `change_directory`.

use crate::error::NamespaceError;
use crate::path::AbsolutePath;
use crate::store::NamespaceStore;
use crate::tree::NodeKind;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;
use uuid::Uuid;

/// Opaque, unforgeable session handle.
///
/// Backed by a random 128-bit id. Ids are never reused after `close`, so
/// a stale handle can never collide with a live session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Session manager: serialized owner of the session table.
pub struct SessionManager {
    sessions: RwLock<HashMap<SessionId, AbsolutePath>>,
}

impl SessionManager {
    /// Create a manager with an empty session table.
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Create a session with its cursor at the root. Sessions never
    /// expire automatically.
    pub fn open(&self) -> SessionId {
        let id = SessionId::generate();
        self.sessions.write().insert(id, AbsolutePath::root());
        debug!(session = %id, "opened session");
        id
    }

    /// Remove a session.
    pub fn close(&self, id: &SessionId) -> Result<(), NamespaceError> {
        match self.sessions.write().remove(id) {
            Some(_) => {
                debug!(session = %id, "closed session");
                Ok(())
            }
            None => Err(NamespaceError::InvalidSession(id.to_string())),
        }
    }

    /// The session's current cursor.
    ///
    /// The cursor was a valid directory when it was set, but the
    /// namespace can have mutated since; staleness surfaces as
    /// `InvalidPath` the next time the cursor is used against the store.
    pub fn current_working_directory(
        &self,
        id: &SessionId,
    ) -> Result<AbsolutePath, NamespaceError> {
        self.sessions
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| NamespaceError::InvalidSession(id.to_string()))
    }

    /// Resolve a caller-supplied path expression against the session
    /// cursor without touching the store.
    pub fn resolve(&self, id: &SessionId, expression: &str) -> Result<AbsolutePath, NamespaceError> {
        let cwd = self.current_working_directory(id)?;
        AbsolutePath::resolve(expression, &cwd)
    }

    /// Move the session cursor.
    ///
    /// The resolved path must be an existing directory in the store; the
    /// store check is a single call-and-wait, and the table lock is never
    /// held across it. On failure the cursor is left unchanged.
    pub fn change_directory(
        &self,
        id: &SessionId,
        expression: &str,
        store: &NamespaceStore,
    ) -> Result<AbsolutePath, NamespaceError> {
        let resolved = self.resolve(id, expression)?;
        store.path_exists(&resolved, NodeKind::Directory)?;

        let mut sessions = self.sessions.write();
        let cwd = sessions
            .get_mut(id)
            .ok_or_else(|| NamespaceError::InvalidSession(id.to_string()))?;
        *cwd = resolved.clone();
        debug!(session = %id, cwd = %resolved, "changed directory");
        Ok(resolved)
    }

    /// Number of open sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.read().len()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
