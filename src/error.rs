//! Error types for namespace operations and crate bootstrap.

use thiserror::Error;

/// Errors returned by namespace and session operations.
///
/// Every error is an ordinary return value; the namespace and the session
/// table remain fully usable after any failure. Nothing is retried
/// automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamespaceError {
    /// Malformed path, nonexistent or wrong-kind target, or a protected
    /// self/ancestor deletion.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Terminal segment collision on a create-style operation.
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// Unknown or closed session id.
    #[error("invalid session: {0}")]
    InvalidSession(String),
}

/// Errors raised while bootstrapping configuration or logging.
#[derive(Debug, Error)]
pub enum SetupError {
    /// Invalid logging or configuration values.
    #[error("configuration error: {0}")]
    Config(String),

    /// Failure from the underlying configuration file/environment sources.
    #[error(transparent)]
    ConfigFile(#[from] config::ConfigError),
}
