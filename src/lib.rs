//! Arbor: In-Memory Hierarchical Namespace
//!
//! A single shared tree of directories and files accessed concurrently by
//! independent sessions, each holding a private working-directory cursor.
//! The store serializes every tree operation; the session layer resolves
//! relative paths against per-session cursors before they reach the tree.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod path;
pub mod session;
pub mod store;
pub mod tree;
pub mod views;
