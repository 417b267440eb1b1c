//! Absolute paths and cursor-relative resolution.
//!
//! Paths are POSIX-style: `/` is the root, `/` separates segments, and
//! segments are non-empty strings without `/`. An [`AbsolutePath`] is an
//! already-normalized segment list; the empty list denotes the root.

use crate::error::NamespaceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Normalized absolute path into the namespace.
///
/// Contains no `.`/`..`/empty segments; the segment list uniquely
/// addresses a node (if it exists).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AbsolutePath {
    segments: Vec<String>,
}

impl AbsolutePath {
    /// The root path `/`.
    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Normalized segment list; empty for the root.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Parent path; `None` for the root (the root has no parent).
    pub fn parent(&self) -> Option<AbsolutePath> {
        let (parents, _) = self.split_last()?;
        Some(Self {
            segments: parents.to_vec(),
        })
    }

    /// Leading segments and the terminal segment; `None` for the root.
    pub fn split_last(&self) -> Option<(&[String], &str)> {
        let (last, parents) = self.segments.split_last()?;
        Some((parents, last.as_str()))
    }

    /// Child path obtained by appending one segment.
    pub fn join(&self, name: &str) -> AbsolutePath {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Self { segments }
    }

    /// Whether `self` addresses `other` or one of its ancestors.
    ///
    /// Inclusive: every path is a prefix of itself, and the root is a
    /// prefix of everything.
    pub fn is_prefix_of(&self, other: &AbsolutePath) -> bool {
        other.segments.len() >= self.segments.len()
            && other.segments[..self.segments.len()] == self.segments[..]
    }

    /// Resolve a caller-supplied path expression against a cursor.
    ///
    /// An expression beginning with `/` is absolute and the cursor is
    /// ignored; anything else is joined onto the cursor syntactically.
    /// Normalization is lexical: `.` segments are dropped, `..` pops the
    /// preceding segment, and `..` at the root is a no-op (shell `cd`
    /// behavior, not an error). Empty expressions are rejected before any
    /// resolution happens.
    pub fn resolve(expression: &str, cwd: &AbsolutePath) -> Result<AbsolutePath, NamespaceError> {
        if expression.is_empty() {
            return Err(NamespaceError::InvalidPath("empty path".to_string()));
        }
        if expression.contains('\0') {
            return Err(NamespaceError::InvalidPath(
                "path contains a NUL character".to_string(),
            ));
        }

        let mut segments = if expression.starts_with('/') {
            Vec::new()
        } else {
            cwd.segments.clone()
        };

        for component in expression.split('/') {
            match component {
                "" | "." => continue,
                ".." => {
                    segments.pop();
                }
                name => segments.push(name.to_string()),
            }
        }

        Ok(Self { segments })
    }
}

impl fmt::Display for AbsolutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for AbsolutePath {
    type Err = NamespaceError;

    /// Parse an already-absolute expression; relative forms are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.starts_with('/') {
            return Err(NamespaceError::InvalidPath(format!(
                "not an absolute path: {}",
                s
            )));
        }
        Self::resolve(s, &Self::root())
    }
}
