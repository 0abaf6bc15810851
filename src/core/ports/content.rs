//! Content access port
//!
//! Defines how the engine obtains file bytes without doing I/O itself.

use std::collections::BTreeMap;

use thiserror::Error;

/// Errors returned by a [`ContentSource`]
#[derive(Debug, Error)]
pub enum ContentError {
    /// The path does not exist in the snapshot being checked
    #[error("{0} does not exist")]
    NotFound(String),

    /// Reading the content failed
    #[error("cannot read {path}: {source}")]
    Io {
        /// Path being read
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The backing tool reported an error
    #[error("cannot read {path}: {message}")]
    Command {
        /// Path being read
        path: String,
        /// Error output of the tool
        message: String,
    },
}

/// Supplies the bytes of repository files
///
/// Implementations decide which snapshot (index, revision, worktree) is read.
#[cfg_attr(test, mockall::automock)]
pub trait ContentSource {
    /// Read the full content of a repository-relative path
    fn read(&self, path: &str) -> Result<Vec<u8>, ContentError>;
}

/// In-memory content, keyed by repository-relative path
#[derive(Debug, Clone, Default)]
pub struct MemoryContent {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryContent {
    /// An empty snapshot
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(path, content);
        self
    }

    /// Add or replace a file in place
    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), content.into());
    }

    /// Paths held, in sorted order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

impl ContentSource for MemoryContent {
    fn read(&self, path: &str) -> Result<Vec<u8>, ContentError> {
        self.files.get(path).cloned().ok_or_else(|| ContentError::NotFound(path.to_string()))
    }
}
