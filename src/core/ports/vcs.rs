//! Version control system port
//!
//! Defines the interface for interacting with version control.

use std::path::PathBuf;

use super::ContentSource;

/// Version control system abstraction
///
/// An implementation is bound to one snapshot (the index or a revision);
/// reading content through its [`ContentSource`] half reads from that snapshot,
/// pattern files included.
pub trait VersionControl: ContentSource {
    /// Files changed in the selected change set, excluding deletions
    fn changed_files(&self) -> anyhow::Result<Vec<String>>;

    /// Every file tracked in the snapshot
    fn tracked_files(&self) -> anyhow::Result<Vec<String>>;

    /// The repository root path
    fn repo_root(&self) -> anyhow::Result<PathBuf>;
}
