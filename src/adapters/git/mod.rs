//! Git integration adapter
//!
//! Implements the `ContentSource` and `VersionControl` ports using the git
//! command line.
//!
//! - [`hooks`] - Git hooks installation
//! - [`staging`] - Change set detection

pub mod hooks;
pub mod staging;

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::core::ports::{ContentError, ContentSource, VersionControl};

pub use hooks::{HookInstall, install_pre_commit, remove_checkmeta_sections, remove_pre_commit};
pub use staging::{get_range_files, get_staged_files, get_tracked_files};

/// Which change set a [`GitRepository`] checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Files staged for commit, read from the index
    Staged,
    /// Every tracked file, read from the index
    Tracked,
    /// Files changed in a revision range, read from its tip
    Range(String),
}

impl Selection {
    /// The revision content is read from (`None` for the index)
    #[must_use]
    pub fn revision(&self) -> Option<&str> {
        match self {
            Self::Staged | Self::Tracked => None,
            Self::Range(range) => Some(range_tip(range)),
        }
    }
}

/// The revision a range ends at: `B` for `A..B` and `A...B`, or the whole text
fn range_tip(range: &str) -> &str {
    let tip = range.rsplit_once("..").map_or(range, |(_, tip)| tip.trim_start_matches('.'));
    if tip.is_empty() { "HEAD" } else { tip }
}

fn join_prefix(prefix: &str, path: &str) -> String {
    let joined = format!("{prefix}{}", path.replace('\\', "/"));
    let mut parts: Vec<&str> = Vec::new();
    for part in joined.split('/') {
        match part {
            "" | "." => {},
            ".." => {
                parts.pop();
            },
            part => parts.push(part),
        }
    }
    parts.join("/")
}

/// Git-based version control implementation
#[derive(Debug, Clone)]
pub struct GitRepository {
    /// Working directory
    workdir: PathBuf,
    /// Change set and snapshot
    selection: Selection,
    /// Directory the user invoked us from, relative to `workdir` (`src/`)
    prefix: String,
}

impl GitRepository {
    /// Create a git adapter rooted at `workdir`
    #[must_use]
    pub const fn new(workdir: PathBuf, selection: Selection) -> Self {
        Self {
            workdir,
            selection,
            prefix: String::new(),
        }
    }

    /// Create a git adapter for the repository containing the current directory
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory is not inside a git repository.
    pub fn discover(selection: Selection) -> anyhow::Result<Self> {
        let cwd = std::env::current_dir()?;
        let root = Self::new(cwd.clone(), Selection::Staged).repo_root()?;
        let prefix = staging::git_output(&cwd, &["rev-parse", "--show-prefix"])?;
        Ok(Self {
            prefix: String::from_utf8_lossy(&prefix).trim().to_string(),
            ..Self::new(root, selection)
        })
    }

    /// The working directory commands run in
    #[must_use]
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Turn a path typed by the user into a repository-relative path
    ///
    /// The path is taken relative to the directory `discover` ran in; `.` and
    /// `..` components are resolved.
    #[must_use]
    pub fn repo_path(&self, path: &str) -> String {
        join_prefix(&self.prefix, path)
    }

    /// The selected change set
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The hooks directory, honouring `core.hooksPath` and worktrees
    pub fn hooks_dir(&self) -> anyhow::Result<PathBuf> {
        let stdout = staging::git_output(&self.workdir, &["rev-parse", "--git-path", "hooks"])?;
        let dir = PathBuf::from(String::from_utf8_lossy(&stdout).trim());
        Ok(if dir.is_absolute() { dir } else { self.workdir.join(dir) })
    }

    fn object_name(&self, path: &str) -> String {
        self.selection.revision().map_or_else(|| format!(":{path}"), |rev| format!("{rev}:{path}"))
    }
}

impl ContentSource for GitRepository {
    fn read(&self, path: &str) -> Result<Vec<u8>, ContentError> {
        let object = self.object_name(path);
        let io_error = |source| ContentError::Io {
            path: path.to_string(),
            source,
        };

        let exists = Command::new("git")
            .current_dir(&self.workdir)
            .args(["cat-file", "-e", &object])
            .output()
            .map_err(io_error)?;
        if !exists.status.success() {
            return Err(ContentError::NotFound(path.to_string()));
        }

        let output = Command::new("git")
            .current_dir(&self.workdir)
            .args(["cat-file", "blob", &object])
            .output()
            .map_err(io_error)?;
        if !output.status.success() {
            return Err(ContentError::Command {
                path: path.to_string(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output.stdout)
    }
}

impl VersionControl for GitRepository {
    fn changed_files(&self) -> anyhow::Result<Vec<String>> {
        match &self.selection {
            Selection::Staged => get_staged_files(&self.workdir),
            Selection::Tracked => get_tracked_files(&self.workdir, None),
            Selection::Range(range) => get_range_files(&self.workdir, range),
        }
    }

    fn tracked_files(&self) -> anyhow::Result<Vec<String>> {
        get_tracked_files(&self.workdir, self.selection.revision())
    }

    fn repo_root(&self) -> anyhow::Result<PathBuf> {
        let output = Command::new("git")
            .current_dir(&self.workdir)
            .args(["rev-parse", "--show-toplevel"])
            .output()?;

        if !output.status.success() {
            anyhow::bail!("Not a git repository");
        }

        let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(PathBuf::from(root))
    }
}
