//! Adapter tests
//!
//! Tests for I/O adapter implementations:
//! - Git hooks installation and removal
//! - Git-backed content and change sets

mod git_repository_test;

use std::path::Path;
use std::process::Command;

/// Run git in `dir`, panicking on failure
pub fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Initialize a git repo with basic config
pub fn init_git_repo(path: &Path) {
    git(path, &["init", "-q"]);
    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "user.name", "Test User"]);
    git(path, &["config", "commit.gpgsign", "false"]);
}
