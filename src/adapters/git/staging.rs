//! Change set detection
//!
//! Lists the files a check covers. Paths are repository-relative and
//! deletions are excluded, since a deleted file has no content to validate.

use std::path::Path;
use std::process::Command;

use anyhow::Context;
use log::debug;

/// Run git in `workdir` and return its standard output
pub(super) fn git_output(workdir: &Path, args: &[&str]) -> anyhow::Result<Vec<u8>> {
    debug!("git {}", args.join(" "));
    let output = Command::new("git")
        .current_dir(workdir)
        .args(args)
        .output()
        .context("failed to run git")?;

    if !output.status.success() {
        anyhow::bail!(
            "git {} failed: {}",
            args.first().copied().unwrap_or_default(),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(output.stdout)
}

/// Split NUL-terminated `-z` output into paths
pub(super) fn split_paths(stdout: &[u8]) -> Vec<String> {
    stdout
        .split(|&b| b == 0)
        .filter(|p| !p.is_empty())
        .map(|p| String::from_utf8_lossy(p).into_owned())
        .collect()
}

/// Files staged for commit
pub fn get_staged_files(workdir: &Path) -> anyhow::Result<Vec<String>> {
    let stdout = git_output(
        workdir,
        &["diff", "--cached", "--name-only", "--diff-filter=d", "-z"],
    )?;
    Ok(split_paths(&stdout))
}

/// Files changed in a revision range such as `main..topic`
pub fn get_range_files(workdir: &Path, range: &str) -> anyhow::Result<Vec<String>> {
    let stdout = git_output(workdir, &["diff", "--name-only", "--diff-filter=d", "-z", range])?;
    Ok(split_paths(&stdout))
}

/// Files tracked in the index, or in `revision` when given
pub fn get_tracked_files(workdir: &Path, revision: Option<&str>) -> anyhow::Result<Vec<String>> {
    let stdout = match revision {
        Some(rev) => git_output(workdir, &["ls-tree", "-r", "--name-only", "--full-tree", "-z", rev])?,
        None => git_output(workdir, &["ls-files", "--full-name", "-z"])?,
    };
    Ok(split_paths(&stdout))
}
