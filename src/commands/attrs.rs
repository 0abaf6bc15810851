//! Show the effective attributes of paths

use checkmeta::adapters::git::{GitRepository, Selection};
use checkmeta::core::services::engine;
use checkmeta::output::{AttrsEntry, AttrsReport, OutputMode};

use super::load_config;
use crate::cli::RuleArgs;

/// Resolve each path, relative to the current directory, against the rules in the index
pub fn attrs(paths: &[String], args: &RuleArgs, mode: OutputMode) -> anyhow::Result<()> {
    let repo = GitRepository::discover(Selection::Staged)?;
    let config = load_config(&repo, args)?;
    let rules = engine::load_rules(&config.pattern_files, &repo)?;

    let entries = paths
        .iter()
        .map(|path| {
            let path = repo.repo_path(path);
            AttrsEntry {
                attributes: rules.resolve(&path),
                path,
            }
        })
        .collect();

    AttrsReport { entries }.render(mode);
    Ok(())
}
