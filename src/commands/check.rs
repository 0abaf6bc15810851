//! Validate a change set against the meta rules

use anyhow::Context;
use checkmeta::adapters::git::{GitRepository, Selection};
use checkmeta::core::ports::VersionControl;
use checkmeta::core::services::engine;
use checkmeta::output::{CheckReport, OutputMode};

use super::load_config;
use crate::cli::RuleArgs;

/// Validate changed files (pre-commit hook)
pub fn check(selection: Selection, ci: bool, args: &RuleArgs, mode: OutputMode) -> anyhow::Result<()> {
    let repo = GitRepository::discover(selection)?;
    let config = load_config(&repo, args)?;
    let mandatory = config.mandatory_set()?;

    let paths = repo.changed_files()?;
    let verdict = engine::run(&config.pattern_files, &mandatory, &paths, &repo)
        .context("cannot load meta rules")?;

    CheckReport::new(&verdict).render(mode);

    if !verdict.passed() {
        if !ci {
            std::process::exit(1);
        }
        anyhow::bail!("{} meta violation(s)", verdict.violation_count());
    }

    Ok(())
}
