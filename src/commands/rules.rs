//! List the rules of the pattern files

use checkmeta::adapters::git::{GitRepository, Selection};
use checkmeta::core::services::engine;
use checkmeta::output::{OutputMode, RulesReport};

use super::load_config;
use crate::cli::RuleArgs;

/// Parse the pattern files in the index and list their rules
pub fn rules(args: &RuleArgs, mode: OutputMode) -> anyhow::Result<()> {
    let repo = GitRepository::discover(Selection::Staged)?;
    let config = load_config(&repo, args)?;
    let rules = engine::load_rules(&config.pattern_files, &repo)?;

    RulesReport {
        pattern_files: config.pattern_files.clone(),
        rules: rules.rules(),
    }
    .render(mode);
    Ok(())
}
