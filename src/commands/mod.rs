//! Command implementations

mod attrs;
mod check;
mod init;
mod rules;

pub use attrs::attrs;
pub use check::check;
pub use init::init;
pub use rules::rules;

use anyhow::Context;
use checkmeta::adapters::git::GitRepository;
use checkmeta::config::ProjectConfig;

use crate::cli::RuleArgs;

/// Project settings with command-line overrides applied
fn load_config(repo: &GitRepository, args: &RuleArgs) -> anyhow::Result<ProjectConfig> {
    let config = ProjectConfig::load(repo.workdir()).context("cannot load project configuration")?;
    Ok(config.with_overrides(&args.pattern_files, args.mandatory.as_deref()))
}
