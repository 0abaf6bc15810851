//! Install checkmeta in a repository

use std::fs;

use checkmeta::adapters::git::{self, GitRepository, HookInstall, Selection};
use checkmeta::config::{CONFIG_FILE, ProjectConfig};
use checkmeta::output::{OperationResult, OutputMode};

/// Install (or remove) the pre-commit hook and write a default config
pub fn init(force: bool, uninstall: bool, mode: OutputMode) -> anyhow::Result<()> {
    let repo = GitRepository::discover(Selection::Staged)?;
    let hooks_dir = repo.hooks_dir()?;

    if uninstall {
        let removed = git::remove_pre_commit(&hooks_dir)?;
        let message = if removed {
            "Removed checkmeta from the pre-commit hook"
        } else {
            "No checkmeta pre-commit hook installed"
        };
        OperationResult {
            success: true,
            message: message.to_string(),
        }
        .render(mode);
        return Ok(());
    }

    let mut lines = vec![match git::install_pre_commit(&hooks_dir, force)? {
        HookInstall::Created => "Installed pre-commit hook",
        HookInstall::Appended => "Added checkmeta to the existing pre-commit hook",
        HookInstall::Replaced => "Reinstalled checkmeta pre-commit hook",
        HookInstall::Unchanged => "Pre-commit hook already installed (use --force to rewrite)",
    }
    .to_string()];

    let config_path = repo.workdir().join(CONFIG_FILE);
    if !config_path.exists() {
        let content = format!("# checkmeta configuration\n\n{}", ProjectConfig::default().to_toml()?);
        fs::write(&config_path, content)?;
        lines.push(format!("Created {CONFIG_FILE}"));
    }

    OperationResult {
        success: true,
        message: lines.join("\n"),
    }
    .render(mode);
    Ok(())
}
