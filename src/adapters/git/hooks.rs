//! Git hooks installation
//!
//! checkmeta owns a marked section of the pre-commit hook. Existing hook
//! content outside that section is always preserved.

use std::fs;
use std::path::Path;

use log::debug;

/// First line of the checkmeta section
pub const SECTION_BEGIN: &str = "# >>> checkmeta >>>";
/// Last line of the checkmeta section
pub const SECTION_END: &str = "# <<< checkmeta <<<";

const SHEBANG: &str = "#!/bin/sh\n";

/// What installing the hook did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookInstall {
    /// A new hook file was written
    Created,
    /// The section was added to an existing hook
    Appended,
    /// An existing section was rewritten (`force`)
    Replaced,
    /// The section was already present
    Unchanged,
}

fn section() -> String {
    format!(
        "{SECTION_BEGIN}\n# Rejects commits whose staged files violate the meta rules\ncheckmeta check || exit 1\n{SECTION_END}\n"
    )
}

/// Install the pre-commit hook into `hooks_dir`
///
/// With `force` an existing checkmeta section is replaced by a fresh one.
pub fn install_pre_commit(hooks_dir: &Path, force: bool) -> anyhow::Result<HookInstall> {
    fs::create_dir_all(hooks_dir)?;
    let hook_path = hooks_dir.join("pre-commit");

    let (content, status) = if hook_path.exists() {
        let existing = fs::read_to_string(&hook_path)?;
        let installed = existing.contains(SECTION_BEGIN);
        if installed && !force {
            return Ok(HookInstall::Unchanged);
        }

        let base = remove_checkmeta_sections(&existing);
        let base = base.trim_end();
        let status = if installed { HookInstall::Replaced } else { HookInstall::Appended };
        if base.is_empty() || base == SHEBANG.trim_end() {
            (format!("{SHEBANG}{}", section()), status)
        } else {
            (format!("{base}\n\n{}", section()), status)
        }
    } else {
        (format!("{SHEBANG}{}", section()), HookInstall::Created)
    };

    fs::write(&hook_path, content)?;
    make_executable(&hook_path)?;
    debug!("pre-commit hook at {}: {status:?}", hook_path.display());

    Ok(status)
}

/// Remove the checkmeta section from the pre-commit hook
///
/// The file is deleted when nothing but a shebang remains. Returns whether
/// anything was removed.
pub fn remove_pre_commit(hooks_dir: &Path) -> anyhow::Result<bool> {
    let hook_path = hooks_dir.join("pre-commit");
    if !hook_path.exists() {
        return Ok(false);
    }

    let existing = fs::read_to_string(&hook_path)?;
    if !existing.contains(SECTION_BEGIN) {
        return Ok(false);
    }

    let remaining = remove_checkmeta_sections(&existing);
    if remaining.trim().is_empty() || remaining.trim() == SHEBANG.trim_end() {
        fs::remove_file(&hook_path)?;
    } else {
        fs::write(&hook_path, remaining)?;
    }
    Ok(true)
}

/// Strip every checkmeta section from hook text
///
/// Blank lines left directly before a removed section are dropped as well. An
/// unterminated section runs to the end of the text.
#[must_use]
pub fn remove_checkmeta_sections(content: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    let mut inside = false;

    for line in content.lines() {
        if inside {
            inside = line.trim() != SECTION_END;
            continue;
        }
        if line.trim() == SECTION_BEGIN {
            while kept.last().is_some_and(|l| l.trim().is_empty()) {
                kept.pop();
            }
            inside = true;
            continue;
        }
        kept.push(line);
    }

    if kept.is_empty() {
        String::new()
    } else {
        let mut out = kept.join("\n");
        out.push('\n');
        out
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)
}

#[cfg(not(unix))]
#[allow(clippy::unnecessary_wraps)]
const fn make_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
