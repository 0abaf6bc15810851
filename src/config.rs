//! Project configuration
//!
//! Read from `.checkmeta.toml` at the repository root:
//!
//! ```toml
//! pattern_files = [".hgmeta"]
//! mandatory = "encoding, mimetype"
//! ```
//!
//! A missing file yields the defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::models::MandatorySet;

/// Configuration file name
pub const CONFIG_FILE: &str = ".checkmeta.toml";

/// Pattern file used when none is configured
pub const DEFAULT_PATTERN_FILE: &str = ".hgmeta";

/// Errors loading the project configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        /// Config file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or has the wrong shape
    #[error("invalid {}: {source}", .path.display())]
    Toml {
        /// Config file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: toml::de::Error,
    },

    /// `mandatory` names an unknown attribute kind
    #[error("invalid mandatory list: {0}")]
    UnknownAttribute(String),
}

/// Settings from `.checkmeta.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Pattern files, repository-relative, in parse order
    #[serde(default = "default_pattern_files")]
    pub pattern_files: Vec<String>,
    /// Space- or comma-separated attribute kinds every file must carry
    #[serde(default)]
    pub mandatory: String,
}

fn default_pattern_files() -> Vec<String> {
    vec![DEFAULT_PATTERN_FILE.to_string()]
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            pattern_files: default_pattern_files(),
            mandatory: String::new(),
        }
    }
}

impl ProjectConfig {
    /// Parse configuration text
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `.checkmeta.toml` from `root`, or the defaults if it is absent
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Self::parse(&text, &path)
    }

    /// Replace settings with command-line overrides
    #[must_use]
    pub fn with_overrides(mut self, pattern_files: &[String], mandatory: Option<&str>) -> Self {
        if !pattern_files.is_empty() {
            self.pattern_files = pattern_files.to_vec();
        }
        if let Some(mandatory) = mandatory {
            self.mandatory = mandatory.to_string();
        }
        self
    }

    /// The mandatory attribute kinds
    pub fn mandatory_set(&self) -> Result<MandatorySet, ConfigError> {
        MandatorySet::parse(&self.mandatory).map_err(ConfigError::UnknownAttribute)
    }

    /// Render as TOML
    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
