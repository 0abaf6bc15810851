//! Rule resolver - computes the effective attributes of a path
//!
//! Rules are applied in declaration order. Every matching rule overwrites the
//! kinds it declares and leaves the others untouched, so the last matching rule
//! wins per attribute kind. No rule is ever skipped.
//!
//! # Examples
//!
//! ```
//! use checkmeta::core::models::AttributeKind;
//! use checkmeta::core::services::RuleSet;
//!
//! let rules = RuleSet::parse([(
//!     ".hgmeta",
//!     "checks: encoding(ascii)\n*.cpp\nchecks: mimetype(text/plain)\nspecial.cpp\n",
//! )])
//! .unwrap();
//!
//! let attrs = rules.resolve("src/special.cpp");
//! assert_eq!(attrs.len(), 2);
//! assert!(attrs.contains(AttributeKind::Encoding));
//! ```

use super::matcher::normalize_path;
use super::parser::{ParseError, parse_pattern_files};
use crate::core::models::{EffectiveAttributes, Rule};

/// An ordered list of rules
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Wrap already-parsed rules, keeping their order
    #[must_use]
    pub const fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Parse `(name, text)` pattern files in order
    pub fn parse<'a, I>(files: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        parse_pattern_files(files).map(Self::new)
    }

    /// The rules in declaration order
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of rules
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether there are no rules
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules matching `path`, in declaration order
    #[must_use]
    pub fn matching(&self, path: &str) -> Vec<&Rule> {
        let path = normalize_path(path);
        self.rules.iter().filter(|rule| rule.matches(&path)).collect()
    }

    /// Fold every matching rule into the effective attributes of `path`
    #[must_use]
    pub fn resolve(&self, path: &str) -> EffectiveAttributes {
        resolve(path, &self.rules)
    }
}

/// Compute the effective attributes of `path` under `rules`
#[must_use]
pub fn resolve(path: &str, rules: &[Rule]) -> EffectiveAttributes {
    let path = normalize_path(path);
    rules.iter().filter(|rule| rule.matches(&path)).fold(
        EffectiveAttributes::new(),
        |mut attrs, rule| {
            for attribute in &rule.checks {
                attrs.assign(attribute.clone(), rule.origin.clone());
            }
            attrs
        },
    )
}
