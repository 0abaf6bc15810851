//! Rules parsed from pattern files

use std::fmt;

use regex::Regex;
use serde::{Serialize, Serializer};

use super::Attribute;

/// Default syntax for pattern lines, switched by `syntax:` directives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyntaxMode {
    /// Shell-style globs (every file starts in this mode)
    #[default]
    Glob,
    /// Regular expressions searched anywhere in the path
    Regex,
}

impl SyntaxMode {
    /// Parse the argument of a `syntax:` directive
    #[must_use]
    pub fn from_directive(name: &str) -> Option<Self> {
        match name.trim() {
            "glob" | "relglob" => Some(Self::Glob),
            "re" | "regex" | "regexp" | "relre" => Some(Self::Regex),
            _ => None,
        }
    }

    /// The pattern kind used for lines without an explicit prefix
    #[must_use]
    pub const fn default_kind(self) -> PatternKind {
        match self {
            Self::Glob => PatternKind::RelGlob,
            Self::Regex => PatternKind::RelRegex,
        }
    }
}

impl fmt::Display for SyntaxMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Glob => write!(f, "glob"),
            Self::Regex => write!(f, "regexp"),
        }
    }
}

/// How a single pattern line is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    /// Glob matched at any directory depth (`glob:`, `relglob:`)
    RelGlob,
    /// Glob anchored at the repository root (`rootglob:`)
    RootGlob,
    /// Unanchored regular expression search (`re:`, `regexp:`, `relre:`)
    RelRegex,
    /// Exact path or directory prefix (`path:`)
    Path,
}

impl PatternKind {
    /// Parse an explicit per-line prefix (without the trailing colon)
    #[must_use]
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "glob" | "relglob" => Some(Self::RelGlob),
            "rootglob" => Some(Self::RootGlob),
            "re" | "regexp" | "relre" => Some(Self::RelRegex),
            "path" => Some(Self::Path),
            _ => None,
        }
    }

    /// The canonical prefix for this kind
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::RelGlob => "relglob",
            Self::RootGlob => "rootglob",
            Self::RelRegex => "relre",
            Self::Path => "path",
        }
    }
}

/// A compiled path pattern
#[derive(Debug, Clone)]
pub struct PathPattern {
    raw: String,
    kind: PatternKind,
    regex: Regex,
}

impl PathPattern {
    pub(crate) const fn from_parts(raw: String, kind: PatternKind, regex: Regex) -> Self {
        Self { raw, kind, regex }
    }

    /// The pattern text as written (without prefix)
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// How the pattern is interpreted
    #[must_use]
    pub const fn kind(&self) -> PatternKind {
        self.kind
    }

    /// The regular expression the pattern compiled to
    #[must_use]
    pub fn regex(&self) -> &str {
        self.regex.as_str()
    }

    /// Whether a normalized repository-relative path matches
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}

impl PartialEq for PathPattern {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.raw == other.raw
    }
}

impl Eq for PathPattern {}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.prefix(), self.raw)
    }
}

impl Serialize for PathPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Where a rule was declared
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleOrigin {
    /// Pattern file name
    pub file: String,
    /// 1-based line number
    pub line: usize,
}

impl fmt::Display for RuleOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// One pattern line together with the checks in effect above it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    /// Syntax mode in effect when the line was read
    pub syntax: SyntaxMode,
    /// Attributes assigned to matching paths
    pub checks: Vec<Attribute>,
    /// The path pattern
    pub pattern: PathPattern,
    /// Declaration site
    pub origin: RuleOrigin,
}

impl Rule {
    /// Whether this rule applies to a normalized repository-relative path
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.pattern.matches(path)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let checks: Vec<_> = self.checks.iter().map(ToString::to_string).collect();
        write!(f, "{} -> [{}]", self.pattern, checks.join(" "))
    }
}
