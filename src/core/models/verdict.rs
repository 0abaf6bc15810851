//! Validation results
//!
//! A [`Verdict`] holds one [`FileVerdict`] per checked path, in the order the
//! paths were given, and passes only when no file has a [`Violation`].

use std::fmt;

use serde::{Serialize, Serializer};

use super::{Attribute, AttributeKind, EffectiveAttributes};

/// Why a violation was recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCategory {
    /// Content does not satisfy the declared value
    Mismatch,
    /// A mandatory kind was not assigned by any rule
    MandatoryMissing,
    /// The content accessor failed
    ContentUnavailable,
}

/// What the file was expected to carry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    /// The declared attribute
    Declared(Attribute),
    /// Nothing was declared for a mandatory kind
    Missing,
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Declared(attribute) => write!(f, "{}", attribute.value()),
            Self::Missing => write!(f, "missing"),
        }
    }
}

impl Serialize for Expectation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A single problem found for a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Attribute kind concerned
    pub kind: AttributeKind,
    /// Declared value, or missing
    pub expected: Expectation,
    /// Category of the problem
    pub category: ViolationCategory,
    /// Human-readable explanation
    pub reason: String,
}

impl Violation {
    /// Content does not satisfy `attribute`
    #[must_use]
    pub fn mismatch(attribute: &Attribute, reason: impl Into<String>) -> Self {
        Self {
            kind: attribute.kind(),
            expected: Expectation::Declared(attribute.clone()),
            category: ViolationCategory::Mismatch,
            reason: reason.into(),
        }
    }

    /// A mandatory kind is absent
    #[must_use]
    pub fn mandatory_missing(kind: AttributeKind) -> Self {
        Self {
            kind,
            expected: Expectation::Missing,
            category: ViolationCategory::MandatoryMissing,
            reason: "mandatory attribute not assigned by any rule".to_string(),
        }
    }

    /// Content for `attribute` could not be read
    #[must_use]
    pub fn content_unavailable(attribute: &Attribute, error: impl fmt::Display) -> Self {
        Self {
            kind: attribute.kind(),
            expected: Expectation::Declared(attribute.clone()),
            category: ViolationCategory::ContentUnavailable,
            reason: format!("content unavailable: {error}"),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.expected {
            Expectation::Declared(attribute) => write!(f, "{attribute}: {}", self.reason),
            Expectation::Missing => write!(f, "{} missing: {}", self.kind, self.reason),
        }
    }
}

/// The result for one path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileVerdict {
    /// Repository-relative path
    pub path: String,
    /// Resolved attributes
    pub attributes: EffectiveAttributes,
    /// Every problem found, mandatory checks first
    pub violations: Vec<Violation>,
}

impl FileVerdict {
    /// Whether the file has no violations
    #[must_use]
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }
}

/// The result for a whole change set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Verdict {
    /// Per-file results in input order
    pub files: Vec<FileVerdict>,
}

impl Verdict {
    /// Whether no file has a violation
    #[must_use]
    pub fn passed(&self) -> bool {
        self.files.iter().all(FileVerdict::passed)
    }

    /// Total number of violations
    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.files.iter().map(|f| f.violations.len()).sum()
    }

    /// Files with at least one violation, in input order
    pub fn failed_files(&self) -> impl Iterator<Item = &FileVerdict> {
        self.files.iter().filter(|f| !f.passed())
    }

    /// One diagnostic line per violation, grouped by file in input order
    #[must_use]
    pub fn diagnostics(&self) -> Vec<String> {
        self.failed_files()
            .flat_map(|file| file.violations.iter().map(move |v| format!("{}: {v}", file.path)))
            .collect()
    }
}
