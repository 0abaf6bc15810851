//! Validation engine - checks a change set against the rules
//!
//! The engine resolves each path, reports mandatory kinds that no rule
//! assigned, then runs the validator of every effective attribute. File bytes
//! are read through a [`ContentSource`] at most once per file and only when
//! some attribute inspects content. Every violation of every file is
//! collected; nothing short-circuits.

use log::{debug, warn};
use thiserror::Error;

use super::parser::ParseError;
use super::resolver::RuleSet;
use super::validators;
use crate::core::models::{FileVerdict, MandatorySet, Verdict, Violation};
use crate::core::ports::{ContentError, ContentSource};

/// Errors that abort a run before any file is validated
#[derive(Debug, Error)]
pub enum LoadError {
    /// A pattern file could not be read
    #[error(transparent)]
    Content(#[from] ContentError),

    /// A pattern file is not UTF-8 text
    #[error("{0} is not valid UTF-8")]
    NotUtf8(String),

    /// A pattern file is malformed
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Read and parse the pattern files, in order
///
/// Files missing from the snapshot are skipped. Any other read failure and
/// any parse error is fatal.
pub fn load_rules<S>(pattern_files: &[String], source: &S) -> Result<RuleSet, LoadError>
where
    S: ContentSource + ?Sized,
{
    let mut texts = Vec::with_capacity(pattern_files.len());
    for name in pattern_files {
        match source.read(name) {
            Ok(bytes) => {
                let text = String::from_utf8(bytes).map_err(|_| LoadError::NotUtf8(name.clone()))?;
                texts.push((name.as_str(), text));
            },
            Err(ContentError::NotFound(_)) => warn!("pattern file {name} not found, skipping"),
            Err(e) => return Err(e.into()),
        }
    }

    let rules = RuleSet::parse(texts.iter().map(|(name, text)| (*name, text.as_str())))?;
    debug!("loaded {} rule(s) from {} pattern file(s)", rules.len(), texts.len());
    Ok(rules)
}

/// Load the rules, then validate `paths`
///
/// A malformed pattern file fails the whole run and no file is validated.
pub fn run<S>(
    pattern_files: &[String],
    mandatory: &MandatorySet,
    paths: &[String],
    source: &S,
) -> Result<Verdict, LoadError>
where
    S: ContentSource + ?Sized,
{
    let rules = load_rules(pattern_files, source)?;
    Ok(validate(paths, &rules, mandatory, source))
}

/// Validate every path, keeping input order
#[must_use]
pub fn validate<S>(
    paths: &[String],
    rules: &RuleSet,
    mandatory: &MandatorySet,
    source: &S,
) -> Verdict
where
    S: ContentSource + ?Sized,
{
    let files: Vec<FileVerdict> =
        paths.iter().map(|path| validate_file(path, rules, mandatory, source)).collect();
    let verdict = Verdict { files };

    debug!(
        "checked {} file(s): {} violation(s) in {} file(s)",
        verdict.files.len(),
        verdict.violation_count(),
        verdict.failed_files().count()
    );
    verdict
}

/// Validate a single path
#[must_use]
pub fn validate_file<S>(
    path: &str,
    rules: &RuleSet,
    mandatory: &MandatorySet,
    source: &S,
) -> FileVerdict
where
    S: ContentSource + ?Sized,
{
    let attributes = rules.resolve(path);
    debug!("{path}: {} effective attribute(s)", attributes.len());

    let mut violations: Vec<Violation> = mandatory
        .iter()
        .filter(|kind| !attributes.contains(*kind))
        .map(Violation::mandatory_missing)
        .collect();

    let encoding = attributes.encoding();
    let mut content: Option<Result<Vec<u8>, ContentError>> = None;

    for attribute in attributes.attributes() {
        if !validators::needs_content(attribute, encoding) {
            continue;
        }
        match content.get_or_insert_with(|| source.read(path)) {
            Ok(bytes) => {
                if let Err(reason) = validators::validate(attribute, bytes, encoding) {
                    violations.push(Violation::mismatch(attribute, reason));
                }
            },
            Err(e) => violations.push(Violation::content_unavailable(attribute, &*e)),
        }
    }

    FileVerdict {
        path: path.to_string(),
        attributes,
        violations,
    }
}
