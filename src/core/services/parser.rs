//! Pattern file parser
//!
//! Turns `.hgmeta`-style text into an ordered list of [`Rule`]s:
//!
//! ```text
//! syntax: glob
//!
//! checks: encoding(ascii) mimetype(text/plain)
//! *.h
//! *.cpp
//! checks: encoding(utf-8) mimetype(text/x-java-source) bom(true)
//! relre:.*\.java
//! ```
//!
//! Each file starts in `glob` mode with an empty check set. A `checks:` line
//! replaces the check set for every pattern line below it. Any malformed line
//! fails the whole parse; no partial rule list is ever returned.

use log::debug;
use thiserror::Error;

use super::matcher::{self, PatternError};
use crate::core::models::{Attribute, PatternKind, Rule, RuleOrigin, SyntaxMode, TextEncoding};

/// What was wrong with a pattern file line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// `syntax:` named an unknown mode
    #[error("invalid syntax: '{0}'. Use: glob, regex")]
    InvalidSyntax(String),

    /// `checks:` named an unknown attribute
    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),

    /// Attribute called with the wrong number of arguments
    #[error("{name} expects {expected}, got {found} argument(s)")]
    Arity {
        /// Attribute name
        name: String,
        /// Description of the accepted arity
        expected: &'static str,
        /// Number of arguments given
        found: usize,
    },

    /// Argument is not a boolean
    #[error("{name}: invalid boolean '{value}'")]
    InvalidBoolean {
        /// Attribute name
        name: String,
        /// Argument as written
        value: String,
    },

    /// `encoding(...)` named an unknown encoding
    #[error("unknown encoding: {0}")]
    UnknownEncoding(String),

    /// `mimetype(...)` is not `type/subtype`
    #[error("invalid mime type: '{0}'")]
    InvalidMimeType(String),

    /// `checks:` content is not a sequence of `name(value)` calls
    #[error("malformed check: '{0}'")]
    MalformedChecks(String),

    /// Pattern line has an unknown `prefix:`
    #[error("unknown pattern syntax: '{0}:'")]
    UnknownPatternPrefix(String),

    /// Pattern did not compile
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

/// A pattern file could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{file}:{line}: {kind}")]
pub struct ParseError {
    /// Pattern file name
    pub file: String,
    /// 1-based line number
    pub line: usize,
    /// What went wrong
    pub kind: ParseErrorKind,
}

/// Parser state threaded through one file
#[derive(Debug, Default)]
struct FileState {
    syntax: SyntaxMode,
    checks: Vec<Attribute>,
}

/// Parse several pattern files, concatenating their rules in the given order
///
/// Each `(name, text)` pair is parsed independently (syntax mode and check set
/// reset at every file boundary).
pub fn parse_pattern_files<'a, I>(files: I) -> Result<Vec<Rule>, ParseError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut rules = Vec::new();
    for (name, text) in files {
        rules.extend(parse_pattern_file(name, text)?);
    }
    Ok(rules)
}

/// Parse a single pattern file
pub fn parse_pattern_file(name: &str, text: &str) -> Result<Vec<Rule>, ParseError> {
    let mut state = FileState::default();
    let mut rules = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let error = |kind| ParseError {
            file: name.to_string(),
            line: index + 1,
            kind,
        };

        let line = strip_comment(raw);
        if line.is_empty() {
            continue;
        }

        if let Some(mode) = line.strip_prefix("syntax:") {
            state.syntax = SyntaxMode::from_directive(mode)
                .ok_or_else(|| error(ParseErrorKind::InvalidSyntax(mode.trim().to_string())))?;
        } else if let Some(calls) = line.strip_prefix("checks:") {
            state.checks = parse_checks(calls).map_err(error)?;
        } else {
            let (kind, pattern) = split_pattern(&line, state.syntax).map_err(error)?;
            let pattern = matcher::compile(kind, pattern).map_err(|e| error(e.into()))?;
            rules.push(Rule {
                syntax: state.syntax,
                checks: state.checks.clone(),
                pattern,
                origin: RuleOrigin {
                    file: name.to_string(),
                    line: index + 1,
                },
            });
        }
    }

    debug!("parsed {} rule(s) from {name}", rules.len());
    Ok(rules)
}

/// Parse the body of a `checks:` line into attributes
///
/// The body is a whitespace-separated sequence of `name(value)` calls. An empty
/// body is valid and yields no attributes.
pub fn parse_checks(calls: &str) -> Result<Vec<Attribute>, ParseErrorKind> {
    let mut attributes = Vec::new();
    let mut rest = calls.trim_start();

    while !rest.is_empty() {
        let open = rest
            .find('(')
            .ok_or_else(|| ParseErrorKind::MalformedChecks(rest.to_string()))?;
        let name = &rest[..open];
        if name.is_empty() || name.contains(char::is_whitespace) || name.contains(')') {
            return Err(ParseErrorKind::MalformedChecks(first_token(rest).to_string()));
        }

        let close = rest[open..]
            .find(')')
            .map(|pos| open + pos)
            .ok_or_else(|| ParseErrorKind::MalformedChecks(rest.to_string()))?;
        let args = split_args(&rest[open + 1..close]);
        attributes.push(parse_check(name, &args)?);

        rest = rest[close + 1..].trim_start();
    }

    Ok(attributes)
}

/// Build an attribute from its name and arguments
pub fn parse_check(name: &str, args: &[&str]) -> Result<Attribute, ParseErrorKind> {
    let single = |expected| match args {
        [value] => Ok(*value),
        _ => Err(ParseErrorKind::Arity {
            name: name.to_string(),
            expected,
            found: args.len(),
        }),
    };

    match name {
        "encoding" => {
            let label = single("one encoding name")?;
            TextEncoding::from_label(label)
                .map(Attribute::Encoding)
                .ok_or_else(|| ParseErrorKind::UnknownEncoding(label.to_string()))
        },
        "mimetype" => {
            let mime = single("one mime type")?;
            match mime.split_once('/') {
                Some((kind, sub)) if !kind.is_empty() && !sub.is_empty() && !sub.contains('/') => {
                    Ok(Attribute::Mimetype(mime.to_lowercase()))
                },
                _ => Err(ParseErrorKind::InvalidMimeType(mime.to_string())),
            }
        },
        "bom" => {
            let value = single("one boolean")?;
            parse_bool(value).map(Attribute::Bom).ok_or_else(|| ParseErrorKind::InvalidBoolean {
                name: name.to_string(),
                value: value.to_string(),
            })
        },
        "bmp" => match args {
            [] => Ok(Attribute::Bmp),
            [value] if parse_bool(value) == Some(true) => Ok(Attribute::Bmp),
            [value] => Err(ParseErrorKind::InvalidBoolean {
                name: name.to_string(),
                value: (*value).to_string(),
            }),
            _ => Err(ParseErrorKind::Arity {
                name: name.to_string(),
                expected: "no argument or true",
                found: args.len(),
            }),
        },
        _ => Err(ParseErrorKind::UnknownAttribute(name.to_string())),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "y" | "on" | "1" => Some(true),
        "false" | "no" | "n" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn split_args(args: &str) -> Vec<&str> {
    args.split(',')
        .map(|arg| arg.trim().trim_matches(|c| c == '\'' || c == '"'))
        .filter(|arg| !arg.is_empty())
        .collect()
}

fn first_token(s: &str) -> &str {
    s.split_whitespace().next().unwrap_or(s)
}

/// Split an explicit `prefix:` off a pattern line
fn split_pattern(line: &str, syntax: SyntaxMode) -> Result<(PatternKind, &str), ParseErrorKind> {
    if let Some((prefix, pattern)) = line.split_once(':') {
        if !prefix.is_empty() && prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
            let kind = PatternKind::from_prefix(prefix)
                .ok_or_else(|| ParseErrorKind::UnknownPatternPrefix(prefix.to_string()))?;
            return Ok((kind, pattern));
        }
    }
    Ok((syntax.default_kind(), line))
}

/// Remove an unescaped `#` comment and trailing whitespace, then unescape `\#`
fn strip_comment(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.peek() {
                Some('#') => {
                    out.push('#');
                    chars.next();
                },
                Some('\\') => {
                    out.push_str("\\\\");
                    chars.next();
                },
                _ => out.push('\\'),
            },
            '#' => break,
            c => out.push(c),
        }
    }

    out.truncate(out.trim_end().len());
    out
}
