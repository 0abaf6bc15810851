//! Path pattern compilation - ignore-file matching semantics
//!
//! This module contains pure matching logic with no I/O dependencies.
//!
//! Every pattern kind compiles to a single regular expression matched against
//! a normalized repository-relative path (forward slashes, no leading `./`):
//!
//! - `relglob` - `*.cpp` matches `a.cpp` and `src/a.cpp`
//! - `rootglob` - `src/*.cpp` matches only below the root `src/`
//! - `relre` - the expression is searched anywhere in the path
//! - `path` - `src/io` matches `src/io` and everything below it
//!
//! Globs that match a directory also match every file beneath it.

use regex::Regex;
use thiserror::Error;

use crate::core::models::{PathPattern, PatternKind};

/// Errors that can occur when compiling a pattern
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// Pattern text was empty
    #[error("empty pattern")]
    Empty,

    /// Glob did not translate to a valid expression
    #[error("invalid glob pattern {pattern}: {message}")]
    InvalidGlob {
        /// Pattern as written
        pattern: String,
        /// Compiler message
        message: String,
    },

    /// Regular expression did not compile
    #[error("invalid regular expression {pattern}: {message}")]
    InvalidRegex {
        /// Pattern as written
        pattern: String,
        /// Compiler message
        message: String,
    },
}

/// Compile a pattern of the given kind
pub fn compile(kind: PatternKind, pattern: &str) -> Result<PathPattern, PatternError> {
    if pattern.is_empty() {
        return Err(PatternError::Empty);
    }

    let (source, is_glob) = match kind {
        PatternKind::RelGlob => (format!("^(?:|.*/){}(?:/|$)", glob_to_regex(pattern)), true),
        PatternKind::RootGlob => (format!("^{}(?:/|$)", glob_to_regex(pattern)), true),
        PatternKind::RelRegex => (pattern.to_string(), false),
        PatternKind::Path => (path_to_regex(pattern), false),
    };

    let regex = Regex::new(&source).map_err(|e| {
        if is_glob {
            PatternError::InvalidGlob {
                pattern: pattern.to_string(),
                message: e.to_string(),
            }
        } else {
            PatternError::InvalidRegex {
                pattern: pattern.to_string(),
                message: e.to_string(),
            }
        }
    })?;

    Ok(PathPattern::from_parts(pattern.to_string(), kind, regex))
}

/// Normalize a path for matching: forward slashes, no leading `./` or `/`
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    let mut rest = path.as_str();
    loop {
        if let Some(stripped) = rest.strip_prefix("./") {
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix('/') {
            rest = stripped;
        } else {
            break;
        }
    }
    rest.to_string()
}

fn path_to_regex(path: &str) -> String {
    let path = normalize_path(path);
    let path = path.trim_end_matches('/');
    if path.is_empty() || path == "." {
        return "^".to_string();
    }
    format!("^{}(?:/|$)", regex::escape(path))
}

/// Translate a glob to an unanchored regex fragment
///
/// `*` stays within one path segment, `**` crosses segments, `**/` also
/// matches zero directories, `?` is one non-separator character, `[...]` is a
/// character class (`[!...]` negates), `{a,b}` is an alternation and `\`
/// escapes the next character.
fn glob_to_regex(glob: &str) -> String {
    let chars: Vec<char> = glob.chars().collect();
    let mut regex = String::with_capacity(glob.len() * 2);
    let mut groups = 0usize;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        i += 1;
        match c {
            '*' => {
                if chars.get(i) == Some(&'*') {
                    i += 1;
                    if chars.get(i) == Some(&'/') {
                        i += 1;
                        regex.push_str("(?:.*/)?");
                    } else {
                        regex.push_str(".*");
                    }
                } else {
                    regex.push_str("[^/]*");
                }
            },
            '?' => regex.push_str("[^/]"),
            '[' => {
                let mut j = i;
                if chars.get(j) == Some(&'!') {
                    j += 1;
                }
                // A `]` right after `[` or `[!` is part of the class
                if chars.get(j) == Some(&']') {
                    j += 1;
                }
                while j < chars.len() && chars[j] != ']' {
                    j += 1;
                }
                if j >= chars.len() {
                    // No closing bracket: literal
                    regex.push_str("\\[");
                } else {
                    regex.push('[');
                    regex.push_str(&class_body(&chars[i..j]));
                    regex.push(']');
                    i = j + 1;
                }
            },
            '{' => {
                groups += 1;
                regex.push_str("(?:");
            },
            '}' if groups > 0 => {
                groups -= 1;
                regex.push(')');
            },
            ',' if groups > 0 => regex.push('|'),
            '\\' => match chars.get(i) {
                Some(&next) => {
                    i += 1;
                    push_literal(&mut regex, next);
                },
                None => push_literal(&mut regex, c),
            },
            c => push_literal(&mut regex, c),
        }
    }

    regex
}

fn class_body(body: &[char]) -> String {
    let mut out = String::with_capacity(body.len() + 1);
    for (idx, &c) in body.iter().enumerate() {
        match c {
            '!' if idx == 0 => out.push('^'),
            '^' if idx == 0 => out.push_str("\\^"),
            '\\' | '[' | ']' | '&' | '~' => {
                out.push('\\');
                out.push(c);
            },
            c => out.push(c),
        }
    }
    out
}

fn push_literal(regex: &mut String, c: char) {
    let mut buf = [0u8; 4];
    regex.push_str(&regex::escape(c.encode_utf8(&mut buf)));
}
