//! Shared test fixtures and helpers
//!
//! This module provides common utilities for testing checkmeta components.

use checkmeta::core::models::{Attribute, MandatorySet, TextEncoding, Verdict};
use checkmeta::core::ports::MemoryContent;
use checkmeta::core::services::{RuleSet, validate};

/// Parse a single `.hgmeta` text, panicking on error
pub fn rules(text: &str) -> RuleSet {
    RuleSet::parse([(".hgmeta", text)]).expect("pattern file should parse")
}

/// Owned path list
pub fn paths(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

/// Validate `files` (path, content) against `text` with an optional mandatory list
pub fn check(text: &str, mandatory: &str, files: &[(&str, &[u8])]) -> Verdict {
    let mut source = MemoryContent::new();
    for (path, content) in files {
        source.insert(*path, content.to_vec());
    }
    let names: Vec<&str> = files.iter().map(|(path, _)| *path).collect();
    let mandatory = MandatorySet::parse(mandatory).expect("mandatory list should parse");
    validate(&paths(&names), &rules(text), &mandatory, &source)
}

/// Shorthand for `encoding(...)`
pub fn encoding(label: &str) -> Attribute {
    Attribute::Encoding(TextEncoding::from_label(label).expect("known encoding"))
}
