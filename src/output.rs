//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use std::fmt::Write as _;

use colored::Colorize;
use serde::Serialize;

use crate::core::models::{EffectiveAttributes, FileVerdict, Rule, Verdict};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Result of a check run
#[derive(Debug, Serialize)]
pub struct CheckReport<'a> {
    /// Whether every file passed
    pub passed: bool,
    /// Number of files checked
    pub files_checked: usize,
    /// Total number of violations
    pub violation_count: usize,
    /// Files with violations, in input order
    pub failed: Vec<&'a FileVerdict>,
}

impl<'a> CheckReport<'a> {
    /// Summarise a verdict
    #[must_use]
    pub fn new(verdict: &'a Verdict) -> Self {
        Self {
            passed: verdict.passed(),
            files_checked: verdict.files.len(),
            violation_count: verdict.violation_count(),
            failed: verdict.failed_files().collect(),
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => print!("{}", self.to_human()),
            OutputMode::Json => render_json(self),
        }
    }

    /// Human-readable text: one line per violation, then a summary
    #[must_use]
    pub fn to_human(&self) -> String {
        let mut out = String::new();
        if self.files_checked == 0 {
            out.push_str("No files to check.\n");
            return out;
        }

        for file in &self.failed {
            for violation in &file.violations {
                let _ = writeln!(out, "{}: {violation}", file.path);
            }
        }

        if self.passed {
            let _ = writeln!(
                out,
                "{} {} file(s) checked, all meta checks passed.",
                "OK:".green().bold(),
                self.files_checked
            );
        } else {
            let _ = writeln!(
                out,
                "\n{} {} violation(s) in {} of {} file(s)",
                "REJECTED:".red().bold(),
                self.violation_count,
                self.failed.len(),
                self.files_checked
            );
        }
        out
    }
}

/// Effective attributes of one path
#[derive(Debug, Serialize)]
pub struct AttrsEntry {
    /// Path as given
    pub path: String,
    /// Resolved attributes with their origin
    pub attributes: EffectiveAttributes,
}

/// Result of an `attrs` query
#[derive(Debug, Serialize)]
pub struct AttrsReport {
    /// One entry per requested path
    pub entries: Vec<AttrsEntry>,
}

impl AttrsReport {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => print!("{}", self.to_human()),
            OutputMode::Json => render_json(self),
        }
    }

    /// Human-readable text: each path followed by its attributes
    #[must_use]
    pub fn to_human(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            let _ = writeln!(out, "{}", entry.path.bold());
            if entry.attributes.is_empty() {
                let _ = writeln!(out, "  (no attributes)");
            }
            for assignment in entry.attributes.iter() {
                let attribute = assignment.attribute.to_string();
                let _ = writeln!(out, "  {attribute:<24} {}", assignment.origin);
            }
        }
        out
    }
}

/// Result of a `rules` listing
#[derive(Debug, Serialize)]
pub struct RulesReport<'a> {
    /// Pattern files that were read
    pub pattern_files: Vec<String>,
    /// Rules in declaration order
    pub rules: &'a [Rule],
}

impl RulesReport<'_> {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => print!("{}", self.to_human()),
            OutputMode::Json => render_json(self),
        }
    }

    /// Human-readable text: one line per rule
    #[must_use]
    pub fn to_human(&self) -> String {
        let mut out = String::new();
        if self.rules.is_empty() {
            out.push_str("No rules found.\n");
            return out;
        }

        for rule in self.rules {
            let checks: Vec<String> = rule.checks.iter().map(ToString::to_string).collect();
            let checks = if checks.is_empty() { "(none)".to_string() } else { checks.join(" ") };
            let (origin, pattern) = (rule.origin.to_string(), rule.pattern.to_string());
            let _ = writeln!(out, "{origin:<16} {pattern:<28} {checks}");
        }
        let _ = writeln!(out, "\n{} rule(s)", self.rules.len());
        out
    }
}

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

impl OperationResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => println!("{}", self.message),
            OutputMode::Json => render_json(self),
        }
    }
}

fn render_json<T: Serialize>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}
