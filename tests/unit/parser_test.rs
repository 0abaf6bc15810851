//! Tests for pattern file parsing

use checkmeta::core::models::{Attribute, AttributeKind, PatternKind, SyntaxMode, TextEncoding};
use checkmeta::core::services::{ParseErrorKind, PatternError, parse_pattern_file, parse_pattern_files};

const SAMPLE: &str = r"# meta rules for the project
syntax: glob

checks: encoding(ascii) mimetype(text/plain)
*.h
*.cpp
checks: encoding(utf-8) mimetype(text/x-java-source) bom(true)
relre:.*\.java
checks: encoding(binary) mimetype(image/png)
rootglob:doc/*.png   # only top-level doc images
";

#[test]
fn test_parse_sample_file() {
    let rules = parse_pattern_file(".hgmeta", SAMPLE).unwrap();
    assert_eq!(rules.len(), 4);

    let patterns: Vec<String> = rules.iter().map(|r| r.pattern.to_string()).collect();
    assert_eq!(patterns, vec!["relglob:*.h", "relglob:*.cpp", "relre:.*\\.java", "rootglob:doc/*.png"]);

    assert_eq!(rules[0].checks, rules[1].checks);
    assert_eq!(rules[2].checks.len(), 3);
    assert!(rules[2].checks.contains(&Attribute::Bom(true)));
    assert_eq!(rules[3].checks[0], Attribute::Encoding(TextEncoding::Binary));
}

#[test]
fn test_rule_lines_are_recorded() {
    let rules = parse_pattern_file(".hgmeta", SAMPLE).unwrap();
    let lines: Vec<usize> = rules.iter().map(|r| r.origin.line).collect();
    assert_eq!(lines, vec![5, 6, 8, 10]);
}

#[test]
fn test_glob_with_colon_in_class_is_not_a_prefix() {
    let rules = parse_pattern_file("m", "dir/[a-z:]*.cpp\n").unwrap();
    assert_eq!(rules[0].pattern.kind(), PatternKind::RelGlob);
    assert!(rules[0].matches("dir/x.cpp"));
    assert!(rules[0].matches("dir/:x.cpp"));
}

#[test]
fn test_local_prefix_overrides_syntax() {
    let rules = parse_pattern_file("m", "re:file\\.cpp\nrelre:other\n").unwrap();
    assert!(rules.iter().all(|r| r.pattern.kind() == PatternKind::RelRegex));
    assert!(rules.iter().all(|r| r.syntax == SyntaxMode::Glob));
}

#[test]
fn test_rules_before_any_checks_line_have_no_checks() {
    let rules = parse_pattern_file("m", "*.txt\nchecks: bom(false)\n*.c\n").unwrap();
    assert!(rules[0].checks.is_empty());
    assert_eq!(rules[1].checks, vec![Attribute::Bom(false)]);
}

#[test]
fn test_empty_checks_line_clears_set() {
    let rules = parse_pattern_file("m", "checks: bom(false)\n*.c\nchecks:\n*.h\n").unwrap();
    assert!(rules[1].checks.is_empty());
}

#[test]
fn test_unknown_attribute_aborts() {
    let err = parse_pattern_file("m", "checks: unknownattr(x)\n*\n").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnknownAttribute("unknownattr".into()));
    assert_eq!(err.to_string(), "m:1: unknown attribute: unknownattr");
}

#[test]
fn test_invalid_regex_reports_pattern_error() {
    let err = parse_pattern_file("m", "syntax: regexp\n(unclosed\n").unwrap_err();
    assert_eq!(err.line, 2);
    assert!(matches!(err.kind, ParseErrorKind::Pattern(PatternError::InvalidRegex { .. })));
}

#[test]
fn test_multiple_files_keep_order() {
    let rules = parse_pattern_files([
        ("first", "checks: encoding(ascii)\n*.c\n"),
        ("second", "checks: encoding(utf-8)\n*.c\n"),
    ])
    .unwrap();
    let files: Vec<&str> = rules.iter().map(|r| r.origin.file.as_str()).collect();
    assert_eq!(files, vec!["first", "second"]);
    assert_eq!(rules[1].checks[0].kind(), AttributeKind::Encoding);
}

#[test]
fn test_crlf_line_endings() {
    let rules = parse_pattern_file("m", "checks: bom(false)\r\n*.c\r\n").unwrap();
    assert_eq!(rules.len(), 1);
    assert!(rules[0].matches("a.c"));
}

#[test]
fn test_regex_syntax_spellings() {
    for mode in ["re", "regex", "regexp", "relre"] {
        let rules = parse_pattern_file("m", &format!("syntax: {mode}\n\\.c$\n")).unwrap();
        assert_eq!(rules[0].syntax, SyntaxMode::Regex, "syntax: {mode}");
        assert!(rules[0].matches("src/a.c"));
    }
}
