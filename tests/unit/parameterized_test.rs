//! Parameterized tests using test-case
//!
//! These tests use test-case to run the same test logic with different inputs.

use checkmeta::core::models::{Attribute, AttributeKind, Endian, PatternKind, TextEncoding};
use checkmeta::core::services::parser::parse_checks;
use checkmeta::core::services::validators::check_bom;
use checkmeta::core::services::{compile, normalize_path};
use test_case::test_case;

// =============================================================================
// Encoding Label Tests
// =============================================================================

#[test_case("binary", TextEncoding::Binary ; "binary")]
#[test_case("ascii", TextEncoding::Ascii ; "ascii")]
#[test_case("us-ascii", TextEncoding::Ascii ; "us ascii")]
#[test_case("utf-8", TextEncoding::Utf8 { sig: false } ; "utf8 dashed")]
#[test_case("UTF8", TextEncoding::Utf8 { sig: false } ; "utf8 upper")]
#[test_case("utf_8_sig", TextEncoding::Utf8 { sig: true } ; "utf8 sig")]
#[test_case("utf-16", TextEncoding::Utf16(None) ; "utf16 any endian")]
#[test_case("utf-16le", TextEncoding::Utf16(Some(Endian::Little)) ; "utf16 little")]
#[test_case("utf-32be", TextEncoding::Utf32(Some(Endian::Big)) ; "utf32 big")]
fn test_encoding_labels(label: &str, expected: TextEncoding) {
    assert_eq!(TextEncoding::from_label(label), Some(expected));
}

#[test_case("latin1" ; "latin1")]
#[test_case("iso-8859-2" ; "iso 8859 2")]
#[test_case("cp1251" ; "cp1251")]
#[test_case("shift_jis" ; "shift jis")]
#[test_case("latin-1" ; "latin dashed")]
#[test_case("latin_1" ; "latin underscored")]
#[test_case("iso8859_15" ; "iso 8859 15 underscored")]
#[test_case("ISO_8859-2" ; "iso 8859 2 mixed separators")]
fn test_legacy_labels_are_known(label: &str) {
    assert!(matches!(TextEncoding::from_label(label), Some(TextEncoding::Legacy(_))));
}

#[test_case("latin-1", "windows-1252" ; "latin dashed")]
#[test_case("latin_1", "windows-1252" ; "latin underscored")]
#[test_case("iso8859_15", "iso-8859-15" ; "iso 8859 15")]
fn test_legacy_label_spellings(label: &str, expected: &str) {
    let encoding = TextEncoding::from_label(label).unwrap();
    assert_eq!(encoding.to_string(), expected);
    let rules = parse_checks(&format!("encoding({label})")).unwrap();
    assert_eq!(rules, vec![Attribute::Encoding(encoding)]);
}

// =============================================================================
// Check Argument Tests
// =============================================================================

#[test_case("bom(true)", Attribute::Bom(true) ; "true")]
#[test_case("bom(yes)", Attribute::Bom(true) ; "yes")]
#[test_case("bom(On)", Attribute::Bom(true) ; "on mixed case")]
#[test_case("bom(1)", Attribute::Bom(true) ; "one")]
#[test_case("bom(false)", Attribute::Bom(false) ; "false")]
#[test_case("bom(no)", Attribute::Bom(false) ; "no")]
#[test_case("bom('0')", Attribute::Bom(false) ; "quoted zero")]
#[test_case("bmp()", Attribute::Bmp ; "bmp without argument")]
#[test_case("mimetype(Text/Plain)", Attribute::Mimetype("text/plain".into()) ; "mime lowercased")]
fn test_single_check(text: &str, expected: Attribute) {
    assert_eq!(parse_checks(text).unwrap(), vec![expected]);
}

#[test_case("encoding" ; "encoding")]
#[test_case("mimetype" ; "mimetype")]
#[test_case("bom" ; "bom")]
#[test_case("bmp" ; "bmp")]
fn test_kind_names_round_trip(name: &str) {
    let kind: AttributeKind = name.parse().unwrap();
    assert_eq!(kind.name(), name);
}

// =============================================================================
// Matcher Tests
// =============================================================================

#[test_case(PatternKind::RelGlob, "*", "any.file", true ; "wildcard matches anything")]
#[test_case(PatternKind::RelGlob, "*.rs", "src/main.rs", true ; "extension matches nested")]
#[test_case(PatternKind::RelGlob, "*.rs", "main.py", false ; "extension rejects different")]
#[test_case(PatternKind::RelGlob, "src/*.rs", "src/sub/main.rs", false ; "star stays in segment")]
#[test_case(PatternKind::RelGlob, "src/**/*.rs", "src/a/b/main.rs", true ; "double star crosses segments")]
#[test_case(PatternKind::RelGlob, "docs", "docs/guide/intro.md", true ; "directory glob covers contents")]
#[test_case(PatternKind::RootGlob, "*.md", "docs/intro.md", false ; "rootglob anchored")]
#[test_case(PatternKind::RootGlob, "*.md", "README.md", true ; "rootglob top level")]
#[test_case(PatternKind::RelRegex, "\\.java$", "src/A.java", true ; "regex searched")]
#[test_case(PatternKind::RelRegex, "^lib/", "src/lib/a.c", false ; "regex anchor respected")]
#[test_case(PatternKind::Path, "src/io", "src/io/mod.rs", true ; "path prefix")]
#[test_case(PatternKind::Path, "src/io", "src/iox", false ; "path is not a string prefix")]
fn test_pattern_matching(kind: PatternKind, pattern: &str, path: &str, expected: bool) {
    let compiled = compile(kind, pattern).unwrap();
    assert_eq!(compiled.matches(&normalize_path(path)), expected, "{kind:?} {pattern:?} {path:?}");
}

// =============================================================================
// BOM Tests
// =============================================================================

#[test_case(b"\xEF\xBB\xBF", "utf-8", true ; "utf8 bom for utf8")]
#[test_case(b"\xFF\xFE", "utf-16", true ; "utf16le bom for utf16")]
#[test_case(b"\xFE\xFF", "utf-16", true ; "utf16be bom for utf16")]
#[test_case(b"\xFF\xFE\x00\x00", "utf-16", false ; "utf32le bom rejected for utf16")]
#[test_case(b"\xFF\xFE\x00\x00", "utf-32", true ; "utf32le bom for utf32")]
#[test_case(b"\x00\x00\xFE\xFF", "utf-32", true ; "utf32be bom for utf32")]
#[test_case(b"\xEF\xBB\xBF", "utf-16", false ; "utf8 bom rejected for utf16")]
#[test_case(b"\xFF\xFE", "utf-8", false ; "utf16 bom rejected for utf8")]
#[test_case(b"", "ascii", false ; "ascii cannot carry a bom")]
fn test_bom_required(content: &[u8], encoding: &str, ok: bool) {
    let encoding = TextEncoding::from_label(encoding);
    assert_eq!(check_bom(true, content, encoding).is_ok(), ok);
}
