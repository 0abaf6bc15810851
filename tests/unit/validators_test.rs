//! Tests for the attribute validators

use checkmeta::core::models::{Attribute, Bom, TextEncoding};
use checkmeta::core::services::validators::{check_bmp, check_bom, check_mimetype, needs_content, validate};

const UTF8: Option<TextEncoding> = Some(TextEncoding::Utf8 { sig: false });

#[test]
fn test_bom_false_rejects_utf8_bom() {
    let content = b"\xEF\xBB\xBFhello\n";
    assert!(validate(&Attribute::Bom(false), content, None).is_err());
    assert!(validate(&Attribute::Bom(true), content, None).is_ok());
}

#[test]
fn test_bom_true_rejects_missing() {
    assert!(check_bom(true, b"", UTF8).is_err());
    assert!(check_bom(true, b"", None).is_err());
}

#[test]
fn test_bom_detection_prefers_utf32() {
    assert_eq!(Bom::detect(Bom::Utf32Le.bytes()), Some(Bom::Utf32Le));
    assert_eq!(Bom::detect(Bom::Utf16Le.bytes()), Some(Bom::Utf16Le));
    assert_eq!(Bom::detect(b"plain"), None);
}

#[test]
fn test_text_mimetype_rejects_nul() {
    assert!(check_mimetype("text/plain", b"abc\x00def", None).is_err());
    assert!(check_mimetype("text/plain", b"line one\nline two\r\n\ttab\n", None).is_ok());
}

#[test]
fn test_non_text_mimetype_is_declarative() {
    assert!(check_mimetype("application/octet-stream", b"\x00\x01\x02", None).is_ok());
    assert!(!needs_content(&Attribute::Mimetype("image/png".into()), None));
}

#[test]
fn test_bmp_cites_offset() {
    let content = "\u{e4}x\u{1F600}".as_bytes();
    let reason = check_bmp(content, UTF8).unwrap_err();
    // U+00E4 is two bytes, x is one
    assert!(reason.contains("byte offset 3"), "{reason}");
    assert!(check_bmp("all \u{e4} bmp \u{ffff}".as_bytes(), UTF8).is_ok());
}

#[test]
fn test_bmp_in_utf16() {
    let utf16: Vec<u8> = "a\u{10400}".encode_utf16().flat_map(u16::to_le_bytes).collect();
    let encoding = TextEncoding::from_label("utf-16le");
    let reason = check_bmp(&utf16, encoding).unwrap_err();
    assert!(reason.contains("byte offset 2"), "{reason}");
}

#[test]
fn test_legacy_encoding_validates() {
    let latin1 = TextEncoding::from_label("latin1").unwrap();
    assert!(validate(&Attribute::Encoding(latin1), b"caf\xe9", None).is_ok());
    let shift_jis = TextEncoding::from_label("shift_jis").unwrap();
    assert!(validate(&Attribute::Encoding(shift_jis), b"\x82", None).is_err());
}

#[test]
fn test_large_content_validates() {
    let content = vec![b'a'; 8 << 20];
    let utf8 = TextEncoding::Utf8 { sig: false };
    assert!(validate(&Attribute::Encoding(utf8), &content, None).is_ok());
    assert!(validate(&Attribute::Bmp, &content, Some(utf8)).is_ok());
    assert!(check_mimetype("text/plain", &content, Some(utf8)).is_ok());
}

#[test]
fn test_bmp_reports_decode_error_before_scanning() {
    // The supplementary character comes first, the broken byte later
    let content = "\u{1F600}ok\u{FF}".as_bytes();
    let mut content = content.to_vec();
    content.push(0xFF);
    let reason = check_bmp(&content, UTF8).unwrap_err();
    assert!(reason.starts_with("cannot check BMP"), "{reason}");
}

#[test]
fn test_mimetype_skips_content_that_fails_late() {
    let mut content = b"\x01".to_vec();
    content.push(0xFF);
    assert!(check_mimetype("text/plain", &content, UTF8).is_ok());
    assert!(check_mimetype("text/plain", b"\x01", UTF8).is_err());
}
