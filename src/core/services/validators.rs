//! Attribute validators - one pure check per attribute kind
//!
//! Every validator takes the declared value, the raw file bytes and the
//! resolved encoding (validators other than `encoding` interpret the content
//! through it) and returns `Err(reason)` on a mismatch.

use crate::core::models::{Attribute, Bom, TextEncoding};

/// Result of a single validator
pub type Outcome = Result<(), String>;

/// Encoding assumed by the BMP check when none is declared
pub const DEFAULT_ENCODING: TextEncoding = TextEncoding::Utf8 { sig: false };

/// Whether validating `attribute` needs the file content at all
#[must_use]
pub fn needs_content(attribute: &Attribute, encoding: Option<TextEncoding>) -> bool {
    match attribute {
        Attribute::Encoding(TextEncoding::Binary) => false,
        Attribute::Mimetype(mime) => is_text(mime) && encoding != Some(TextEncoding::Binary),
        Attribute::Encoding(_) | Attribute::Bom(_) | Attribute::Bmp => true,
    }
}

/// Run the validator for `attribute`
pub fn validate(attribute: &Attribute, content: &[u8], encoding: Option<TextEncoding>) -> Outcome {
    match attribute {
        Attribute::Encoding(declared) => check_encoding(*declared, content),
        Attribute::Mimetype(mime) => check_mimetype(mime, content, encoding),
        Attribute::Bom(expected) => check_bom(*expected, content, encoding),
        Attribute::Bmp => check_bmp(content, encoding),
    }
}

/// The content must decode without error (`binary` always passes)
pub fn check_encoding(encoding: TextEncoding, content: &[u8]) -> Outcome {
    if encoding == TextEncoding::Binary {
        return Ok(());
    }
    encoding
        .validate(content)
        .map_err(|e| format!("content is not valid {encoding}: {e}"))
}

/// `text/*` content must be printable apart from tab, newline and carriage return
///
/// Without a declared encoding (or with ASCII) bytes are checked directly;
/// other encodings are decoded first. Content that does not decode is left to
/// the encoding check.
pub fn check_mimetype(mime: &str, content: &[u8], encoding: Option<TextEncoding>) -> Outcome {
    if !is_text(mime) {
        return Ok(());
    }

    match encoding {
        Some(TextEncoding::Binary) => Ok(()),
        None | Some(TextEncoding::Ascii) => content
            .iter()
            .position(|&b| b < 0x20 && !matches!(b, b'\t' | b'\n' | b'\r'))
            .map_or(Ok(()), |offset| {
                Err(format!(
                    "non-printable byte 0x{:02x} at byte offset {offset}",
                    content[offset]
                ))
            }),
        Some(encoding) => {
            if encoding.validate(content).is_err() {
                return Ok(());
            }
            encoding
                .chars(content)
                .map_while(Result::ok)
                .find(|(_, c)| !is_printable(*c))
                .map_or(Ok(()), |(offset, c)| {
                    Err(format!(
                        "non-printable character U+{:04X} at byte offset {offset}",
                        u32::from(c)
                    ))
                })
        },
    }
}

/// A byte order mark must be present (`true`) or absent (`false`)
///
/// With a declared Unicode encoding only that encoding's mark is accepted.
pub fn check_bom(expected: bool, content: &[u8], encoding: Option<TextEncoding>) -> Outcome {
    if !expected {
        return Bom::detect(content)
            .map_or(Ok(()), |bom| Err(format!("unexpected {bom} byte order mark")));
    }

    match encoding {
        None => Bom::detect(content)
            .map(|_| ())
            .ok_or_else(|| "missing byte order mark".to_string()),
        Some(encoding) if encoding.is_unicode() => {
            if !encoding.expected_boms().iter().any(|bom| bom.is_present(content)) {
                return Err(format!("invalid or missing {encoding} byte order mark"));
            }
            // UTF-16 marks are prefixes of the UTF-32 ones
            if matches!(encoding, TextEncoding::Utf16(_))
                && (Bom::Utf32Le.is_present(content) || Bom::Utf32Be.is_present(content))
            {
                return Err("invalid (32-bit) byte order mark".to_string());
            }
            Ok(())
        },
        Some(encoding) => Err(format!("a byte order mark requires a Unicode encoding, not {encoding}")),
    }
}

/// Every code point must lie in the Basic Multilingual Plane
pub fn check_bmp(content: &[u8], encoding: Option<TextEncoding>) -> Outcome {
    let encoding = encoding.unwrap_or(DEFAULT_ENCODING);
    if encoding == TextEncoding::Binary {
        return Err("BMP check requires a text encoding, not binary".to_string());
    }

    encoding
        .validate(content)
        .map_err(|e| format!("cannot check BMP, content is not valid {encoding}: {e}"))?;

    encoding
        .chars(content)
        .map_while(Result::ok)
        .find(|(_, c)| u32::from(*c) > 0xFFFF)
        .map_or(Ok(()), |(offset, c)| {
            Err(format!(
                "code point U+{:X} outside the Basic Multilingual Plane at byte offset {offset}",
                u32::from(c)
            ))
        })
}

fn is_text(mime: &str) -> bool {
    mime.starts_with("text/")
}

fn is_printable(c: char) -> bool {
    matches!(u32::from(c), 0x09 | 0x0A | 0x0D | 0x20..=0x7E) || u32::from(c) > 0x9F
}
