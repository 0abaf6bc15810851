//! Text encodings a file can be declared to use
//!
//! ASCII and the Unicode transformation formats are decoded here so that
//! malformed input can be reported with an exact byte offset. Legacy code
//! pages (latin1, iso-8859-x, cp125x, `shift_jis`, ...) are delegated to
//! `encoding_rs`.

use std::fmt;

use encoding_rs::{Decoder, DecoderResult, Encoding};
use thiserror::Error;

/// Error produced when content cannot be decoded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason} at byte offset {offset}")]
pub struct DecodeError {
    /// Byte offset of the first offending sequence
    pub offset: usize,
    /// What went wrong
    pub reason: String,
}

impl DecodeError {
    fn new(offset: usize, reason: impl Into<String>) -> Self {
        Self {
            offset,
            reason: reason.into(),
        }
    }
}

/// Byte order of a multi-byte Unicode encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endian {
    /// Least significant byte first
    Little,
    /// Most significant byte first
    Big,
}

/// A recognised byte order mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bom {
    /// `EF BB BF`
    Utf8,
    /// `FF FE`
    Utf16Le,
    /// `FE FF`
    Utf16Be,
    /// `FF FE 00 00`
    Utf32Le,
    /// `00 00 FE FF`
    Utf32Be,
}

impl Bom {
    /// All marks, ordered so the UTF-32 LE mark is tried before its UTF-16 LE prefix
    pub const ALL: [Self; 5] = [Self::Utf32Le, Self::Utf32Be, Self::Utf8, Self::Utf16Le, Self::Utf16Be];

    /// The raw mark bytes
    #[must_use]
    pub const fn bytes(self) -> &'static [u8] {
        match self {
            Self::Utf8 => &[0xEF, 0xBB, 0xBF],
            Self::Utf16Le => &[0xFF, 0xFE],
            Self::Utf16Be => &[0xFE, 0xFF],
            Self::Utf32Le => &[0xFF, 0xFE, 0x00, 0x00],
            Self::Utf32Be => &[0x00, 0x00, 0xFE, 0xFF],
        }
    }

    /// Whether `content` starts with this mark
    #[must_use]
    pub fn is_present(self, content: &[u8]) -> bool {
        content.starts_with(self.bytes())
    }

    /// Detect the longest mark at the start of `content`
    #[must_use]
    pub fn detect(content: &[u8]) -> Option<Self> {
        Self::ALL.into_iter().find(|bom| bom.is_present(content))
    }
}

impl fmt::Display for Bom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utf8 => write!(f, "UTF-8"),
            Self::Utf16Le => write!(f, "UTF-16LE"),
            Self::Utf16Be => write!(f, "UTF-16BE"),
            Self::Utf32Le => write!(f, "UTF-32LE"),
            Self::Utf32Be => write!(f, "UTF-32BE"),
        }
    }
}

/// A declared file encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    /// No decoding; content is opaque
    Binary,
    /// 7-bit ASCII
    Ascii,
    /// UTF-8; `sig` allows (and strips) a leading BOM
    Utf8 {
        /// `utf-8-sig` variant
        sig: bool,
    },
    /// UTF-16; `None` detects the byte order from the BOM
    Utf16(Option<Endian>),
    /// UTF-32; `None` detects the byte order from the BOM
    Utf32(Option<Endian>),
    /// Any other encoding known to `encoding_rs`
    Legacy(&'static Encoding),
}

impl TextEncoding {
    /// Look up an encoding by name
    ///
    /// Names are compared case-insensitively with `-` and `_` ignored, so
    /// `UTF_8`, `utf-8` and `utf8` are the same encoding. Anything not handled
    /// natively falls back to the WHATWG label table, tried as written, with
    /// `_` read as `-`, and with both removed (`latin_1`, `iso8859_15`).
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        let normalized: String = label
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        let native = match normalized.as_str() {
            "binary" => Some(Self::Binary),
            "ascii" | "usascii" | "646" => Some(Self::Ascii),
            "utf8" | "u8" => Some(Self::Utf8 { sig: false }),
            "utf8sig" => Some(Self::Utf8 { sig: true }),
            "utf16" | "u16" => Some(Self::Utf16(None)),
            "utf16le" => Some(Self::Utf16(Some(Endian::Little))),
            "utf16be" => Some(Self::Utf16(Some(Endian::Big))),
            "utf32" | "u32" => Some(Self::Utf32(None)),
            "utf32le" => Some(Self::Utf32(Some(Endian::Little))),
            "utf32be" => Some(Self::Utf32(Some(Endian::Big))),
            _ => None,
        };
        if native.is_some() {
            return native;
        }

        let dashed = label.replace('_', "-");
        let encoding = [label, dashed.as_str(), normalized.as_str()]
            .into_iter()
            .find_map(|candidate| Encoding::for_label(candidate.as_bytes()))?;
        if encoding == encoding_rs::UTF_8 {
            Some(Self::Utf8 { sig: false })
        } else if encoding == encoding_rs::UTF_16LE {
            Some(Self::Utf16(Some(Endian::Little)))
        } else if encoding == encoding_rs::UTF_16BE {
            Some(Self::Utf16(Some(Endian::Big)))
        } else if encoding == encoding_rs::REPLACEMENT {
            None
        } else {
            Some(Self::Legacy(encoding))
        }
    }

    /// Whether this is one of the Unicode transformation formats
    #[must_use]
    pub const fn is_unicode(self) -> bool {
        matches!(self, Self::Utf8 { .. } | Self::Utf16(_) | Self::Utf32(_))
    }

    /// Byte order marks that are valid for this encoding
    #[must_use]
    pub fn expected_boms(self) -> &'static [Bom] {
        match self {
            Self::Utf8 { .. } => &[Bom::Utf8],
            Self::Utf16(None) => &[Bom::Utf16Le, Bom::Utf16Be],
            Self::Utf16(Some(Endian::Little)) => &[Bom::Utf16Le],
            Self::Utf16(Some(Endian::Big)) => &[Bom::Utf16Be],
            Self::Utf32(None) => &[Bom::Utf32Le, Bom::Utf32Be],
            Self::Utf32(Some(Endian::Little)) => &[Bom::Utf32Le],
            Self::Utf32(Some(Endian::Big)) => &[Bom::Utf32Be],
            Self::Binary | Self::Ascii | Self::Legacy(_) => &[],
        }
    }

    /// Check that `content` decodes, without keeping the decoded text
    pub fn validate(self, content: &[u8]) -> Result<(), DecodeError> {
        match self {
            Self::Ascii => content
                .iter()
                .position(|byte| !byte.is_ascii())
                .map_or(Ok(()), |offset| Err(not_ascii(offset, content[offset]))),
            Self::Utf8 { sig } => {
                let start = utf8_start(content, sig);
                std::str::from_utf8(&content[start..])
                    .map(|_| ())
                    .map_err(|e| invalid_utf8(start + e.valid_up_to()))
            },
            _ => self.chars(content).try_for_each(|item| item.map(|_| ())),
        }
    }

    /// Decode `content` lazily into characters paired with their byte offsets
    ///
    /// The iterator yields the first [`DecodeError`] and then ends.
    #[must_use]
    pub fn chars(self, content: &[u8]) -> Chars<'_> {
        let (offset, state) = match self {
            Self::Binary => (
                0,
                CharsState::Done(Some(DecodeError::new(0, "binary content has no text decoding"))),
            ),
            Self::Ascii => (0, CharsState::Ascii),
            Self::Utf8 { sig } => {
                let start = utf8_start(content, sig);
                let (text, error) = match std::str::from_utf8(&content[start..]) {
                    Ok(text) => (text, None),
                    Err(e) => {
                        let valid = &content[start..start + e.valid_up_to()];
                        let text = std::str::from_utf8(valid).unwrap_or_default();
                        (text, Some(invalid_utf8(start + e.valid_up_to())))
                    },
                };
                (start, CharsState::Utf8 { chars: text.char_indices(), error })
            },
            Self::Utf16(endian) => {
                let (endian, start) = resolve_endian(content, endian, Bom::Utf16Le, Bom::Utf16Be);
                (start, CharsState::Utf16(endian))
            },
            Self::Utf32(endian) => {
                let (endian, start) = resolve_endian(content, endian, Bom::Utf32Le, Bom::Utf32Be);
                (start, CharsState::Utf32(endian))
            },
            Self::Legacy(encoding) => (0, CharsState::Legacy(Box::new(LegacyDecoder::new(encoding)))),
        };
        Chars { content, offset, state }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binary => write!(f, "binary"),
            Self::Ascii => write!(f, "ascii"),
            Self::Utf8 { sig: false } => write!(f, "utf-8"),
            Self::Utf8 { sig: true } => write!(f, "utf-8-sig"),
            Self::Utf16(None) => write!(f, "utf-16"),
            Self::Utf16(Some(Endian::Little)) => write!(f, "utf-16le"),
            Self::Utf16(Some(Endian::Big)) => write!(f, "utf-16be"),
            Self::Utf32(None) => write!(f, "utf-32"),
            Self::Utf32(Some(Endian::Little)) => write!(f, "utf-32le"),
            Self::Utf32(Some(Endian::Big)) => write!(f, "utf-32be"),
            Self::Legacy(encoding) => write!(f, "{}", encoding.name().to_lowercase()),
        }
    }
}

/// Lazily decoded characters of some content, see [`TextEncoding::chars`]
pub struct Chars<'a> {
    content: &'a [u8],
    /// Next undecoded byte (for UTF-8, the start of the decoded text)
    offset: usize,
    state: CharsState<'a>,
}

enum CharsState<'a> {
    Done(Option<DecodeError>),
    Ascii,
    Utf8 {
        chars: std::str::CharIndices<'a>,
        error: Option<DecodeError>,
    },
    Utf16(Endian),
    Utf32(Endian),
    Legacy(Box<LegacyDecoder>),
}

impl fmt::Debug for Chars<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chars").field("offset", &self.offset).finish_non_exhaustive()
    }
}

impl Iterator for Chars<'_> {
    type Item = Result<(usize, char), DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = match &mut self.state {
            CharsState::Done(error) => return error.take().map(Err),
            CharsState::Ascii => next_ascii(self.content, &mut self.offset),
            CharsState::Utf8 { chars, error } => match chars.next() {
                Some((index, c)) => Some(Ok((self.offset + index, c))),
                None => error.take().map(Err),
            },
            CharsState::Utf16(endian) => next_utf16(self.content, &mut self.offset, *endian),
            CharsState::Utf32(endian) => next_utf32(self.content, &mut self.offset, *endian),
            CharsState::Legacy(decoder) => decoder.next_char(self.content, &mut self.offset),
        };
        if matches!(item, Some(Err(_))) {
            self.state = CharsState::Done(None);
        }
        item
    }
}

fn not_ascii(offset: usize, byte: u8) -> DecodeError {
    DecodeError::new(offset, format!("byte 0x{byte:02x} is not ascii"))
}

fn invalid_utf8(offset: usize) -> DecodeError {
    DecodeError::new(offset, "invalid utf-8 sequence")
}

fn utf8_start(content: &[u8], sig: bool) -> usize {
    if sig && Bom::Utf8.is_present(content) {
        Bom::Utf8.bytes().len()
    } else {
        0
    }
}

fn next_ascii(content: &[u8], offset: &mut usize) -> Option<Result<(usize, char), DecodeError>> {
    let at = *offset;
    let &byte = content.get(at)?;
    if !byte.is_ascii() {
        return Some(Err(not_ascii(at, byte)));
    }
    *offset += 1;
    Some(Ok((at, char::from(byte))))
}

/// Resolve the byte order and skip the BOM for the endian-detecting variants
fn resolve_endian(
    content: &[u8],
    endian: Option<Endian>,
    le: Bom,
    be: Bom,
) -> (Endian, usize) {
    match endian {
        Some(endian) => (endian, 0),
        None if le.is_present(content) => (Endian::Little, le.bytes().len()),
        None if be.is_present(content) => (Endian::Big, be.bytes().len()),
        None => (Endian::Little, 0),
    }
}

fn read_u16(bytes: &[u8], endian: Endian) -> u16 {
    let pair = [bytes[0], bytes[1]];
    match endian {
        Endian::Little => u16::from_le_bytes(pair),
        Endian::Big => u16::from_be_bytes(pair),
    }
}

fn next_utf16(
    content: &[u8],
    offset: &mut usize,
    endian: Endian,
) -> Option<Result<(usize, char), DecodeError>> {
    let at = *offset;
    if at >= content.len() {
        return None;
    }
    Some(utf16_at(content, at, endian).map(|(c, width)| {
        *offset += width;
        (at, c)
    }))
}

/// The character starting at `at` and the number of bytes it occupies
fn utf16_at(content: &[u8], at: usize, endian: Endian) -> Result<(char, usize), DecodeError> {
    if at + 2 > content.len() {
        return Err(DecodeError::new(at, "truncated utf-16 code unit"));
    }
    let unit = read_u16(&content[at..], endian);
    match unit {
        0xD800..=0xDBFF => {
            if at + 4 > content.len() {
                return Err(DecodeError::new(at, "unpaired utf-16 high surrogate"));
            }
            let low = read_u16(&content[at + 2..], endian);
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(DecodeError::new(at, "unpaired utf-16 high surrogate"));
            }
            let code = 0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
            char::from_u32(code)
                .map(|c| (c, 4))
                .ok_or_else(|| DecodeError::new(at, "invalid utf-16 surrogate pair"))
        },
        0xDC00..=0xDFFF => Err(DecodeError::new(at, "unpaired utf-16 low surrogate")),
        _ => char::from_u32(u32::from(unit))
            .map(|c| (c, 2))
            .ok_or_else(|| DecodeError::new(at, "invalid utf-16 code unit")),
    }
}

fn next_utf32(
    content: &[u8],
    offset: &mut usize,
    endian: Endian,
) -> Option<Result<(usize, char), DecodeError>> {
    let at = *offset;
    let rest = content.get(at..).filter(|rest| !rest.is_empty())?;
    let Some(quad) = rest.get(..4).and_then(|bytes| <[u8; 4]>::try_from(bytes).ok()) else {
        return Some(Err(DecodeError::new(at, "truncated utf-32 code unit")));
    };
    let code = match endian {
        Endian::Little => u32::from_le_bytes(quad),
        Endian::Big => u32::from_be_bytes(quad),
    };
    Some(match char::from_u32(code) {
        Some(c) => {
            *offset += 4;
            Ok((at, c))
        },
        None => Err(DecodeError::new(at, format!("invalid utf-32 code point 0x{code:x}"))),
    })
}

/// Incremental `encoding_rs` decoding
///
/// The decoder is fed one byte at a time so every character keeps the offset
/// of the first byte of its sequence.
struct LegacyDecoder {
    encoding: &'static Encoding,
    decoder: Decoder,
    buf: [u8; 32],
    len: usize,
    pos: usize,
    /// Offset of the sequence that produced `buf`
    start: usize,
    /// Offset of the first byte not yet turned into output
    pending: usize,
    finished: bool,
}

impl LegacyDecoder {
    fn new(encoding: &'static Encoding) -> Self {
        Self {
            encoding,
            decoder: encoding.new_decoder_without_bom_handling(),
            buf: [0; 32],
            len: 0,
            pos: 0,
            start: 0,
            pending: 0,
            finished: false,
        }
    }

    fn malformed(&self, offset: usize) -> DecodeError {
        DecodeError::new(offset, format!("malformed {} sequence", self.encoding.name().to_lowercase()))
    }

    fn buffered(&self) -> Option<char> {
        std::str::from_utf8(&self.buf[self.pos..self.len]).ok()?.chars().next()
    }

    fn next_char(
        &mut self,
        content: &[u8],
        offset: &mut usize,
    ) -> Option<Result<(usize, char), DecodeError>> {
        loop {
            if self.pos < self.len {
                let Some(c) = self.buffered() else {
                    return Some(Err(self.malformed(self.start)));
                };
                self.pos += c.len_utf8();
                return Some(Ok((self.start, c)));
            }
            if self.finished {
                return None;
            }

            let last = *offset == content.len();
            let input = if last { &[][..] } else { &content[*offset..=*offset] };
            let (result, _read, written) =
                self.decoder.decode_to_utf8_without_replacement(input, &mut self.buf, last);
            if last {
                self.finished = true;
            } else {
                *offset += 1;
            }
            match result {
                DecoderResult::InputEmpty => {},
                DecoderResult::Malformed(..) => return Some(Err(self.malformed(self.pending))),
                DecoderResult::OutputFull => {
                    return Some(Err(DecodeError::new(self.pending, "decoder output overflow")));
                },
            }
            if written > 0 {
                self.len = written;
                self.pos = 0;
                self.start = self.pending;
                self.pending = *offset;
            }
        }
    }
}
