//! Domain models for checkmeta
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`Attribute`] - A declared meta attribute (`encoding(utf-8)`, `bom(false)`, ...)
//! - [`TextEncoding`] - Encodings an `encoding` attribute can name
//! - [`Rule`] - A pattern line with the checks in effect above it
//! - [`EffectiveAttributes`] - Resolved attributes of one path
//! - [`Verdict`] - Per-file violations for a change set

mod attribute;
mod effective;
mod encoding;
mod rule;
mod verdict;

pub use attribute::{Attribute, AttributeKind, MandatorySet};
pub use effective::{Assignment, EffectiveAttributes};
pub use encoding::{Bom, Chars, DecodeError, Endian, TextEncoding};
pub use rule::{PathPattern, PatternKind, Rule, RuleOrigin, SyntaxMode};
pub use verdict::{Expectation, FileVerdict, Verdict, Violation, ViolationCategory};
