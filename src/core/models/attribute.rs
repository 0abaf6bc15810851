//! Meta attributes a file can declare
//!
//! The set of attribute kinds is closed: each kind has exactly one validator
//! and one spelling in the `checks:` grammar.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use super::TextEncoding;

/// The kind of a meta attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    /// Character encoding of the content
    Encoding,
    /// MIME type; `text/*` restricts content to printable characters
    Mimetype,
    /// Presence or absence of a byte order mark
    Bom,
    /// Restriction to the Unicode Basic Multilingual Plane
    Bmp,
}

impl AttributeKind {
    /// All kinds, in resolution and reporting order
    pub const ALL: [Self; 4] = [Self::Encoding, Self::Mimetype, Self::Bom, Self::Bmp];

    /// The name used in pattern files and configuration
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Encoding => "encoding",
            Self::Mimetype => "mimetype",
            Self::Bom => "bom",
            Self::Bmp => "bmp",
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for AttributeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s.trim())
            .ok_or_else(|| format!("unknown attribute: {s}. Use: encoding, mimetype, bom, bmp"))
    }
}

/// A declared attribute: a kind together with its value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribute {
    /// `encoding(name)`
    Encoding(TextEncoding),
    /// `mimetype(type/subtype)`
    Mimetype(String),
    /// `bom(true|false)`
    Bom(bool),
    /// `bmp()` / `bmp(true)`
    Bmp,
}

impl Attribute {
    /// The kind of this attribute
    #[must_use]
    pub const fn kind(&self) -> AttributeKind {
        match self {
            Self::Encoding(_) => AttributeKind::Encoding,
            Self::Mimetype(_) => AttributeKind::Mimetype,
            Self::Bom(_) => AttributeKind::Bom,
            Self::Bmp => AttributeKind::Bmp,
        }
    }

    /// The declared value, without the kind
    #[must_use]
    pub fn value(&self) -> String {
        match self {
            Self::Encoding(encoding) => encoding.to_string(),
            Self::Mimetype(mime) => mime.clone(),
            Self::Bom(expected) => expected.to_string(),
            Self::Bmp => "true".to_string(),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind(), self.value())
    }
}

impl Serialize for Attribute {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Attribute kinds every checked file must carry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MandatorySet(BTreeSet<AttributeKind>);

impl MandatorySet {
    /// An empty set
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Parse a space- or comma-separated list of kind names
    pub fn parse(list: &str) -> Result<Self, String> {
        list.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|name| !name.is_empty())
            .map(str::parse::<AttributeKind>)
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Self)
    }

    /// Whether `kind` is mandatory
    #[must_use]
    pub fn contains(&self, kind: AttributeKind) -> bool {
        self.0.contains(&kind)
    }

    /// Whether no kind is mandatory
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the mandatory kinds in reporting order
    pub fn iter(&self) -> impl Iterator<Item = AttributeKind> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<AttributeKind> for MandatorySet {
    fn from_iter<I: IntoIterator<Item = AttributeKind>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for MandatorySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.iter().map(AttributeKind::name).collect();
        f.write_str(&names.join(", "))
    }
}
