//! The resolved attribute set of a single path

use std::collections::BTreeMap;

use serde::Serialize;

use super::{Attribute, AttributeKind, RuleOrigin, TextEncoding};

/// An attribute together with the rule that supplied it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    /// The declared attribute
    pub attribute: Attribute,
    /// The last matching rule that declared this kind
    pub origin: RuleOrigin,
}

/// Attribute kind → declared value, folded from every matching rule in order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EffectiveAttributes(BTreeMap<AttributeKind, Assignment>);

impl EffectiveAttributes {
    /// An empty mapping
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Overwrite the entry for the attribute's kind, leaving other kinds alone
    pub fn assign(&mut self, attribute: Attribute, origin: RuleOrigin) {
        self.0.insert(attribute.kind(), Assignment { attribute, origin });
    }

    /// The declared attribute of a kind
    #[must_use]
    pub fn get(&self, kind: AttributeKind) -> Option<&Attribute> {
        self.0.get(&kind).map(|a| &a.attribute)
    }

    /// The assignment (attribute and origin) of a kind
    #[must_use]
    pub fn assignment(&self, kind: AttributeKind) -> Option<&Assignment> {
        self.0.get(&kind)
    }

    /// Whether the kind has been assigned
    #[must_use]
    pub fn contains(&self, kind: AttributeKind) -> bool {
        self.0.contains_key(&kind)
    }

    /// The declared encoding, if any
    #[must_use]
    pub fn encoding(&self) -> Option<TextEncoding> {
        match self.get(AttributeKind::Encoding) {
            Some(Attribute::Encoding(encoding)) => Some(*encoding),
            _ => None,
        }
    }

    /// Number of assigned kinds
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing was assigned
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Assignments in kind order
    pub fn iter(&self) -> impl Iterator<Item = &Assignment> {
        self.0.values()
    }

    /// Declared attributes in kind order
    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.0.values().map(|a| &a.attribute)
    }
}
