//! Storage key schema.
//!
//! Every record lives under a string key of the form
//! `<TYPE_PREFIX><discriminator>`. The prefix names the record type; the
//! discriminator is chosen by the caller (or derived from a zero-based
//! counter when seeding). "List all" queries depend on the convention that
//! every key of one type sorts inside a fixed lexicographic window, see
//! [`ScanBounds`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// The five record types held by the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    /// An animal.
    Cow,
    /// A farm, slaughterhouse, processor or retailer.
    Owner,
    /// A HACCP facility certification.
    Haccp,
    /// An RFID ear-tag attachment.
    Rfid,
    /// A processing or sales package lot.
    Bundle,
}

impl EntityKind {
    /// All kinds, in prefix-declaration order.
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Cow,
        EntityKind::Owner,
        EntityKind::Haccp,
        EntityKind::Rfid,
        EntityKind::Bundle,
    ];

    /// The case-sensitive key prefix for this kind.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Cow => "COW",
            Self::Owner => "OWNER",
            Self::Haccp => "HACCP",
            Self::Rfid => "RFID",
            Self::Bundle => "BUNDLE",
        }
    }

    /// Parse a type token such as `"COW"`.
    ///
    /// Only the exact prefix string is accepted. Tokens that merely contain a
    /// prefix (`"MYCOW"`, `"COWS"`) are rejected.
    pub fn parse(token: &str) -> Result<Self, TypeError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.prefix() == token)
            .ok_or_else(|| TypeError::UnknownKind(token.to_string()))
    }

    /// Recognise the kind of a full storage key by its leading prefix.
    ///
    /// No prefix is a prefix of another, so at most one kind can match.
    pub fn classify(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| key.starts_with(kind.prefix()))
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

impl FromStr for EntityKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A typed storage key: `<PREFIX><discriminator>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey {
    kind: EntityKind,
    raw: String,
}

impl RecordKey {
    /// Build a key from a kind and a caller-chosen discriminator.
    pub fn new(kind: EntityKind, discriminator: impl AsRef<str>) -> Self {
        Self {
            kind,
            raw: format!("{}{}", kind.prefix(), discriminator.as_ref()),
        }
    }

    /// Key for the `index`-th seeded record of a kind (`COW0`, `COW1`, ...).
    pub fn seeded(kind: EntityKind, index: usize) -> Self {
        Self::new(kind, index.to_string())
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl AsRef<str> for RecordKey {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

/// Lexicographic window used to list every record of one kind.
///
/// The scan covers `[<PREFIX><lower>, <PREFIX><upper>)` in the store's byte
/// order. Only discriminators that are numeric strings of at most six digits
/// are guaranteed to fall inside the default window; anything else may be
/// silently left out of listings. Results come back in byte order, so
/// `COW10` precedes `COW2`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanBounds {
    /// Discriminator at the inclusive start of the window.
    pub lower: String,
    /// Discriminator at the exclusive end of the window.
    pub upper: String,
}

impl Default for ScanBounds {
    fn default() -> Self {
        Self {
            lower: "0".into(),
            upper: "999999".into(),
        }
    }
}

impl ScanBounds {
    /// Start and end keys for a range scan over `kind`.
    pub fn range_for(&self, kind: EntityKind) -> (RecordKey, RecordKey) {
        (
            RecordKey::new(kind, &self.lower),
            RecordKey::new(kind, &self.upper),
        )
    }
}
