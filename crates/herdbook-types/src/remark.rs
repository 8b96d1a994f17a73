//! Append-only extension attributes.
//!
//! A [`RemarkTrail`] is an ordered list of `(key, value)` pairs attached to a
//! [`Cow`](crate::Cow) or [`Owner`](crate::Owner). Entries are only ever
//! appended: there is no upsert-by-key, so writing the same key twice leaves
//! two entries. Keys written by ledger transactions are namespaced as
//! `<transaction>.<field>`.

use serde::{Deserialize, Deserializer, Serialize};

/// A single extension attribute.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remark {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Value")]
    pub value: String,
}

impl Remark {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Build a remark keyed `<namespace>.<field>`.
    pub fn namespaced(namespace: &str, field: &str, value: impl Into<String>) -> Self {
        Self::new(format!("{namespace}.{field}"), value)
    }
}

/// Ordered, append-only sequence of [`Remark`]s.
///
/// Serializes as a plain JSON array. A stored `null` decodes as an empty
/// trail.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RemarkTrail(Vec<Remark>);

impl RemarkTrail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one remark at the end of the trail.
    pub fn push(&mut self, remark: Remark) {
        self.0.push(remark);
    }

    /// Append remarks in iteration order.
    pub fn append(&mut self, remarks: impl IntoIterator<Item = Remark>) {
        self.0.extend(remarks);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Remark> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Remark] {
        &self.0
    }

    /// Value of the earliest remark with `key`.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|r| r.key == key)
            .map(|r| r.value.as_str())
    }

    /// Values of every remark with `key`, oldest first.
    pub fn values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |r| r.key == key)
            .map(|r| r.value.as_str())
    }
}

impl<'de> Deserialize<'de> for RemarkTrail {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Option::<Vec<Remark>>::deserialize(deserializer)?;
        Ok(Self(entries.unwrap_or_default()))
    }
}

impl From<Vec<Remark>> for RemarkTrail {
    fn from(entries: Vec<Remark>) -> Self {
        Self(entries)
    }
}

impl<'a> IntoIterator for &'a RemarkTrail {
    type Item = &'a Remark;
    type IntoIter = std::slice::Iter<'a, Remark>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
