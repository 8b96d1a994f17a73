//! Range-scan cursor shared by all backends.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Bound;

use crate::error::StoreResult;

/// One `(key, value)` pair produced by a range scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KvEntry {
    pub key: String,
    pub value: Vec<u8>,
}

impl KvEntry {
    pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A lazy, one-shot, ordered cursor over a key range.
///
/// The cursor owns whatever the backend holds open for it. The release hook
/// runs exactly once: on [`KvScan::close`] or, failing that, on drop. Early
/// returns with `?` while iterating therefore still release the cursor.
pub struct KvScan<'a> {
    entries: Box<dyn Iterator<Item = StoreResult<KvEntry>> + 'a>,
    release: Option<Box<dyn FnOnce() + 'a>>,
}

impl<'a> KvScan<'a> {
    /// Wrap a backend iterator.
    pub fn new(entries: impl Iterator<Item = StoreResult<KvEntry>> + 'a) -> Self {
        Self {
            entries: Box::new(entries),
            release: None,
        }
    }

    /// Build a cursor over already-materialized entries.
    pub fn from_entries(entries: Vec<KvEntry>) -> Self {
        Self::new(entries.into_iter().map(Ok))
    }

    /// Register a hook to run when the cursor is released.
    pub fn on_release(mut self, hook: impl FnOnce() + 'a) -> Self {
        self.release = Some(Box::new(hook));
        self
    }

    /// Release the cursor now.
    pub fn close(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(hook) = self.release.take() {
            hook();
        }
    }
}

impl Iterator for KvScan<'_> {
    type Item = StoreResult<KvEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }
}

impl Drop for KvScan<'_> {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for KvScan<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KvScan")
            .field("released", &self.release.is_none())
            .finish()
    }
}

/// Copy the entries of `map` in `[start, end)`, in key order.
pub(crate) fn collect_range(map: &BTreeMap<String, Vec<u8>>, start: &str, end: &str) -> Vec<KvEntry> {
    if start >= end {
        return Vec::new();
    }
    map.range::<str, _>((Bound::Included(start), Bound::Excluded(end)))
        .map(|(k, v)| KvEntry::new(k.clone(), v.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn map(keys: &[&str]) -> BTreeMap<String, Vec<u8>> {
        keys.iter()
            .map(|k| (k.to_string(), k.as_bytes().to_vec()))
            .collect()
    }

    #[test]
    fn range_is_half_open_and_byte_ordered() {
        let m = map(&["COW0", "COW1", "COW10", "COW2", "COW999999", "OWNER0"]);
        let keys: Vec<_> = collect_range(&m, "COW0", "COW999999")
            .into_iter()
            .map(|e| e.key)
            .collect();
        assert_eq!(keys, vec!["COW0", "COW1", "COW10", "COW2"]);
    }

    #[test]
    fn inverted_range_is_empty() {
        let m = map(&["A", "B"]);
        assert!(collect_range(&m, "B", "A").is_empty());
        assert!(collect_range(&m, "A", "A").is_empty());
    }

    #[test]
    fn release_runs_once_on_close() {
        let count = Cell::new(0);
        let scan = KvScan::from_entries(vec![]).on_release(|| count.set(count.get() + 1));
        scan.close();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn release_runs_on_drop_mid_iteration() {
        let count = Cell::new(0);
        {
            let mut scan = KvScan::from_entries(vec![KvEntry::new("a", b"1".to_vec()), KvEntry::new("b", b"2".to_vec())])
                .on_release(|| count.set(count.get() + 1));
            assert!(scan.next().is_some());
        }
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn scan_is_one_shot() {
        let mut scan = KvScan::from_entries(vec![KvEntry::new("a", b"1".to_vec())]);
        assert_eq!(scan.next().unwrap().unwrap().key, "a");
        assert!(scan.next().is_none());
        assert!(scan.next().is_none());
    }
}
