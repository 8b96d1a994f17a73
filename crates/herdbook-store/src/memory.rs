use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{StoreError, StoreResult};
use crate::scan::{collect_range, KvScan};
use crate::traits::KeyValueStore;

/// In-memory, `BTreeMap`-based key-value store.
///
/// Intended for tests and embedding. Entries live behind a `RwLock`; values
/// are cloned on read and write. Scans copy the requested range when opened,
/// so writes made while a cursor is open are not visible through it.
pub struct InMemoryKvStore {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
    open_scans: Arc<AtomicUsize>,
}

impl InMemoryKvStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
            open_scans: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read_guard()?.len())
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.read_guard()?.is_empty())
    }

    /// All keys, in order.
    pub fn keys(&self) -> StoreResult<Vec<String>> {
        Ok(self.read_guard()?.keys().cloned().collect())
    }

    /// Remove every entry.
    pub fn clear(&self) -> StoreResult<()> {
        self.write_guard()?.clear();
        Ok(())
    }

    /// Number of scan cursors opened and not yet released.
    pub fn open_scans(&self) -> usize {
        self.open_scans.load(Ordering::SeqCst)
    }

    fn read_guard(&self) -> StoreResult<RwLockReadGuard<'_, BTreeMap<String, Vec<u8>>>> {
        self.entries
            .read()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }

    fn write_guard(&self) -> StoreResult<RwLockWriteGuard<'_, BTreeMap<String, Vec<u8>>>> {
        self.entries
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }
}

impl Default for InMemoryKvStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for InMemoryKvStore {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.read_guard()?.get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        self.write_guard()?.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> StoreResult<bool> {
        Ok(self.write_guard()?.remove(key).is_some())
    }

    fn scan(&self, start: &str, end: &str) -> StoreResult<KvScan<'_>> {
        let entries = {
            let guard = self.read_guard()?;
            collect_range(&guard, start, end)
        };
        let open = Arc::clone(&self.open_scans);
        open.fetch_add(1, Ordering::SeqCst);
        Ok(KvScan::from_entries(entries).on_release(move || {
            open.fetch_sub(1, Ordering::SeqCst);
        }))
    }

    /// Applies the whole batch under a single write lock.
    fn put_batch(&self, entries: &[(String, Vec<u8>)]) -> StoreResult<()> {
        let mut map = self.write_guard()?;
        for (key, value) in entries {
            map.insert(key.clone(), value.clone());
        }
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryKvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.read_guard().map(|m| m.len()).unwrap_or_default();
        f.debug_struct("InMemoryKvStore")
            .field("entry_count", &count)
            .field("open_scans", &self.open_scans())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(keys: &[&str]) -> InMemoryKvStore {
        let store = InMemoryKvStore::new();
        for key in keys {
            store.put(key, key.as_bytes()).unwrap();
        }
        store
    }

    // -----------------------------------------------------------------------
    // Core CRUD
    // -----------------------------------------------------------------------

    #[test]
    fn put_and_get() {
        let store = InMemoryKvStore::new();
        store.put("COW0", b"hello").unwrap();
        assert_eq!(store.get("COW0").unwrap(), Some(b"hello".to_vec()));
    }

    #[test]
    fn get_missing_returns_none() {
        let store = InMemoryKvStore::new();
        assert!(store.get("COW0").unwrap().is_none());
        assert!(!store.exists("COW0").unwrap());
    }

    #[test]
    fn put_overwrites() {
        let store = InMemoryKvStore::new();
        store.put("k", b"one").unwrap();
        store.put("k", b"two").unwrap();
        assert_eq!(store.get("k").unwrap(), Some(b"two".to_vec()));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn delete_present_and_missing() {
        let store = store_with(&["k"]);
        assert!(store.delete("k").unwrap());
        assert!(!store.exists("k").unwrap());
        assert!(!store.delete("k").unwrap());
    }

    // -----------------------------------------------------------------------
    // Range scans
    // -----------------------------------------------------------------------

    #[test]
    fn scan_returns_range_in_byte_order() {
        let store = store_with(&["COW2", "COW10", "COW0", "OWNER0", "COW1"]);
        let keys: Vec<_> = store
            .scan("COW0", "COW999999")
            .unwrap()
            .map(|e| e.unwrap().key)
            .collect();
        assert_eq!(keys, vec!["COW0", "COW1", "COW10", "COW2"]);
    }

    #[test]
    fn scan_is_released_on_drop() {
        let store = store_with(&["COW0", "COW1"]);
        {
            let mut scan = store.scan("COW0", "COW999999").unwrap();
            assert_eq!(store.open_scans(), 1);
            scan.next();
        }
        assert_eq!(store.open_scans(), 0);
    }

    #[test]
    fn scan_is_released_on_close() {
        let store = store_with(&["COW0"]);
        let scan = store.scan("COW0", "COW999999").unwrap();
        scan.close();
        assert_eq!(store.open_scans(), 0);
    }

    #[test]
    fn scan_leaves_store_writable() {
        let store = store_with(&["COW0"]);
        let scan = store.scan("COW0", "COW999999").unwrap();
        store.put("COW1", b"cow").unwrap();
        drop(scan);
        assert_eq!(store.len().unwrap(), 2);
    }

    #[test]
    fn scan_sees_snapshot_at_open() {
        let store = store_with(&["COW0"]);
        let scan = store.scan("COW0", "COW999999").unwrap();
        store.put("COW1", b"late").unwrap();
        assert_eq!(scan.count(), 1);
    }

    // -----------------------------------------------------------------------
    // Batch writes
    // -----------------------------------------------------------------------

    #[test]
    fn put_batch_writes_all() {
        let store = InMemoryKvStore::new();
        store
            .put_batch(&[
                ("RFID0".into(), b"tag".to_vec()),
                ("COW3".into(), b"cow".to_vec()),
            ])
            .unwrap();
        assert_eq!(store.keys().unwrap(), vec!["COW3", "RFID0"]);
    }

    // -----------------------------------------------------------------------
    // Utility methods
    // -----------------------------------------------------------------------

    #[test]
    fn len_is_empty_and_clear() {
        let store = InMemoryKvStore::default();
        assert!(store.is_empty().unwrap());
        store.put("a", b"1").unwrap();
        assert_eq!(store.len().unwrap(), 1);
        store.clear().unwrap();
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn concurrent_reads_are_safe() {
        use std::thread;

        let store = Arc::new(store_with(&["COW0"]));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    assert_eq!(store.get("COW0").unwrap(), Some(b"COW0".to_vec()));
                })
            })
            .collect();
        for h in handles {
            h.join().expect("thread should not panic");
        }
    }

    #[test]
    fn debug_format() {
        let store = store_with(&["x"]);
        let debug = format!("{store:?}");
        assert!(debug.contains("InMemoryKvStore"));
        assert!(debug.contains("entry_count"));
    }
}
