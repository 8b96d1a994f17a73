use crate::error::StoreResult;
use crate::scan::KvScan;

/// Durable, sorted key-value map with range iteration.
///
/// All implementations must satisfy these invariants:
/// - Keys are ordered by their UTF-8 bytes.
/// - `scan(start, end)` yields every key `k` with `start <= k < end`, in order.
/// - A write either takes effect completely or returns `Err`.
/// - Isolation between concurrent callers is the store's concern; callers
///   get last-write-wins at key granularity.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Create or overwrite the value under `key`.
    fn put(&self, key: &str, value: &[u8]) -> StoreResult<()>;

    /// Remove `key`. Returns `true` if the key existed.
    fn delete(&self, key: &str) -> StoreResult<bool>;

    /// Open an ordered cursor over `[start, end)`.
    ///
    /// The returned [`KvScan`] must be dropped (or closed) to release it.
    fn scan(&self, start: &str, end: &str) -> StoreResult<KvScan<'_>>;

    /// Check whether `key` exists.
    fn exists(&self, key: &str) -> StoreResult<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Write several entries.
    ///
    /// The default implementation calls `put()` for each entry in order and
    /// stops at the first failure, leaving earlier entries applied. Backends
    /// that can apply a batch atomically should override it.
    fn put_batch(&self, entries: &[(String, Vec<u8>)]) -> StoreResult<()> {
        entries
            .iter()
            .try_for_each(|(key, value)| self.put(key, value))
    }
}
