//! Single-file snapshot store.
//!
//! The whole map is kept in memory and rewritten to disk after every
//! mutation. The new snapshot is written to a temporary file in the same
//! directory and renamed over the old one, so a crash mid-write leaves the
//! previous snapshot intact.

use std::collections::BTreeMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::scan::{collect_range, KvScan};
use crate::traits::KeyValueStore;

const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    entries: BTreeMap<String, Vec<u8>>,
}

/// Durable key-value store backed by one snapshot file.
#[derive(Debug)]
pub struct FileKvStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl FileKvStore {
    /// Open the store at `path`, loading the snapshot if the file exists.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let bytes = fs::read(&path)?;
            let snapshot: Snapshot =
                bincode::deserialize(&bytes).map_err(|e| StoreError::Corrupt {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
            if snapshot.version != SNAPSHOT_VERSION {
                return Err(StoreError::Corrupt {
                    path,
                    reason: format!("unsupported snapshot version {}", snapshot.version),
                });
            }
            snapshot.entries
        } else {
            BTreeMap::new()
        };
        debug!(path = %path.display(), entries = entries.len(), "store opened");
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `mutate` to a copy of the map, persist it, then publish it.
    ///
    /// The in-memory map is only replaced once the snapshot is on disk, so a
    /// failed write leaves both views unchanged.
    fn commit<T>(&self, mutate: impl FnOnce(&mut BTreeMap<String, Vec<u8>>) -> T) -> StoreResult<T> {
        let mut guard = self
            .entries
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;
        let mut next = guard.clone();
        let out = mutate(&mut next);
        self.persist(&next)?;
        *guard = next;
        Ok(out)
    }

    fn persist(&self, entries: &BTreeMap<String, Vec<u8>>) -> StoreResult<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let tmp = tempfile::NamedTempFile::new_in(&dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file());
            let snapshot = Snapshot {
                version: SNAPSHOT_VERSION,
                entries: entries.clone(),
            };
            bincode::serialize_into(&mut writer, &snapshot)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;
        debug!(path = %self.path.display(), entries = entries.len(), "snapshot written");
        Ok(())
    }
}

impl KeyValueStore for FileKvStore {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let map = self
            .entries
            .read()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;
        Ok(map.get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        self.commit(|map| {
            map.insert(key.to_string(), value.to_vec());
        })
    }

    fn delete(&self, key: &str) -> StoreResult<bool> {
        if !self.exists(key)? {
            return Ok(false);
        }
        self.commit(|map| map.remove(key).is_some())
    }

    fn scan(&self, start: &str, end: &str) -> StoreResult<KvScan<'_>> {
        let map = self
            .entries
            .read()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;
        Ok(KvScan::from_entries(collect_range(&map, start, end)))
    }

    /// Applies the whole batch with a single snapshot write.
    fn put_batch(&self, entries: &[(String, Vec<u8>)]) -> StoreResult<()> {
        self.commit(|map| {
            for (key, value) in entries {
                map.insert(key.clone(), value.clone());
            }
        })
    }
}
