//! The ledger handle and its record I/O primitives.

use herdbook_store::KeyValueStore;
use herdbook_types::{Cow, Owner, Record, RemarkTrail};
use tracing::debug;

use crate::config::LedgerConfig;
use crate::error::{LedgerError, LedgerResult};

/// A record that carries an append-only remark trail.
pub trait Annotated: Record {
    fn remarks(&self) -> &RemarkTrail;
    fn remarks_mut(&mut self) -> &mut RemarkTrail;
}

impl Annotated for Cow {
    fn remarks(&self) -> &RemarkTrail {
        &self.remarks
    }

    fn remarks_mut(&mut self) -> &mut RemarkTrail {
        &mut self.remarks
    }
}

impl Annotated for Owner {
    fn remarks(&self) -> &RemarkTrail {
        &self.remarks
    }

    fn remarks_mut(&mut self) -> &mut RemarkTrail {
        &mut self.remarks
    }
}

/// Livestock traceability ledger over a [`KeyValueStore`].
///
/// Every method is one self-contained unit of work: it reads what it needs,
/// then writes. Records are always read whole, patched in memory and written
/// back whole. Nothing is cached between calls.
pub struct Herdbook<S> {
    store: S,
    config: LedgerConfig,
}

impl<S: KeyValueStore> Herdbook<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, LedgerConfig::default())
    }

    pub fn with_config(store: S, config: LedgerConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Read and decode the record at `key`.
    ///
    /// Fails with `NotFound` if the key is absent and `CorruptRecord` if the
    /// bytes do not decode as `R`.
    pub fn load<R: Record>(&self, key: &str) -> LedgerResult<R> {
        let bytes = self
            .store
            .get(key)?
            .ok_or_else(|| LedgerError::not_found(R::KIND, key))?;
        decode_at(key, &bytes)
    }

    /// Encode and write `record` at `key`, overwriting whatever is there.
    pub fn save<R: Record>(&self, key: &str, record: &R) -> LedgerResult<()> {
        let bytes = encode_at(key, record)?;
        self.store.put(key, &bytes)?;
        debug!(key, kind = %R::KIND, len = bytes.len(), "record written");
        Ok(())
    }

    /// Load the record at `key`, apply `patch`, and write it back.
    pub fn update<R, F>(&self, key: &str, patch: F) -> LedgerResult<R>
    where
        R: Record,
        F: FnOnce(&mut R) -> LedgerResult<()>,
    {
        let mut record: R = self.load(key)?;
        patch(&mut record)?;
        self.save(key, &record)?;
        Ok(record)
    }

    /// Write a side record and the record that links to it in one batch.
    ///
    /// The side record goes first and the linking record last, so with a
    /// store that cannot apply batches atomically a partial failure leaves
    /// an orphaned side record rather than a link to nothing. Both records
    /// must live under distinct keys.
    pub(crate) fn save_linked<A: Record, B: Record>(
        &self,
        side_key: &str,
        side: &A,
        target_key: &str,
        target: &B,
    ) -> LedgerResult<()> {
        if side_key == target_key {
            return Err(LedgerError::KeyCollision {
                side: A::KIND,
                key: side_key.to_string(),
            });
        }
        let batch = vec![
            (side_key.to_string(), encode_at(side_key, side)?),
            (target_key.to_string(), encode_at(target_key, target)?),
        ];
        self.store.put_batch(&batch)?;
        debug!(
            side = side_key,
            target = target_key,
            "linked records written"
        );
        Ok(())
    }
}

impl<S> std::fmt::Debug for Herdbook<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Herdbook")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

pub(crate) fn decode_at<R: Record>(key: &str, bytes: &[u8]) -> LedgerResult<R> {
    R::decode(bytes).map_err(|e| LedgerError::CorruptRecord {
        kind: R::KIND,
        key: key.to_string(),
        reason: e.to_string(),
    })
}

pub(crate) fn encode_at<R: Record>(key: &str, record: &R) -> LedgerResult<Vec<u8>> {
    record.encode().map_err(|e| LedgerError::Encoding {
        kind: R::KIND,
        key: key.to_string(),
        reason: e.to_string(),
    })
}
