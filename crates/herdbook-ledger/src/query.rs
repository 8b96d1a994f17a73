//! Point lookups and range listings.

use std::marker::PhantomData;

use herdbook_store::{KeyValueStore, KvScan};
use herdbook_types::{Cow, EntityKind, Owner, Record};
use serde::Serialize;
use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::{decode_at, Herdbook};

/// A lazy, one-shot listing of every record of type `R` in key order.
///
/// Keys come back in the store's byte order, so `COW10` precedes `COW2`.
/// Dropping the listing releases the underlying scan, whether or not it was
/// run to the end.
pub struct Listing<'a, R> {
    scan: KvScan<'a>,
    _record: PhantomData<R>,
}

impl<R: Record> Iterator for Listing<'_, R> {
    type Item = LedgerResult<(String, R)>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = match self.scan.next()? {
            Ok(entry) => entry,
            Err(e) => return Some(Err(e.into())),
        };
        Some(decode_at(&entry.key, &entry.value).map(|record| (entry.key, record)))
    }
}

impl<R> std::fmt::Debug for Listing<'_, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listing").field("scan", &self.scan).finish()
    }
}

#[derive(Serialize)]
struct Listed<'a, R> {
    #[serde(rename = "Key")]
    key: &'a str,
    #[serde(rename = "Record")]
    record: &'a R,
}

impl<S: KeyValueStore> Herdbook<S> {
    /// Raw bytes stored at `key`, or `None` when absent.
    ///
    /// `kind_token` must be exactly one of the type prefixes (`COW`,
    /// `OWNER`, ...).
    pub fn query(&self, kind_token: &str, key: &str) -> LedgerResult<Option<Vec<u8>>> {
        let kind = EntityKind::parse(kind_token)
            .map_err(|_| LedgerError::UnknownType(kind_token.to_string()))?;
        let bytes = self.store().get(key)?;
        debug!(%kind, key, found = bytes.is_some(), "point query");
        Ok(bytes)
    }

    /// Every record of type `R` inside the configured listing window.
    pub fn list<R: Record>(&self) -> LedgerResult<Listing<'_, R>> {
        let (start, end) = self.config().listing.range_for(R::KIND);
        let scan = self.store().scan(start.as_str(), end.as_str())?;
        debug!(kind = %R::KIND, %start, %end, "range listing opened");
        Ok(Listing {
            scan,
            _record: PhantomData,
        })
    }

    /// The listing of `R` rendered as `[{"Key": .., "Record": ..}, ..]`.
    pub fn query_all_json<R: Record>(&self) -> LedgerResult<Vec<u8>> {
        let records = self.list::<R>()?.collect::<LedgerResult<Vec<_>>>()?;
        let listed: Vec<_> = records
            .iter()
            .map(|(key, record)| Listed { key, record })
            .collect();
        serde_json::to_vec(&listed).map_err(|e| LedgerError::Encoding {
            kind: R::KIND,
            key: R::KIND.prefix().to_string(),
            reason: e.to_string(),
        })
    }

    pub fn query_all_cows(&self) -> LedgerResult<Vec<u8>> {
        self.query_all_json::<Cow>()
    }

    pub fn query_all_owners(&self) -> LedgerResult<Vec<u8>> {
        self.query_all_json::<Owner>()
    }
}
