use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::TypeError;
use crate::key::EntityKind;

/// A value that can be persisted under a storage key.
///
/// Records are encoded as self-describing JSON objects whose field names are
/// the historic wire names (`Id_no`, `Owner_nm`, `Remarks`, ...). Decoding is
/// strict about base fields: bytes belonging to a different record type, or
/// truncated bytes, fail with [`TypeError::Decode`].
pub trait Record: Serialize + DeserializeOwned {
    /// The kind this record is stored as.
    const KIND: EntityKind;

    fn encode(&self) -> Result<Vec<u8>, TypeError> {
        serde_json::to_vec(self).map_err(|e| TypeError::Encode {
            kind: Self::KIND,
            reason: e.to_string(),
        })
    }

    fn decode(bytes: &[u8]) -> Result<Self, TypeError> {
        serde_json::from_slice(bytes).map_err(|e| TypeError::Decode {
            kind: Self::KIND,
            reason: e.to_string(),
        })
    }
}
