use herdbook_store::StoreError;
use herdbook_types::EntityKind;

/// Broad failure classes callers can branch on.
///
/// None of them is retried by the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    /// Malformed input; the caller must correct it and resubmit.
    Validation,
    /// A referenced or targeted key is absent.
    NotFound,
    /// Stored bytes do not decode into the expected record.
    CorruptRecord,
    /// The underlying store failed.
    Store,
}

/// Errors produced by ledger transactions and queries.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("incorrect number of arguments for {transaction}: expected {expected}, got {actual}")]
    Arity {
        transaction: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("unknown entity type: {0}")]
    UnknownType(String),

    #[error("unknown owner discriminator: {0}")]
    UnknownDiscriminator(String),

    #[error("unknown transaction: {0}")]
    UnknownTransaction(String),

    #[error("{side} record and the record linking to it share key {key}")]
    KeyCollision { side: EntityKind, key: String },

    #[error("cow {cow_key} is held by {current}, not {claimed}")]
    OwnerMismatch {
        cow_key: String,
        current: String,
        claimed: String,
    },

    #[error("{kind} not found: {key}")]
    NotFound { kind: EntityKind, key: String },

    #[error("corrupt {kind} record at {key}: {reason}")]
    CorruptRecord {
        kind: EntityKind,
        key: String,
        reason: String,
    },

    #[error("cannot encode {kind} record for {key}: {reason}")]
    Encoding {
        kind: EntityKind,
        key: String,
        reason: String,
    },

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl LedgerError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Arity { .. }
            | Self::UnknownType(_)
            | Self::UnknownDiscriminator(_)
            | Self::UnknownTransaction(_)
            | Self::KeyCollision { .. }
            | Self::OwnerMismatch { .. } => ErrorClass::Validation,
            Self::NotFound { .. } => ErrorClass::NotFound,
            Self::CorruptRecord { .. } | Self::Encoding { .. } => ErrorClass::CorruptRecord,
            Self::Store(_) => ErrorClass::Store,
        }
    }

    pub(crate) fn not_found(kind: EntityKind, key: &str) -> Self {
        Self::NotFound {
            kind,
            key: key.to_string(),
        }
    }
}

/// Result alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
