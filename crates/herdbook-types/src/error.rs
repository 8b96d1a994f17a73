use thiserror::Error;

use crate::key::EntityKind;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown entity type token: {0}")]
    UnknownKind(String),

    #[error("unknown owner discriminator: {0}")]
    UnknownOwnerKind(String),

    #[error("expected {expected} profile field(s) for {kind}, got {actual}")]
    ProfileFields {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("cannot decode {kind} record: {reason}")]
    Decode { kind: EntityKind, reason: String },

    #[error("cannot encode {kind} record: {reason}")]
    Encode { kind: EntityKind, reason: String },
}
