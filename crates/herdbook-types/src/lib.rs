//! Foundation types for Herdbook, a livestock traceability ledger.
//!
//! This crate provides the key schema, the entity records, and the
//! append-only remark trail used throughout the Herdbook system. Every other
//! Herdbook crate depends on `herdbook-types`.
//!
//! # Key Types
//!
//! - [`EntityKind`] -- Record type tag and its storage key prefix
//! - [`RecordKey`] -- `<PREFIX><discriminator>` storage key
//! - [`ScanBounds`] -- Range-scan boundary convention for "list all" queries
//! - [`Cow`] -- Animal record with an embedded owner snapshot
//! - [`Owner`] / [`OwnerProfile`] -- Custodian record and its typed subtype view
//! - [`Haccp`], [`TagAttachment`], [`Bundle`] -- Side records linked by remarks
//! - [`Remark`] / [`RemarkTrail`] -- Append-only extension attributes
//! - [`Record`] -- Self-describing encode/decode for stored values

pub mod bundle;
pub mod certification;
pub mod cow;
pub mod error;
pub mod key;
pub mod owner;
pub mod record;
pub mod remark;
pub mod tag;

pub use bundle::{Bundle, BundleStage};
pub use certification::Haccp;
pub use cow::Cow;
pub use error::TypeError;
pub use key::{EntityKind, RecordKey, ScanBounds};
pub use owner::{Owner, OwnerKind, OwnerProfile};
pub use record::Record;
pub use remark::{Remark, RemarkTrail};
pub use tag::TagAttachment;
