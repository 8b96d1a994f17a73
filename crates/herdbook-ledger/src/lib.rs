//! Transaction handlers and queries for the Herdbook livestock ledger.
//!
//! This crate turns a [`KeyValueStore`](herdbook_store::KeyValueStore) into a
//! supply-chain traceability ledger. It provides:
//! - The [`Herdbook`] handle with whole-record load / patch / save primitives
//! - Registration of cows, owners, HACCP certificates, RFID tags and bundles
//! - Schema-driven remark events (vaccinations, inspections, reports, ...)
//! - Ownership transfer and cow deletion
//! - Point queries and byte-ordered range listings
//! - Name-based dispatch with argument-count checks ([`Herdbook::invoke`])
//! - TOML-backed [`LedgerConfig`]

pub mod config;
pub mod dispatch;
pub mod error;
pub mod ledger;
pub mod lifecycle;
pub mod query;
pub mod registration;
pub mod remarks;
pub mod seed;

pub use config::{ConfigError, LedgerConfig};
pub use dispatch::{Outcome, Transaction};
pub use error::{ErrorClass, LedgerError, LedgerResult};
pub use ledger::{Annotated, Herdbook};
pub use query::Listing;
pub use registration::CowRegistration;
pub use remarks::{RemarkSchema, EVENT_SCHEMAS};
pub use seed::sample_records;
