//! Sorted key-value storage for Herdbook.
//!
//! The ledger treats durable storage as an abstract, ordered key-value map
//! with range scans. Everything above this crate speaks only the
//! [`KeyValueStore`] trait.
//!
//! # Storage Backends
//!
//! - [`InMemoryKvStore`] -- `BTreeMap`-based store for tests and embedding
//! - [`FileKvStore`] -- single-file snapshot store for the command line
//!
//! # Design Rules
//!
//! 1. Keys are compared as raw bytes; scans return entries in that order.
//! 2. Scans are half-open: `[start, end)`.
//! 3. A [`KvScan`] releases its resources when closed or dropped.
//! 4. The store never interprets values.
//! 5. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod file;
pub mod memory;
pub mod scan;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use file::FileKvStore;
pub use memory::InMemoryKvStore;
pub use scan::{KvEntry, KvScan};
pub use traits::KeyValueStore;
