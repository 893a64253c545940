//! # Batchlog Core
//!
//! In-memory write batches for a key-value engine.
//!
//! This crate provides:
//! - [`WriteBatch`], an append-only log of puts, merges and deletes kept in
//!   wire form and handed to a storage engine as one atomic unit
//! - [`BatchIterator`], a forward-only decoder that rebuilds the records
//!   from a snapshot of batch bytes and reports corruption precisely
//!
//! ## Usage
//!
//! ```
//! use batchlog_core::{RecordKind, WriteBatch};
//! use batchlog_storage::{InMemoryEngine, StorageEngine, WriteOptions};
//!
//! let mut engine = InMemoryEngine::new();
//! let users = engine.open_partition("users").unwrap();
//!
//! let mut batch = WriteBatch::new();
//! batch.put_scoped(&users, b"alice", b"admin");
//! batch.delete(b"stale");
//!
//! let mut iter = batch.new_iterator();
//! assert!(iter.advance());
//! assert_eq!(iter.current().unwrap().kind(), RecordKind::Value);
//!
//! let seq = batch.submit(&mut engine, &WriteOptions::default()).unwrap();
//! assert_eq!(seq.as_u64(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod batch;
mod config;
mod error;
mod iterator;

pub use batch::WriteBatch;
pub use config::BatchConfig;
pub use error::{CoreError, CoreResult};
pub use iterator::{BatchIterator, IteratorState};

pub use batchlog_codec::{CodecError, PartitionId, Record, RecordKind};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
