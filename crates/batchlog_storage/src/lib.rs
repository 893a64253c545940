//! # Batchlog Storage
//!
//! The storage engine a write batch is handed to.
//!
//! Engines treat batches as **opaque byte sequences** in the batchlog wire
//! format. They own the header's 8-byte opaque region and the partition
//! catalog; they never need to understand record frames.
//!
//! ## Design Principles
//!
//! - A batch is applied atomically or not at all
//! - Partitions are addressed by shared [`PartitionHandle`]s
//! - Engines must be `Send + Sync` for concurrent access
//!
//! ## Available Engines
//!
//! - [`InMemoryEngine`] - For testing and tooling
//!
//! ## Example
//!
//! ```rust
//! use batchlog_storage::{InMemoryEngine, StorageEngine};
//!
//! let mut engine = InMemoryEngine::new();
//! let users = engine.open_partition("users").unwrap();
//! assert_eq!(users.id().as_u32(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod engine;
mod error;
mod memory;
mod partition;

pub use engine::{SequenceNumber, StorageEngine, WriteOptions};
pub use error::{StorageError, StorageResult};
pub use memory::{InMemoryEngine, StoredBatch};
pub use partition::{PartitionHandle, PartitionRegistry, DEFAULT_PARTITION_NAME};
