//! Error types for storage operations.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A submitted batch is too short to carry a header.
    #[error("malformed batch: {len} bytes is shorter than the 12-byte header")]
    MalformedBatch {
        /// Length of the rejected batch.
        len: usize,
    },

    /// No open partition has the given name.
    #[error("partition not found: {name}")]
    PartitionNotFound {
        /// Name of the partition.
        name: String,
    },

    /// The default partition cannot be dropped.
    #[error("the default partition cannot be dropped")]
    DefaultPartition,

    /// The partition id space is exhausted.
    #[error("too many partitions")]
    PartitionLimit,
}

impl StorageError {
    /// Creates a partition not found error.
    pub fn partition_not_found(name: impl Into<String>) -> Self {
        Self::PartitionNotFound { name: name.into() }
    }
}
