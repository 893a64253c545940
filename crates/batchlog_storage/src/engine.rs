//! Storage engine trait definition.

use std::fmt;

use crate::error::StorageResult;
use crate::partition::PartitionHandle;

/// Sequence number assigned to a submitted batch.
///
/// A batch with `n` records occupies sequence numbers `seq..seq + n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SequenceNumber(pub u64);

impl SequenceNumber {
    /// Creates a new sequence number.
    #[must_use]
    pub const fn new(seq: u64) -> Self {
        Self(seq)
    }

    /// Returns the raw sequence value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SequenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seq:{}", self.0)
    }
}

/// Options controlling how a batch is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteOptions {
    /// Flush the engine's log before acknowledging the write.
    pub sync: bool,

    /// Skip the engine's write-ahead log entirely.
    pub disable_wal: bool,
}

impl WriteOptions {
    /// Creates default write options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the write is synced before returning.
    #[must_use]
    pub const fn sync(mut self, value: bool) -> Self {
        self.sync = value;
        self
    }

    /// Sets whether the write-ahead log is bypassed.
    #[must_use]
    pub const fn disable_wal(mut self, value: bool) -> Self {
        self.disable_wal = value;
        self
    }
}

/// A key-value engine that applies serialized batches.
///
/// Engines receive batches as **opaque bytes** in the batchlog wire format.
/// They own the 8-byte header region (typically stamping a sequence number
/// there) and are responsible for their own atomicity and durability.
///
/// # Invariants
///
/// - `submit_batch` applies the whole batch or none of it
/// - `open_partition` returns the same id for the same name while the
///   partition exists
/// - the default partition (id 0) always exists
///
/// # Implementors
///
/// - [`super::InMemoryEngine`] - For testing and tooling
pub trait StorageEngine: Send + Sync {
    /// Atomically applies a serialized batch.
    ///
    /// Returns the sequence number assigned to the batch's first record.
    ///
    /// # Errors
    ///
    /// Returns an error if the batch is malformed or the engine fails to
    /// apply it.
    fn submit_batch(&mut self, options: &WriteOptions, batch: &[u8])
        -> StorageResult<SequenceNumber>;

    /// Opens the named partition, creating it if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the partition cannot be created.
    fn open_partition(&mut self, name: &str) -> StorageResult<PartitionHandle>;

    /// Drops a partition. The handle is consumed.
    ///
    /// # Errors
    ///
    /// Returns an error if the partition does not exist or is the default
    /// partition.
    fn drop_partition(&mut self, handle: PartitionHandle) -> StorageResult<()>;

    /// Lists all live partitions ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the partition catalog cannot be read.
    fn list_partitions(&self) -> StorageResult<Vec<PartitionHandle>>;
}
