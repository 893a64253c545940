//! In-memory storage engine.

use batchlog_codec::header::{read_count, write_sequence};
use batchlog_codec::HEADER_SIZE;
use parking_lot::RwLock;
use tracing::debug;

use crate::engine::{SequenceNumber, StorageEngine, WriteOptions};
use crate::error::{StorageError, StorageResult};
use crate::partition::{PartitionHandle, PartitionRegistry};

/// A batch accepted by [`InMemoryEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBatch {
    /// Sequence number of the batch's first record.
    pub sequence: SequenceNumber,
    /// Options the batch was submitted with.
    pub options: WriteOptions,
    /// The batch bytes with the sequence stamped into the header.
    pub data: Vec<u8>,
}

#[derive(Debug)]
struct EngineState {
    partitions: PartitionRegistry,
    batches: Vec<StoredBatch>,
    next_sequence: u64,
}

impl Default for EngineState {
    fn default() -> Self {
        Self {
            partitions: PartitionRegistry::new(),
            batches: Vec::new(),
            next_sequence: 1,
        }
    }
}

/// An in-memory storage engine.
///
/// Batches are kept as opaque bytes in submission order. The engine never
/// decodes record frames; it only reads the header count to advance its
/// sequence counter. Suitable for:
/// - Unit and integration tests
/// - Tooling that needs a collaborator without persistence
///
/// # Thread Safety
///
/// This engine is thread-safe and can be shared across threads.
///
/// # Example
///
/// ```rust
/// use batchlog_storage::{InMemoryEngine, StorageEngine, WriteOptions};
///
/// let mut engine = InMemoryEngine::new();
/// let mut batch = vec![0u8; 12];
/// batch[8] = 1;
/// let seq = engine.submit_batch(&WriteOptions::default(), &batch).unwrap();
/// assert_eq!(seq.as_u64(), 1);
/// assert_eq!(engine.batch_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryEngine {
    state: RwLock<EngineState>,
}

impl InMemoryEngine {
    /// Creates a new empty engine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every accepted batch in submission order.
    #[must_use]
    pub fn batches(&self) -> Vec<StoredBatch> {
        self.state.read().batches.clone()
    }

    /// Number of accepted batches.
    #[must_use]
    pub fn batch_count(&self) -> usize {
        self.state.read().batches.len()
    }

    /// Sequence number the next batch will receive.
    #[must_use]
    pub fn next_sequence(&self) -> SequenceNumber {
        SequenceNumber::new(self.state.read().next_sequence)
    }

    /// Looks up a live partition by name without creating it.
    #[must_use]
    pub fn partition(&self, name: &str) -> Option<PartitionHandle> {
        self.state.read().partitions.get(name)
    }
}

impl StorageEngine for InMemoryEngine {
    fn submit_batch(
        &mut self,
        options: &WriteOptions,
        batch: &[u8],
    ) -> StorageResult<SequenceNumber> {
        let count = read_count(batch).ok_or(StorageError::MalformedBatch { len: batch.len() })?;

        let mut state = self.state.write();
        let sequence = SequenceNumber::new(state.next_sequence);
        state.next_sequence += u64::from(count.max(1));

        let mut data = batch.to_vec();
        write_sequence(&mut data, sequence.as_u64());

        debug!(
            %sequence,
            count,
            bytes = batch.len() - HEADER_SIZE,
            sync = options.sync,
            disable_wal = options.disable_wal,
            "batch applied"
        );

        state.batches.push(StoredBatch {
            sequence,
            options: *options,
            data,
        });
        Ok(sequence)
    }

    fn open_partition(&mut self, name: &str) -> StorageResult<PartitionHandle> {
        let handle = self.state.write().partitions.open(name)?;
        debug!(id = handle.id().as_u32(), name, "partition opened");
        Ok(handle)
    }

    fn drop_partition(&mut self, handle: PartitionHandle) -> StorageResult<()> {
        self.state.write().partitions.remove(&handle)?;
        debug!(id = handle.id().as_u32(), name = handle.name(), "partition dropped");
        Ok(())
    }

    fn list_partitions(&self) -> StorageResult<Vec<PartitionHandle>> {
        Ok(self.state.read().partitions.handles())
    }
}
