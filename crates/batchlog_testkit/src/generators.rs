//! Property-based test generators using proptest.
//!
//! Provides strategies for random batch operations together with the record
//! each operation is expected to decode back to.

use batchlog_codec::{PartitionId, Record};
use batchlog_core::WriteBatch;
use batchlog_storage::PartitionHandle;
use bytes::Bytes;
use proptest::prelude::*;

/// One append operation on a [`WriteBatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOp {
    /// `put` / `put_scoped`
    Put {
        /// Target partition id (0 = default).
        partition: u32,
        /// Key bytes.
        key: Vec<u8>,
        /// Value bytes.
        value: Vec<u8>,
    },
    /// `merge` / `merge_scoped`
    Merge {
        /// Target partition id (0 = default).
        partition: u32,
        /// Key bytes.
        key: Vec<u8>,
        /// Operand bytes.
        value: Vec<u8>,
    },
    /// `delete` / `delete_scoped`
    Delete {
        /// Target partition id (0 = default).
        partition: u32,
        /// Key bytes.
        key: Vec<u8>,
    },
    /// `put_log_data`
    LogData {
        /// Blob bytes.
        blob: Vec<u8>,
    },
}

impl BatchOp {
    /// Applies the operation to `batch`. Non-zero partitions go through the
    /// scoped API.
    pub fn apply(&self, batch: &mut WriteBatch) {
        match self {
            Self::Put {
                partition,
                key,
                value,
            } => match handle(*partition) {
                Some(h) => batch.put_scoped(&h, key, value),
                None => batch.put(key, value),
            },
            Self::Merge {
                partition,
                key,
                value,
            } => match handle(*partition) {
                Some(h) => batch.merge_scoped(&h, key, value),
                None => batch.merge(key, value),
            },
            Self::Delete { partition, key } => match handle(*partition) {
                Some(h) => batch.delete_scoped(&h, key),
                None => batch.delete(key),
            },
            Self::LogData { blob } => batch.put_log_data(blob),
        }
    }

    /// The record iteration should yield for this operation.
    #[must_use]
    pub fn expected_record(&self) -> Record {
        match self {
            Self::Put {
                partition,
                key,
                value,
            } => Record::Value {
                partition: PartitionId::new(*partition),
                key: Bytes::copy_from_slice(key),
                value: Bytes::copy_from_slice(value),
            },
            Self::Merge {
                partition,
                key,
                value,
            } => Record::Merge {
                partition: PartitionId::new(*partition),
                key: Bytes::copy_from_slice(key),
                value: Bytes::copy_from_slice(value),
            },
            Self::Delete { partition, key } => Record::Deletion {
                partition: PartitionId::new(*partition),
                key: Bytes::copy_from_slice(key),
            },
            Self::LogData { blob } => Record::LogData {
                blob: Bytes::copy_from_slice(blob),
            },
        }
    }
}

fn handle(partition: u32) -> Option<PartitionHandle> {
    (partition != 0).then(|| PartitionHandle::new(PartitionId::new(partition), "generated"))
}

/// Builds a batch by applying `ops` in order.
#[must_use]
pub fn build_batch(ops: &[BatchOp]) -> WriteBatch {
    let mut batch = WriteBatch::new();
    for op in ops {
        op.apply(&mut batch);
    }
    batch
}

/// Strategy for keys, values and blobs (arbitrary bytes).
pub fn payload_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..300)
}

/// Strategy for partition ids, biased toward the default partition and
/// including ids that need multi-byte varints.
pub fn partition_strategy() -> impl Strategy<Value = u32> {
    prop_oneof![
        3 => Just(0u32),
        2 => 1u32..128,
        1 => any::<u32>(),
    ]
}

/// Strategy for a single batch operation.
pub fn batch_op_strategy() -> impl Strategy<Value = BatchOp> {
    prop_oneof![
        4 => (partition_strategy(), payload_strategy(), payload_strategy())
            .prop_map(|(partition, key, value)| BatchOp::Put { partition, key, value }),
        2 => (partition_strategy(), payload_strategy(), payload_strategy())
            .prop_map(|(partition, key, value)| BatchOp::Merge { partition, key, value }),
        2 => (partition_strategy(), payload_strategy())
            .prop_map(|(partition, key)| BatchOp::Delete { partition, key }),
        1 => payload_strategy().prop_map(|blob| BatchOp::LogData { blob }),
    ]
}

/// Strategy for generating a sequence of operations.
pub fn op_sequence_strategy(
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<BatchOp>> {
    prop::collection::vec(batch_op_strategy(), min_ops..max_ops)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Creates a configuration for thorough tests.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 1024,
            max_shrink_iters: 10000,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
