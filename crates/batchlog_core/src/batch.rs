//! Write batches.
//!
//! A [`WriteBatch`] is an append-only log of pending puts, merges and
//! deletes, kept directly in wire form. Every append encodes one frame onto
//! the buffer and bumps the header count, so [`WriteBatch::data`] is always a
//! complete, self-describing batch.
//!
//! ```text
//! | opaque (8) | count u32 LE (4) | frame | frame | ... |
//! ```

use batchlog_codec::header::{read_count, write_count, OPAQUE_LEN};
use batchlog_codec::{encode_frame, PartitionId, Record, RecordKind, HEADER_SIZE};
use batchlog_storage::{PartitionHandle, SequenceNumber, StorageEngine, WriteOptions};
use bytes::Bytes;
use tracing::debug;

use crate::config::BatchConfig;
use crate::error::{CoreError, CoreResult};
use crate::iterator::BatchIterator;

/// An ordered batch of pending key-value operations.
///
/// Appends are infallible and never perform I/O. The batch owns its buffer;
/// iterators and serialized snapshots are independent copies.
///
/// # Example
///
/// ```
/// use batchlog_core::WriteBatch;
///
/// let mut batch = WriteBatch::new();
/// batch.put(b"a", b"1");
/// batch.delete(b"b");
/// batch.merge(b"c", b"2");
/// assert_eq!(batch.count(), 3);
///
/// let copy = WriteBatch::from_bytes(&batch.serialize());
/// assert_eq!(copy.new_iterator().count(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteBatch {
    rep: Vec<u8>,
}

impl Default for WriteBatch {
    fn default() -> Self {
        Self::new()
    }
}

impl WriteBatch {
    /// Creates an empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&BatchConfig::default())
    }

    /// Creates an empty batch using `config`.
    #[must_use]
    pub fn with_config(config: &BatchConfig) -> Self {
        let mut rep = Vec::with_capacity(config.reserved_bytes.max(HEADER_SIZE));
        rep.resize(HEADER_SIZE, 0);
        Self { rep }
    }

    /// Wraps serialized batch bytes.
    ///
    /// The header count is taken as-is and not checked against the frames;
    /// use [`verify`](Self::verify) for that. Input shorter than a header is
    /// treated as an empty batch.
    #[must_use]
    pub fn from_bytes(data: &[u8]) -> Self {
        if data.len() < HEADER_SIZE {
            debug!(len = data.len(), "undersized batch bytes, starting empty");
            return Self::new();
        }
        Self { rep: data.to_vec() }
    }

    /// Queues a write of `value` under `key`.
    pub fn put(&mut self, key: &[u8], value: &[u8]) {
        self.append(RecordKind::Value, PartitionId::DEFAULT, key, value);
    }

    /// Queues a write of `value` under `key` in `partition`.
    pub fn put_scoped(&mut self, partition: &PartitionHandle, key: &[u8], value: &[u8]) {
        self.append(RecordKind::Value, partition.id(), key, value);
    }

    /// Queues a merge of `value` into the existing value of `key`.
    pub fn merge(&mut self, key: &[u8], value: &[u8]) {
        self.append(RecordKind::Merge, PartitionId::DEFAULT, key, value);
    }

    /// Queues a merge of `value` into `key` in `partition`.
    pub fn merge_scoped(&mut self, partition: &PartitionHandle, key: &[u8], value: &[u8]) {
        self.append(RecordKind::Merge, partition.id(), key, value);
    }

    /// Queues a deletion of `key`.
    pub fn delete(&mut self, key: &[u8]) {
        self.append(RecordKind::Deletion, PartitionId::DEFAULT, key, &[]);
    }

    /// Queues a deletion of `key` in `partition`.
    pub fn delete_scoped(&mut self, partition: &PartitionHandle, key: &[u8]) {
        self.append(RecordKind::Deletion, partition.id(), key, &[]);
    }

    /// Appends an opaque blob that travels with the batch but is not a
    /// key-value operation.
    pub fn put_log_data(&mut self, blob: &[u8]) {
        self.append(RecordKind::LogData, PartitionId::DEFAULT, blob, &[]);
    }

    /// Appends a decoded record, e.g. one read from another batch.
    pub fn append_record(&mut self, record: &Record) {
        let value = record.value().map_or(&[][..], |v| &v[..]);
        self.append(record.kind(), record.partition(), record.key(), value);
    }

    fn append(&mut self, kind: RecordKind, partition: PartitionId, key: &[u8], value: &[u8]) {
        encode_frame(&mut self.rep, kind, partition, key, value);
        let count = self.count().saturating_add(1);
        write_count(&mut self.rep, count);
    }

    /// Discards every frame and zeroes the header.
    pub fn clear(&mut self) {
        self.rep.clear();
        self.rep.resize(HEADER_SIZE, 0);
    }

    /// Number of records in the batch, as recorded in the header.
    #[must_use]
    pub fn count(&self) -> u32 {
        read_count(&self.rep).unwrap_or(0)
    }

    /// Returns `true` if the batch holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// The opaque header region owned by the storage engine.
    #[must_use]
    pub fn header(&self) -> [u8; OPAQUE_LEN] {
        let mut header = [0u8; OPAQUE_LEN];
        header.copy_from_slice(&self.rep[..OPAQUE_LEN]);
        header
    }

    /// The wire representation, borrowed.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.rep
    }

    /// Size of the wire representation in bytes.
    #[must_use]
    pub fn size_in_bytes(&self) -> usize {
        self.rep.len()
    }

    /// Returns an immutable snapshot of the wire representation.
    #[must_use]
    pub fn serialize(&self) -> Bytes {
        Bytes::copy_from_slice(&self.rep)
    }

    /// Returns an iterator over a snapshot of the current contents.
    ///
    /// Later appends to this batch are not visible to the iterator.
    #[must_use]
    pub fn new_iterator(&self) -> BatchIterator {
        BatchIterator::new(self.serialize())
    }

    /// Decodes every frame and checks the header count against them.
    ///
    /// # Errors
    ///
    /// Returns the first decode error, or [`CoreError::CountMismatch`] if
    /// all frames decode but their number differs from the header.
    pub fn verify(&self) -> CoreResult<()> {
        let mut actual = 0u64;
        for record in self.new_iterator() {
            record?;
            actual += 1;
        }

        let declared = self.count();
        if actual != u64::from(declared) {
            return Err(CoreError::count_mismatch(declared, actual));
        }
        Ok(())
    }

    /// Hands the batch to `engine` for atomic application.
    ///
    /// Returns the sequence number the engine assigned.
    ///
    /// # Errors
    ///
    /// Returns any error reported by the engine.
    pub fn submit<E>(&self, engine: &mut E, options: &WriteOptions) -> CoreResult<SequenceNumber>
    where
        E: StorageEngine + ?Sized,
    {
        let sequence = engine.submit_batch(options, &self.rep)?;
        debug!(%sequence, count = self.count(), bytes = self.rep.len(), "batch submitted");
        Ok(sequence)
    }

    /// Consumes the batch and returns its wire representation.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.rep
    }
}

impl From<WriteBatch> for Bytes {
    fn from(batch: WriteBatch) -> Self {
        Bytes::from(batch.rep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use batchlog_codec::CodecError;
    use batchlog_storage::InMemoryEngine;

    fn records(batch: &WriteBatch) -> Vec<Record> {
        batch
            .new_iterator()
            .collect::<Result<_, _>>()
            .expect("batch should decode")
    }

    #[test]
    fn new_batch_is_header_only() {
        let batch = WriteBatch::new();
        assert_eq!(batch.count(), 0);
        assert!(batch.is_empty());
        assert_eq!(batch.data(), &[0u8; HEADER_SIZE]);
        assert_eq!(batch.header(), [0u8; 8]);
    }

    #[test]
    fn put_delete_merge_in_order() {
        let mut batch = WriteBatch::new();
        batch.put(b"a", b"1");
        batch.delete(b"b");
        batch.merge(b"c", b"2");
        assert_eq!(batch.count(), 3);

        let records = records(&batch);
        assert_eq!(
            records,
            vec![
                Record::Value {
                    partition: PartitionId::DEFAULT,
                    key: Bytes::from_static(b"a"),
                    value: Bytes::from_static(b"1"),
                },
                Record::Deletion {
                    partition: PartitionId::DEFAULT,
                    key: Bytes::from_static(b"b"),
                },
                Record::Merge {
                    partition: PartitionId::DEFAULT,
                    key: Bytes::from_static(b"c"),
                    value: Bytes::from_static(b"2"),
                },
            ]
        );
    }

    #[test]
    fn wire_layout() {
        let mut batch = WriteBatch::new();
        batch.put(b"a", b"1");
        batch.delete(b"b");

        let mut expected = vec![0u8; 8];
        expected.extend_from_slice(&[2, 0, 0, 0]);
        expected.extend_from_slice(&[0x01, 0x01, b'a', 0x01, b'1']);
        expected.extend_from_slice(&[0x00, 0x01, b'b']);
        assert_eq!(batch.serialize(), Bytes::from(expected));
    }

    #[test]
    fn scoped_operations_carry_partition() {
        let logs = PartitionHandle::new(PartitionId::new(7), "logs");
        let mut batch = WriteBatch::new();
        batch.put_scoped(&logs, b"k", b"v");
        batch.merge_scoped(&logs, b"k", b"+1");
        batch.delete_scoped(&logs, b"k");

        let records = records(&batch);
        assert_eq!(records.len(), 3);
        for record in &records {
            assert_eq!(record.partition(), PartitionId::new(7));
        }
        assert_eq!(records[0].kind(), RecordKind::Value);
        assert_eq!(records[1].kind(), RecordKind::Merge);
        assert_eq!(records[2].kind(), RecordKind::Deletion);
    }

    #[test]
    fn scoped_default_partition_is_unscoped_on_the_wire() {
        let mut scoped = WriteBatch::new();
        scoped.put_scoped(&PartitionHandle::default_partition(), b"k", b"v");
        let mut plain = WriteBatch::new();
        plain.put(b"k", b"v");
        assert_eq!(scoped.data(), plain.data());
    }

    #[test]
    fn log_data_is_counted() {
        let mut batch = WriteBatch::new();
        batch.put_log_data(b"blob");
        assert_eq!(batch.count(), 1);
        assert_eq!(
            records(&batch),
            vec![Record::LogData {
                blob: Bytes::from_static(b"blob")
            }]
        );
    }

    #[test]
    fn clear_resets_to_header() {
        let mut batch = WriteBatch::new();
        batch.put(b"a", b"1");
        batch.put(b"b", b"2");
        batch.clear();

        assert_eq!(batch.count(), 0);
        assert_eq!(batch.serialize(), Bytes::from(vec![0u8; HEADER_SIZE]));

        batch.put(b"c", b"3");
        assert_eq!(batch.count(), 1);
    }

    #[test]
    fn clear_zeroes_stamped_header() {
        let mut data = vec![9u8; 8];
        data.extend_from_slice(&[0, 0, 0, 0]);
        let mut batch = WriteBatch::from_bytes(&data);
        assert_eq!(batch.header(), [9u8; 8]);
        batch.clear();
        assert_eq!(batch.header(), [0u8; 8]);
    }

    #[test]
    fn from_bytes_roundtrip() {
        let mut original = WriteBatch::new();
        original.put(b"a", b"1");
        original.delete(b"b");
        original.merge(b"c", b"2");

        let copy = WriteBatch::from_bytes(&original.serialize());
        assert_eq!(copy.count(), 3);
        assert_eq!(records(&copy), records(&original));
    }

    #[test]
    fn from_undersized_bytes_is_empty() {
        for len in 0..HEADER_SIZE {
            let batch = WriteBatch::from_bytes(&vec![0xAB; len]);
            assert_eq!(batch.count(), 0);
            let mut iter = batch.new_iterator();
            assert!(!iter.advance());
            assert!(iter.last_error().is_none());
        }
    }

    #[test]
    fn from_bytes_keeps_declared_count() {
        let mut data = vec![0u8; 8];
        data.extend_from_slice(&[5, 0, 0, 0]);
        let batch = WriteBatch::from_bytes(&data);
        assert_eq!(batch.count(), 5);
        assert!(matches!(
            batch.verify(),
            Err(CoreError::CountMismatch {
                declared: 5,
                actual: 0
            })
        ));
    }

    #[test]
    fn verify_accepts_consistent_batch() {
        let mut batch = WriteBatch::new();
        batch.put(b"k", b"v");
        batch.put_log_data(b"meta");
        assert!(batch.verify().is_ok());
    }

    #[test]
    fn verify_reports_corruption() {
        let mut data = vec![0u8; 8];
        data.extend_from_slice(&[1, 0, 0, 0]);
        data.extend_from_slice(&[0x01, 0x0A, b'a', b'b', b'c']);
        let batch = WriteBatch::from_bytes(&data);
        assert!(matches!(
            batch.verify(),
            Err(CoreError::Codec(CodecError::Truncated { .. }))
        ));
    }

    #[test]
    fn iterator_is_a_snapshot() {
        let mut batch = WriteBatch::new();
        batch.put(b"a", b"1");
        let iter = batch.new_iterator();
        batch.put(b"b", b"2");
        batch.clear();

        assert_eq!(iter.count(), 1);
    }

    #[test]
    fn with_config_reserves_capacity() {
        let batch = WriteBatch::with_config(&BatchConfig::new().reserved_bytes(1024));
        assert!(batch.rep.capacity() >= 1024);
        assert_eq!(batch.size_in_bytes(), HEADER_SIZE);
    }

    #[test]
    fn submit_hands_bytes_to_engine() {
        let mut engine = InMemoryEngine::new();
        let mut batch = WriteBatch::new();
        batch.put(b"a", b"1");
        batch.put(b"b", b"2");

        let first = batch.submit(&mut engine, &WriteOptions::default()).unwrap();
        let second = batch.submit(&mut engine, &WriteOptions::default()).unwrap();
        assert_eq!(first.as_u64(), 1);
        assert_eq!(second.as_u64(), 3);

        let stored = engine.batches();
        assert_eq!(&stored[0].data[8..], &batch.data()[8..]);
        // the batch's own header is untouched
        assert_eq!(batch.header(), [0u8; 8]);
    }

    #[test]
    fn submit_through_trait_object() {
        let mut engine: Box<dyn StorageEngine> = Box::new(InMemoryEngine::new());
        let batch = WriteBatch::new();
        assert!(batch.submit(engine.as_mut(), &WriteOptions::default()).is_ok());
    }

    #[test]
    fn append_record_copies_between_batches() {
        let users = PartitionHandle::new(PartitionId::new(2), "users");
        let mut source = WriteBatch::new();
        source.put_scoped(&users, b"alice", b"admin");
        source.delete(b"bob");
        source.put_log_data(b"note");

        let mut copy = WriteBatch::new();
        for record in records(&source) {
            copy.append_record(&record);
        }
        assert_eq!(copy.data(), source.data());
    }

    #[test]
    fn into_bytes_matches_data() {
        let mut batch = WriteBatch::new();
        batch.delete(b"x");
        let data = batch.data().to_vec();
        assert_eq!(batch.clone().into_bytes(), data);
        assert_eq!(Bytes::from(batch), Bytes::from(data));
    }
}
