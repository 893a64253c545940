//! Property tests across codec, core and storage.

use batchlog_codec::{decode_varint, varint_bytes, Record};
use batchlog_core::{IteratorState, WriteBatch};
use batchlog_storage::{InMemoryEngine, StorageEngine, WriteOptions};
use batchlog_testkit::prelude::*;
use proptest::prelude::*;

fn decode_all(batch: &WriteBatch) -> Vec<Record> {
    batch
        .new_iterator()
        .collect::<Result<_, _>>()
        .expect("generated batch should decode")
}

proptest! {
    #![proptest_config(PropTestConfig::default().to_proptest_config())]

    #[test]
    fn batch_roundtrip_preserves_every_operation(ops in op_sequence_strategy(0, 40)) {
        let batch = build_batch(&ops);
        prop_assert_eq!(batch.count() as usize, ops.len());

        let expected: Vec<Record> = ops.iter().map(BatchOp::expected_record).collect();
        prop_assert_eq!(decode_all(&batch), expected);
    }

    #[test]
    fn serialized_bytes_rebuild_identical_batch(ops in op_sequence_strategy(0, 20)) {
        let batch = build_batch(&ops);
        let copy = WriteBatch::from_bytes(&batch.serialize());
        prop_assert_eq!(copy.count(), batch.count());
        prop_assert_eq!(decode_all(&copy), decode_all(&batch));
        prop_assert!(copy.verify().is_ok());
    }

    #[test]
    fn every_strict_prefix_of_a_frame_fails(ops in op_sequence_strategy(1, 4)) {
        let batch = build_batch(&ops);
        let data = batch.data();
        let complete = WriteBatch::from_bytes(data);
        prop_assert!(complete.verify().is_ok());

        // cutting inside the last frame must surface a truncation error
        let last_len = ops.last().unwrap().expected_record().encoded_len();
        for cut in (data.len() - last_len + 1)..data.len() {
            let mut iter = WriteBatch::from_bytes(&data[..cut]).new_iterator();
            while iter.advance() {}
            prop_assert_eq!(iter.state(), IteratorState::Failed);
            prop_assert!(iter.last_error().unwrap().is_truncation());
        }
    }

    #[test]
    fn varint_roundtrip(value in any::<u64>()) {
        let bytes = varint_bytes(value);
        prop_assert_eq!(decode_varint(&bytes).unwrap(), (value, bytes.len()));
    }

    #[test]
    fn arbitrary_bytes_never_panic(data in prop::collection::vec(any::<u8>(), 0..256)) {
        fuzz_varint_decode(&data);
        fuzz_batch_decode(&data);
        fuzz_batch_reencode(&data);
    }

    #[test]
    fn header_prefixed_garbage_never_panics(frames in prop::collection::vec(any::<u8>(), 0..128)) {
        let mut data = vec![0u8; 12];
        data.extend_from_slice(&frames);
        fuzz_batch_decode(&data);
        fuzz_batch_reencode(&data);
    }

    #[test]
    fn engine_sequences_advance_by_count(sizes in prop::collection::vec(0usize..5, 1..10)) {
        let mut engine = InMemoryEngine::new();
        let mut expected = 1u64;
        for size in sizes {
            let mut batch = WriteBatch::new();
            for i in 0..size {
                batch.put(&[i as u8], b"v");
            }
            let seq = batch.submit(&mut engine, &WriteOptions::default()).unwrap();
            prop_assert_eq!(seq.as_u64(), expected);
            expected += size.max(1) as u64;
        }
        prop_assert_eq!(engine.list_partitions().unwrap().len(), 1);
    }
}
