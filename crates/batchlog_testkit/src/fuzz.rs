//! Fuzz targets.
//!
//! Each target accepts arbitrary bytes and must never panic. They can be
//! driven by cargo-fuzz or by proptest.

use batchlog_codec::{decode_varint, varint_bytes, HEADER_SIZE};
use batchlog_core::{IteratorState, WriteBatch};

/// Fuzz target for varint decoding.
///
/// Successful decodes must consume no more than the input and re-encode to
/// a prefix of it when the encoding is canonical.
pub fn fuzz_varint_decode(data: &[u8]) {
    if let Ok((value, consumed)) = decode_varint(data) {
        assert!(consumed <= data.len());
        let reencoded = varint_bytes(value);
        assert!(reencoded.len() <= consumed);
    }
}

/// Fuzz target for batch iteration.
///
/// Arbitrary bytes are wrapped as a batch and iterated to the end. The
/// iterator must stop in a terminal state, with an error only when it
/// failed, and never move its cursor past the input.
pub fn fuzz_batch_decode(data: &[u8]) {
    let batch = WriteBatch::from_bytes(data);
    let mut iter = batch.new_iterator();
    let mut steps = 0usize;

    while iter.advance() {
        steps += 1;
        assert!(iter.offset() <= batch.size_in_bytes());
        assert!(iter.current().is_some());
    }

    match iter.state() {
        IteratorState::Exhausted => assert!(iter.last_error().is_none()),
        IteratorState::Failed => assert!(iter.last_error().is_some()),
        IteratorState::Ready => panic!("iterator stopped while ready"),
    }

    // every frame is at least two bytes
    assert!(steps <= data.len().saturating_sub(HEADER_SIZE) / 2);
}

/// Fuzz target for batch round-trips.
///
/// Whatever decodes cleanly is re-appended to a fresh batch, which must
/// decode to the same records.
pub fn fuzz_batch_reencode(data: &[u8]) {
    let source = WriteBatch::from_bytes(data);
    let Ok(records) = source.new_iterator().collect::<Result<Vec<_>, _>>() else {
        return;
    };

    let mut rebuilt = WriteBatch::new();
    for record in &records {
        rebuilt.append_record(record);
    }

    let decoded: Vec<_> = rebuilt
        .new_iterator()
        .collect::<Result<_, _>>()
        .expect("rebuilt batch must decode");
    assert_eq!(records, decoded);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_accept_empty_input() {
        fuzz_varint_decode(&[]);
        fuzz_batch_decode(&[]);
        fuzz_batch_reencode(&[]);
    }

    #[test]
    fn targets_accept_garbage() {
        let garbage: Vec<u8> = (0..=255).collect();
        fuzz_varint_decode(&garbage);
        fuzz_batch_decode(&garbage);
        fuzz_batch_reencode(&garbage);
    }
}
