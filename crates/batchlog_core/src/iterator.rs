//! Forward-only decoder over batch bytes.
//!
//! A [`BatchIterator`] owns an immutable [`Bytes`] snapshot and decodes one
//! frame per [`BatchIterator::advance`] call. Decoded records hold views into
//! that snapshot, so keys and values are never copied.
//!
//! ## States
//!
//! ```text
//! Ready --advance ok--> Ready | Exhausted (cursor at end)
//! Ready --decode error--> Failed
//! Exhausted, Failed: terminal
//! ```
//!
//! Iteration that stops in `Exhausted` ended cleanly. Iteration that stops in
//! `Failed` hit corrupt or truncated bytes; [`BatchIterator::last_error`]
//! says which.

use std::iter::FusedIterator;

use batchlog_codec::{decode_record, CodecError, CodecResult, Record, HEADER_SIZE};
use bytes::Bytes;
use tracing::{trace, warn};

/// Iterator lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IteratorState {
    /// More frames may follow.
    Ready,
    /// Every frame was decoded.
    Exhausted,
    /// A frame failed to decode.
    Failed,
}

/// A single-pass decoder over a batch snapshot.
///
/// The iterator never mutates the batch it came from; mutate the batch and
/// build a new iterator to observe the change.
///
/// Besides the explicit [`advance`](Self::advance) /
/// [`current`](Self::current) protocol, `BatchIterator` implements
/// [`Iterator`] yielding `CodecResult<Record>`; a decode failure is yielded
/// once as `Err` and iteration then ends.
///
/// # Example
///
/// ```
/// use batchlog_core::WriteBatch;
///
/// let mut batch = WriteBatch::new();
/// batch.put(b"a", b"1");
/// batch.delete(b"b");
///
/// let mut iter = batch.new_iterator();
/// while iter.advance() {
///     let record = iter.current().unwrap();
///     println!("{} {:?}", record.kind(), record.key());
/// }
/// assert!(iter.last_error().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct BatchIterator {
    snapshot: Bytes,
    cursor: usize,
    current: Option<Record>,
    state: IteratorState,
    error: Option<CodecError>,
    error_reported: bool,
}

impl BatchIterator {
    /// Creates an iterator over a serialized batch, positioned past the
    /// header.
    ///
    /// Input no longer than a header yields no records and no error.
    #[must_use]
    pub fn new(snapshot: Bytes) -> Self {
        let state = if snapshot.len() > HEADER_SIZE {
            IteratorState::Ready
        } else {
            IteratorState::Exhausted
        };
        Self {
            cursor: HEADER_SIZE.min(snapshot.len()),
            snapshot,
            current: None,
            state,
            error: None,
            error_reported: false,
        }
    }

    /// Decodes the next record.
    ///
    /// Returns `true` if a record was decoded and is available through
    /// [`current`](Self::current). Returns `false` once the iterator is
    /// exhausted or has failed; further calls have no effect.
    pub fn advance(&mut self) -> bool {
        if self.state != IteratorState::Ready {
            return false;
        }

        match decode_record(&self.snapshot, self.cursor) {
            Ok((record, consumed)) => {
                trace!(offset = self.cursor, kind = %record.kind(), consumed, "decoded record");
                self.cursor += consumed;
                self.current = Some(record);
                if self.cursor == self.snapshot.len() {
                    self.state = IteratorState::Exhausted;
                }
                true
            }
            Err(err) => {
                warn!(offset = self.cursor, error = %err, "batch decode failed");
                self.error = Some(err);
                self.state = IteratorState::Failed;
                false
            }
        }
    }

    /// The most recently decoded record, or `None` before the first
    /// successful [`advance`](Self::advance).
    #[must_use]
    pub fn current(&self) -> Option<&Record> {
        self.current.as_ref()
    }

    /// The decode failure, if the iterator is in [`IteratorState::Failed`].
    #[must_use]
    pub fn last_error(&self) -> Option<&CodecError> {
        self.error.as_ref()
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> IteratorState {
        self.state
    }

    /// Byte offset of the next frame within the snapshot.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.cursor
    }

    /// Bytes not yet decoded.
    #[must_use]
    pub fn remaining(&self) -> &[u8] {
        &self.snapshot[self.cursor..]
    }

    /// The full snapshot this iterator reads.
    #[must_use]
    pub fn snapshot(&self) -> &Bytes {
        &self.snapshot
    }
}

impl Iterator for BatchIterator {
    type Item = CodecResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.advance() {
            return self.current.clone().map(Ok);
        }
        if self.state == IteratorState::Failed && !self.error_reported {
            self.error_reported = true;
            return self.error.clone().map(Err);
        }
        None
    }
}

impl FusedIterator for BatchIterator {}
