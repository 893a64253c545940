//! Error types for the codec crate.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while decoding batch bytes.
///
/// Encoding is infallible; every variant here describes malformed or
/// incomplete input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The buffer ended before a varint's terminating byte.
    #[error("insufficient data: varint truncated mid-encoding")]
    InsufficientData,

    /// A varint ran past ten bytes or overflowed 64 bits.
    #[error("malformed varint: value does not fit in 64 bits")]
    VarintOverflow,

    /// A length-prefixed segment declares more bytes than remain.
    #[error("truncated record at offset {offset}: segment declares {declared} bytes, {available} available")]
    Truncated {
        /// Offset of the record frame that failed to decode.
        offset: usize,
        /// Segment length declared by the frame.
        declared: u64,
        /// Bytes actually remaining after the length prefix.
        available: usize,
    },

    /// The record tag byte is not a recognized record kind.
    #[error("unknown record tag 0x{tag:02x} at offset {offset}")]
    UnknownTag {
        /// The unrecognized tag byte.
        tag: u8,
        /// Offset of the record frame.
        offset: usize,
    },

    /// A scoped frame carries a partition id wider than 32 bits.
    #[error("partition id {value} out of range")]
    PartitionOutOfRange {
        /// The decoded partition id.
        value: u64,
    },
}

impl CodecError {
    /// Create a truncated-segment error.
    pub fn truncated(offset: usize, declared: u64, available: usize) -> Self {
        Self::Truncated {
            offset,
            declared,
            available,
        }
    }

    /// Create an unknown-tag error.
    pub fn unknown_tag(tag: u8, offset: usize) -> Self {
        Self::UnknownTag { tag, offset }
    }

    /// Returns `true` if the error was caused by input ending early rather
    /// than by bytes that could never be valid.
    #[must_use]
    pub fn is_truncation(&self) -> bool {
        matches!(self, Self::InsufficientData | Self::Truncated { .. })
    }
}
