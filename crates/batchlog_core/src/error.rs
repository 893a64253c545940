//! Error types for batchlog core.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in batchlog core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Storage engine error.
    #[error("storage error: {0}")]
    Storage(#[from] batchlog_storage::StorageError),

    /// Batch bytes failed to decode.
    #[error("codec error: {0}")]
    Codec(#[from] batchlog_codec::CodecError),

    /// The header count disagrees with the frames present.
    #[error("record count mismatch: header declares {declared}, found {actual}")]
    CountMismatch {
        /// Count stored in the header.
        declared: u32,
        /// Number of frames decoded.
        actual: u64,
    },
}

impl CoreError {
    /// Creates a count mismatch error.
    pub fn count_mismatch(declared: u32, actual: u64) -> Self {
        Self::CountMismatch { declared, actual }
    }
}
