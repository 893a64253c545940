//! Batch configuration.

use batchlog_codec::HEADER_SIZE;

/// Configuration for creating a write batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Bytes to reserve up front for the batch buffer, header included.
    pub reserved_bytes: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            reserved_bytes: HEADER_SIZE,
        }
    }
}

impl BatchConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of bytes to reserve.
    #[must_use]
    pub const fn reserved_bytes(mut self, bytes: usize) -> Self {
        self.reserved_bytes = bytes;
        self
    }
}
