//! Batch header layout.
//!
//! ```text
//! | opaque (8) | count u32 LE (4) | frames... |
//! ```
//!
//! The opaque region belongs to the storage engine, which stamps a
//! little-endian sequence number there. Nothing in this crate interprets it.

/// Size of the opaque header region.
pub const OPAQUE_LEN: usize = 8;

/// Offset of the record count field.
pub const COUNT_OFFSET: usize = OPAQUE_LEN;

/// Total header size; frames start here.
pub const HEADER_SIZE: usize = COUNT_OFFSET + 4;

/// Reads the declared record count, or `None` if `data` is shorter than a
/// header.
#[must_use]
pub fn read_count(data: &[u8]) -> Option<u32> {
    let bytes = data.get(COUNT_OFFSET..HEADER_SIZE)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Writes the record count. `data` must hold at least a header.
pub fn write_count(data: &mut [u8], count: u32) {
    data[COUNT_OFFSET..HEADER_SIZE].copy_from_slice(&count.to_le_bytes());
}

/// Reads the opaque region as a little-endian sequence number.
#[must_use]
pub fn read_sequence(data: &[u8]) -> Option<u64> {
    let bytes: [u8; OPAQUE_LEN] = data.get(..OPAQUE_LEN)?.try_into().ok()?;
    Some(u64::from_le_bytes(bytes))
}

/// Stamps a sequence number into the opaque region. `data` must hold at
/// least a header.
pub fn write_sequence(data: &mut [u8], sequence: u64) {
    data[..OPAQUE_LEN].copy_from_slice(&sequence.to_le_bytes());
}
