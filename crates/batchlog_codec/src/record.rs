//! Record frames.
//!
//! ```text
//! | tag (1) | [partition varint] | key len varint | key | [value len varint | value] |
//! ```
//!
//! The partition id is present only for scoped tags, the value segment only
//! for `Value` and `Merge` kinds.

use std::fmt;

use bytes::{BufMut, Bytes};

use crate::error::{CodecError, CodecResult};
use crate::varint::{decode_varint, encode_varint, encoded_len};

/// Identifier of a partition (column family) inside the storage engine.
///
/// Id `0` is the default partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PartitionId(pub u32);

impl PartitionId {
    /// The default partition.
    pub const DEFAULT: Self = Self(0);

    /// Creates a new partition ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Returns `true` for the default partition.
    #[must_use]
    pub const fn is_default(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for PartitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "partition:{}", self.0)
    }
}

/// Kind of operation carried by a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// Delete a key.
    Deletion,
    /// Write a key/value pair.
    Value,
    /// Merge an operand into a key.
    Merge,
    /// Out-of-band blob that is not a key/value operation.
    LogData,
}

impl RecordKind {
    /// Returns `true` if frames of this kind carry a value segment.
    #[must_use]
    pub const fn has_value(self) -> bool {
        matches!(self, Self::Value | Self::Merge)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Deletion => "DELETE",
            Self::Value => "PUT",
            Self::Merge => "MERGE",
            Self::LogData => "LOG_DATA",
        };
        f.write_str(name)
    }
}

/// Tag byte at the start of every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RecordTag {
    /// Deletion in the default partition.
    Deletion = 0x0,
    /// Value in the default partition.
    Value = 0x1,
    /// Merge in the default partition.
    Merge = 0x2,
    /// Log data blob.
    LogData = 0x3,
    /// Deletion in an explicit partition.
    PartitionDeletion = 0x4,
    /// Value in an explicit partition.
    PartitionValue = 0x5,
    /// Merge in an explicit partition.
    PartitionMerge = 0x6,
}

impl RecordTag {
    /// Converts a byte to a record tag.
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0x0 => Some(Self::Deletion),
            0x1 => Some(Self::Value),
            0x2 => Some(Self::Merge),
            0x3 => Some(Self::LogData),
            0x4 => Some(Self::PartitionDeletion),
            0x5 => Some(Self::PartitionValue),
            0x6 => Some(Self::PartitionMerge),
            _ => None,
        }
    }

    /// Converts the tag to a byte.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    /// Picks the tag for a kind and partition. Writes to the default
    /// partition use the unscoped tags.
    #[must_use]
    pub const fn for_kind(kind: RecordKind, partition: PartitionId) -> Self {
        match (kind, partition.is_default()) {
            (RecordKind::Deletion, true) => Self::Deletion,
            (RecordKind::Value, true) => Self::Value,
            (RecordKind::Merge, true) => Self::Merge,
            (RecordKind::Deletion, false) => Self::PartitionDeletion,
            (RecordKind::Value, false) => Self::PartitionValue,
            (RecordKind::Merge, false) => Self::PartitionMerge,
            (RecordKind::LogData, _) => Self::LogData,
        }
    }

    /// The operation kind this tag encodes.
    #[must_use]
    pub const fn kind(self) -> RecordKind {
        match self {
            Self::Deletion | Self::PartitionDeletion => RecordKind::Deletion,
            Self::Value | Self::PartitionValue => RecordKind::Value,
            Self::Merge | Self::PartitionMerge => RecordKind::Merge,
            Self::LogData => RecordKind::LogData,
        }
    }

    /// Returns `true` if a partition id follows the tag.
    #[must_use]
    pub const fn is_scoped(self) -> bool {
        matches!(
            self,
            Self::PartitionDeletion | Self::PartitionValue | Self::PartitionMerge
        )
    }
}

/// One decoded batch operation.
///
/// Byte fields are [`Bytes`] views into the buffer the record was decoded
/// from; decoding never copies key or value data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// Write `value` under `key`.
    Value {
        /// Target partition.
        partition: PartitionId,
        /// Key bytes.
        key: Bytes,
        /// Value bytes.
        value: Bytes,
    },

    /// Delete `key`.
    Deletion {
        /// Target partition.
        partition: PartitionId,
        /// Key bytes.
        key: Bytes,
    },

    /// Merge `value` into `key`.
    Merge {
        /// Target partition.
        partition: PartitionId,
        /// Key bytes.
        key: Bytes,
        /// Merge operand.
        value: Bytes,
    },

    /// Opaque blob carried alongside the batch.
    LogData {
        /// Blob bytes.
        blob: Bytes,
    },
}

impl Record {
    /// Returns the operation kind.
    #[must_use]
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Value { .. } => RecordKind::Value,
            Self::Deletion { .. } => RecordKind::Deletion,
            Self::Merge { .. } => RecordKind::Merge,
            Self::LogData { .. } => RecordKind::LogData,
        }
    }

    /// Returns the tag this record is framed with.
    #[must_use]
    pub fn tag(&self) -> RecordTag {
        RecordTag::for_kind(self.kind(), self.partition())
    }

    /// Target partition; log data always reports the default partition.
    #[must_use]
    pub fn partition(&self) -> PartitionId {
        match self {
            Self::Value { partition, .. }
            | Self::Deletion { partition, .. }
            | Self::Merge { partition, .. } => *partition,
            Self::LogData { .. } => PartitionId::DEFAULT,
        }
    }

    /// Key bytes, or the blob for log data.
    #[must_use]
    pub fn key(&self) -> &Bytes {
        match self {
            Self::Value { key, .. } | Self::Deletion { key, .. } | Self::Merge { key, .. } => key,
            Self::LogData { blob } => blob,
        }
    }

    /// Value bytes for `Value` and `Merge` records.
    #[must_use]
    pub fn value(&self) -> Option<&Bytes> {
        match self {
            Self::Value { value, .. } | Self::Merge { value, .. } => Some(value),
            Self::Deletion { .. } | Self::LogData { .. } => None,
        }
    }

    /// Number of bytes [`Record::encode_into`] writes.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        frame_len(
            self.kind(),
            self.partition(),
            self.key(),
            self.value().map_or(&[][..], |v| &v[..]),
        )
    }

    /// Appends this record's frame to `buf`.
    pub fn encode_into<B: BufMut>(&self, buf: &mut B) {
        let value = self.value().map_or(&[][..], |v| &v[..]);
        encode_frame(buf, self.kind(), self.partition(), self.key(), value);
    }

    /// Encodes this record as a standalone frame.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.encode_into(&mut buf);
        buf
    }
}

/// Appends one frame without building a [`Record`].
///
/// `value` is ignored for kinds without a value segment and `partition` is
/// ignored for log data.
pub fn encode_frame<B: BufMut>(
    buf: &mut B,
    kind: RecordKind,
    partition: PartitionId,
    key: &[u8],
    value: &[u8],
) {
    let tag = RecordTag::for_kind(kind, partition);
    buf.put_u8(tag.as_byte());
    if tag.is_scoped() {
        encode_varint(u64::from(partition.as_u32()), buf);
    }
    encode_varint(key.len() as u64, buf);
    buf.put_slice(key);
    if kind.has_value() {
        encode_varint(value.len() as u64, buf);
        buf.put_slice(value);
    }
}

/// Size of the frame [`encode_frame`] would write.
#[must_use]
pub fn frame_len(kind: RecordKind, partition: PartitionId, key: &[u8], value: &[u8]) -> usize {
    let tag = RecordTag::for_kind(kind, partition);
    let mut len = 1 + encoded_len(key.len() as u64) + key.len();
    if tag.is_scoped() {
        len += encoded_len(u64::from(partition.as_u32()));
    }
    if kind.has_value() {
        len += encoded_len(value.len() as u64) + value.len();
    }
    len
}

/// Decodes the frame starting at `offset` in `buf`.
///
/// Returns the record and the number of bytes the frame occupies. Key and
/// value fields are slices of `buf`.
///
/// # Errors
///
/// - [`CodecError::UnknownTag`] for an unrecognized tag byte.
/// - [`CodecError::Truncated`] if a segment declares more bytes than remain
///   (including a missing tag byte at `offset == buf.len()`).
/// - [`CodecError::InsufficientData`] / [`CodecError::VarintOverflow`] for
///   bad length or partition varints.
/// - [`CodecError::PartitionOutOfRange`] for a partition id above `u32::MAX`.
pub fn decode_record(buf: &Bytes, offset: usize) -> CodecResult<(Record, usize)> {
    let mut pos = offset;

    let Some(&tag_byte) = buf.get(pos) else {
        return Err(CodecError::truncated(offset, 1, 0));
    };
    let tag = RecordTag::from_byte(tag_byte).ok_or(CodecError::unknown_tag(tag_byte, offset))?;
    pos += 1;

    let partition = if tag.is_scoped() {
        let (raw, n) = decode_varint(&buf[pos..])?;
        pos += n;
        let id = u32::try_from(raw).map_err(|_| CodecError::PartitionOutOfRange { value: raw })?;
        PartitionId::new(id)
    } else {
        PartitionId::DEFAULT
    };

    let key = read_segment(buf, offset, &mut pos)?;

    let record = match tag.kind() {
        RecordKind::Deletion => Record::Deletion { partition, key },
        RecordKind::Value => {
            let value = read_segment(buf, offset, &mut pos)?;
            Record::Value {
                partition,
                key,
                value,
            }
        }
        RecordKind::Merge => {
            let value = read_segment(buf, offset, &mut pos)?;
            Record::Merge {
                partition,
                key,
                value,
            }
        }
        RecordKind::LogData => Record::LogData { blob: key },
    };

    Ok((record, pos - offset))
}

/// Reads one varint-length-prefixed segment at `*pos`, advancing it.
fn read_segment(buf: &Bytes, frame_offset: usize, pos: &mut usize) -> CodecResult<Bytes> {
    let (declared, n) = decode_varint(&buf[*pos..])?;
    let start = *pos + n;
    let available = buf.len() - start;

    let len = match usize::try_from(declared) {
        Ok(len) if len <= available => len,
        _ => return Err(CodecError::truncated(frame_offset, declared, available)),
    };

    *pos = start + len;
    Ok(buf.slice(start..start + len))
}
