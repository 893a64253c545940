//! # Batchlog Codec
//!
//! Wire format for write batches.
//!
//! A serialized batch is a 12-byte header followed by record frames:
//!
//! ```text
//! | opaque (8) | count u32 LE (4) | frame | frame | ... |
//! ```
//!
//! Each frame is a tag byte and varint-length-prefixed segments. See
//! [`record`] for the frame layout and [`varint`] for the integer encoding.
//!
//! ## Usage
//!
//! ```
//! use batchlog_codec::{decode_record, PartitionId, Record};
//! use bytes::Bytes;
//!
//! let record = Record::Value {
//!     partition: PartitionId::DEFAULT,
//!     key: Bytes::from_static(b"a"),
//!     value: Bytes::from_static(b"1"),
//! };
//! let frame = Bytes::from(record.encode());
//! let (decoded, consumed) = decode_record(&frame, 0).unwrap();
//! assert_eq!(decoded, record);
//! assert_eq!(consumed, frame.len());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
pub mod header;
pub mod record;
pub mod varint;

pub use error::{CodecError, CodecResult};
pub use header::HEADER_SIZE;
pub use record::{
    decode_record, encode_frame, frame_len, PartitionId, Record, RecordKind, RecordTag,
};
pub use varint::{decode_varint, encode_varint, varint_bytes, MAX_VARINT_LEN};
