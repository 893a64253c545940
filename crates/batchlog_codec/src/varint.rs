//! Base-128 variable-length integers.
//!
//! Each byte carries seven value bits, least significant group first. The
//! high bit of every byte except the last is set.
//!
//! | Value       | Encoding        |
//! |-------------|-----------------|
//! | 0           | `00`            |
//! | 127         | `7f`            |
//! | 128         | `80 01`         |
//! | 300         | `ac 02`         |
//! | `u64::MAX`  | `ff` x9, `01`   |

use bytes::BufMut;

use crate::error::{CodecError, CodecResult};

/// Longest possible encoding of a `u64`.
pub const MAX_VARINT_LEN: usize = 10;

const CONTINUATION: u8 = 0x80;
const PAYLOAD_MASK: u8 = 0x7f;

/// Appends the varint encoding of `value` to `buf`.
pub fn encode_varint<B: BufMut>(mut value: u64, buf: &mut B) {
    while value >= u64::from(CONTINUATION) {
        buf.put_u8((value as u8 & PAYLOAD_MASK) | CONTINUATION);
        value >>= 7;
    }
    buf.put_u8(value as u8);
}

/// Returns the varint encoding of `value` as a fresh vector.
#[must_use]
pub fn varint_bytes(value: u64) -> Vec<u8> {
    let mut buf = Vec::with_capacity(encoded_len(value));
    encode_varint(value, &mut buf);
    buf
}

/// Number of bytes [`encode_varint`] writes for `value`.
#[must_use]
pub const fn encoded_len(value: u64) -> usize {
    let bits = 64 - (value | 1).leading_zeros() as usize;
    (bits + 6) / 7
}

/// Decodes a varint from the front of `buf`.
///
/// Returns the value and the number of bytes consumed. Never reads past
/// `buf.len()`.
///
/// # Errors
///
/// - [`CodecError::InsufficientData`] if `buf` ends before a byte with the
///   continuation bit clear.
/// - [`CodecError::VarintOverflow`] if the encoding needs more than ten bytes
///   or the tenth byte carries bits beyond the 64th.
pub fn decode_varint(buf: &[u8]) -> CodecResult<(u64, usize)> {
    let mut value = 0u64;

    for (i, &byte) in buf.iter().take(MAX_VARINT_LEN).enumerate() {
        let payload = u64::from(byte & PAYLOAD_MASK);
        // the tenth group only has room for bit 63
        if i == MAX_VARINT_LEN - 1 && payload > 1 {
            return Err(CodecError::VarintOverflow);
        }
        value |= payload << (7 * i);
        if byte & CONTINUATION == 0 {
            return Ok((value, i + 1));
        }
    }

    if buf.len() >= MAX_VARINT_LEN {
        Err(CodecError::VarintOverflow)
    } else {
        Err(CodecError::InsufficientData)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BOUNDARIES: [u64; 8] = [
        0,
        127,
        128,
        16_383,
        16_384,
        (1 << 32) - 1,
        1 << 63,
        u64::MAX,
    ];

    #[test]
    fn boundary_values_roundtrip() {
        for value in BOUNDARIES {
            let bytes = varint_bytes(value);
            assert_eq!(bytes.len(), encoded_len(value), "length for {value}");
            assert_eq!(decode_varint(&bytes).unwrap(), (value, bytes.len()));
        }
    }

    #[test]
    fn encode_300() {
        assert_eq!(varint_bytes(300), vec![0xAC, 0x02]);
        assert_eq!(decode_varint(&[0xAC, 0x02]).unwrap(), (300, 2));
    }

    #[test]
    fn encoded_len_steps_every_seven_bits() {
        assert_eq!(encoded_len(0), 1);
        assert_eq!(encoded_len(127), 1);
        assert_eq!(encoded_len(128), 2);
        assert_eq!(encoded_len(16_383), 2);
        assert_eq!(encoded_len(16_384), 3);
        assert_eq!(encoded_len(u64::MAX), MAX_VARINT_LEN);
    }

    #[test]
    fn max_value_layout() {
        let bytes = varint_bytes(u64::MAX);
        assert_eq!(&bytes[..9], &[0xFF; 9]);
        assert_eq!(bytes[9], 0x01);
    }

    #[test]
    fn decode_stops_at_terminator() {
        // trailing bytes belong to the caller
        assert_eq!(decode_varint(&[0x05, 0xFF, 0xFF]).unwrap(), (5, 1));
    }

    #[test]
    fn empty_buffer_is_insufficient() {
        assert_eq!(decode_varint(&[]), Err(CodecError::InsufficientData));
    }

    #[test]
    fn continuation_on_last_byte_is_insufficient() {
        assert_eq!(decode_varint(&[0x80]), Err(CodecError::InsufficientData));
        assert_eq!(
            decode_varint(&[0xFF, 0xFF, 0xFF]),
            Err(CodecError::InsufficientData)
        );
    }

    #[test]
    fn eleven_byte_encoding_is_rejected() {
        let mut bytes = vec![0x80; 10];
        bytes.push(0x00);
        assert_eq!(decode_varint(&bytes), Err(CodecError::VarintOverflow));
    }

    #[test]
    fn tenth_byte_overflow_is_rejected() {
        let mut bytes = vec![0xFF; 9];
        bytes.push(0x02);
        assert_eq!(decode_varint(&bytes), Err(CodecError::VarintOverflow));
    }

    #[test]
    fn encode_into_existing_buffer() {
        let mut buf = vec![0xEE];
        encode_varint(128, &mut buf);
        assert_eq!(buf, vec![0xEE, 0x80, 0x01]);
    }

    proptest! {
        #[test]
        fn roundtrip_any_u64(value in any::<u64>()) {
            let bytes = varint_bytes(value);
            prop_assert_eq!(decode_varint(&bytes).unwrap(), (value, bytes.len()));
        }

        #[test]
        fn decode_never_panics(data in prop::collection::vec(any::<u8>(), 0..16)) {
            if let Ok((_, consumed)) = decode_varint(&data) {
                prop_assert!(consumed <= data.len());
                prop_assert!(consumed <= MAX_VARINT_LEN);
            }
        }
    }
}
