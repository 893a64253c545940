//! Golden wire vectors.
//!
//! Fixed byte sequences that pin down the varint encoding and the batch
//! layout. Any change to these is a wire-format break.

/// A varint and its exact encoding.
#[derive(Debug, Clone)]
pub struct VarintVector {
    /// The integer.
    pub value: u64,
    /// Expected encoding (hex).
    pub expected_hex: &'static str,
}

/// A whole batch and its exact encoding.
#[derive(Debug, Clone)]
pub struct BatchVector {
    /// Description of the test case.
    pub description: &'static str,
    /// Expected batch bytes (hex).
    pub expected_hex: &'static str,
}

/// Standard varint vectors.
#[must_use]
pub fn varint_vectors() -> Vec<VarintVector> {
    vec![
        VarintVector {
            value: 0,
            expected_hex: "00",
        },
        VarintVector {
            value: 1,
            expected_hex: "01",
        },
        VarintVector {
            value: 127,
            expected_hex: "7f",
        },
        VarintVector {
            value: 128,
            expected_hex: "8001",
        },
        VarintVector {
            value: 300,
            expected_hex: "ac02",
        },
        VarintVector {
            value: 16_383,
            expected_hex: "ff7f",
        },
        VarintVector {
            value: 16_384,
            expected_hex: "808001",
        },
        VarintVector {
            value: u64::from(u32::MAX),
            expected_hex: "ffffffff0f",
        },
        VarintVector {
            value: 1 << 63,
            expected_hex: "80808080808080808001",
        },
        VarintVector {
            value: u64::MAX,
            expected_hex: "ffffffffffffffffff01",
        },
    ]
}

/// Header-only batch.
pub const EMPTY_BATCH: BatchVector = BatchVector {
    description: "empty batch",
    expected_hex: "0000000000000000 00000000",
};

/// `put("a","1")`, `delete("b")`, `merge("c","2")`.
pub const PUT_DELETE_MERGE: BatchVector = BatchVector {
    description: "put a=1, delete b, merge c=2",
    expected_hex: "0000000000000000 03000000 0101610131 000162 0201630132",
};

/// `put_scoped(partition 1, "k","v")`, `put_log_data("x")`.
pub const SCOPED_AND_LOG_DATA: BatchVector = BatchVector {
    description: "scoped put in partition 1, log data",
    expected_hex: "0000000000000000 02000000 0501016b0176 030178",
};

/// Encodes bytes as hexadecimal string.
#[must_use]
pub fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Decodes a hexadecimal string to bytes, ignoring whitespace.
///
/// # Panics
///
/// Panics on non-hex input; intended for test fixtures.
#[must_use]
pub fn hex_decode(hex: &str) -> Vec<u8> {
    let hex: String = hex.chars().filter(|c| !c.is_whitespace()).collect();
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).expect("Invalid hex"))
        .collect()
}
