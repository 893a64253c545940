//! CLI command implementations.

pub mod dump;
pub mod inspect;
pub mod verify;

use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors raised by the CLI itself.
#[derive(Debug, Error)]
pub enum CliError {
    /// The input file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path of the input file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Hex input contained a non-hex character.
    #[error("invalid hex digit {found:?} at position {position}")]
    InvalidHex {
        /// Character that was not a hex digit.
        found: char,
        /// Position among the non-whitespace characters.
        position: usize,
    },

    /// Hex input had an odd number of digits.
    #[error("hex input has an odd number of digits")]
    OddHexLength,

    /// The batch failed verification.
    #[error("verification failed")]
    VerificationFailed,
}

/// Reads a batch file as raw bytes, or as hex text when `hex` is set.
pub fn load_input(path: &Path, hex: bool) -> Result<Vec<u8>, CliError> {
    let raw = fs::read(path).map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let data = if hex { decode_hex(&raw)? } else { raw };
    debug!(path = %path.display(), bytes = data.len(), hex, "loaded batch input");
    Ok(data)
}

/// Decodes hex text, ignoring ASCII whitespace.
pub fn decode_hex(text: &[u8]) -> Result<Vec<u8>, CliError> {
    let digits: Vec<u8> = text
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    if digits.len() % 2 != 0 {
        return Err(CliError::OddHexLength);
    }

    let nibble = |position: usize| -> Result<u8, CliError> {
        let c = char::from(digits[position]);
        c.to_digit(16)
            .map(|d| d as u8)
            .ok_or(CliError::InvalidHex { found: c, position })
    };

    (0..digits.len())
        .step_by(2)
        .map(|i| Ok((nibble(i)? << 4) | nibble(i + 1)?))
        .collect()
}

pub(crate) fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Renders a byte slice for humans: printable ASCII verbatim, anything
/// else as `0x`-prefixed hex.
pub(crate) fn display_bytes(bytes: &[u8]) -> String {
    if bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
        String::from_utf8_lossy(bytes).into_owned()
    } else {
        format!("0x{}", hex_encode(bytes))
    }
}
