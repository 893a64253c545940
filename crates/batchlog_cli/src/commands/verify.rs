//! Verify command implementation.

use super::{load_input, CliError};
use batchlog_codec::HEADER_SIZE;
use batchlog_core::WriteBatch;
use std::path::Path;

/// Verification result.
#[derive(Debug, Default)]
pub struct VerifyResult {
    /// Number of records declared in the header.
    pub declared: u32,
    /// List of errors found.
    pub errors: Vec<String>,
}

impl VerifyResult {
    fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Runs the verify command.
pub fn run(path: &Path, hex: bool) -> Result<(), Box<dyn std::error::Error>> {
    println!("Verifying batch at {:?}", path);
    println!();

    let data = load_input(path, hex)?;
    let result = verify_bytes(&data);

    println!("Declared records: {}", result.declared);
    for error in &result.errors {
        println!("  - {}", error);
    }

    println!();
    if result.is_ok() {
        println!("✓ Batch verification passed");
        Ok(())
    } else {
        println!("✗ Batch verification failed");
        Err(CliError::VerificationFailed.into())
    }
}

/// Checks raw batch bytes.
///
/// Unlike [`WriteBatch::from_bytes`], input shorter than a header is an
/// error here.
pub fn verify_bytes(data: &[u8]) -> VerifyResult {
    let mut result = VerifyResult::default();

    if data.len() < HEADER_SIZE {
        result.errors.push(format!(
            "input is {} bytes, shorter than the {}-byte header",
            data.len(),
            HEADER_SIZE
        ));
        return result;
    }

    let batch = WriteBatch::from_bytes(data);
    result.declared = batch.count();
    if let Err(e) = batch.verify() {
        result.errors.push(e.to_string());
    }

    result
}
