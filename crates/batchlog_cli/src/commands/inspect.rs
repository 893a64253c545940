//! Inspect command implementation.

use super::{hex_encode, load_input};
use batchlog_codec::RecordKind;
use batchlog_core::WriteBatch;
use serde::Serialize;
use std::path::Path;

/// Batch inspection result.
#[derive(Debug, Default, Serialize)]
pub struct InspectResult {
    /// Input path.
    pub path: String,
    /// Size of the batch in bytes.
    pub size_bytes: usize,
    /// Opaque header region, hex-encoded.
    pub header: String,
    /// Header region read as a little-endian sequence number.
    pub sequence: u64,
    /// Record count declared in the header.
    pub declared_count: u32,
    /// Records that actually decoded.
    pub decoded_count: usize,
    /// Decoded puts.
    pub puts: usize,
    /// Decoded deletes.
    pub deletes: usize,
    /// Decoded merges.
    pub merges: usize,
    /// Decoded log data blobs.
    pub log_data: usize,
    /// Decoded records scoped to a non-default partition.
    pub scoped: usize,
    /// Decode error, if decoding stopped early.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Runs the inspect command.
pub fn run(path: &Path, hex: bool, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let data = load_input(path, hex)?;
    let mut result = inspect_batch(&WriteBatch::from_bytes(&data));
    result.path = path.display().to_string();

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => {
            print_text_output(&result);
        }
    }

    Ok(())
}

/// Collects header fields and per-kind statistics for `batch`.
pub fn inspect_batch(batch: &WriteBatch) -> InspectResult {
    let header = batch.header();
    let mut result = InspectResult {
        size_bytes: batch.size_in_bytes(),
        header: hex_encode(&header),
        sequence: u64::from_le_bytes(header),
        declared_count: batch.count(),
        ..InspectResult::default()
    };

    for record in batch.new_iterator() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                result.error = Some(e.to_string());
                break;
            }
        };

        result.decoded_count += 1;
        match record.kind() {
            RecordKind::Value => result.puts += 1,
            RecordKind::Deletion => result.deletes += 1,
            RecordKind::Merge => result.merges += 1,
            RecordKind::LogData => result.log_data += 1,
        }
        if record.kind() != RecordKind::LogData && !record.partition().is_default() {
            result.scoped += 1;
        }
    }

    result
}

fn print_text_output(result: &InspectResult) {
    println!("Batch: {}", result.path);
    println!("================");
    println!();
    println!("Size:           {} bytes", result.size_bytes);
    println!("Header:         {}", result.header);
    println!("Sequence:       {}", result.sequence);
    println!("Declared count: {}", result.declared_count);
    println!("Decoded count:  {}", result.decoded_count);
    println!();
    println!("Records:");
    println!("  Puts:     {}", result.puts);
    println!("  Deletes:  {}", result.deletes);
    println!("  Merges:   {}", result.merges);
    println!("  Log data: {}", result.log_data);
    println!("  Scoped:   {}", result.scoped);

    if let Some(ref error) = result.error {
        println!();
        println!("✗ Decoding stopped: {}", error);
    } else if u64::from(result.declared_count) != result.decoded_count as u64 {
        println!();
        println!("✗ Declared count does not match decoded records");
    }
}
