//! Dump command implementation.

use super::{display_bytes, load_input};
use batchlog_codec::Record;
use batchlog_core::WriteBatch;
use serde::Serialize;
use std::path::Path;

/// Record representation for output.
#[derive(Debug, Serialize)]
pub struct RecordInfo {
    /// Offset of the frame within the batch.
    pub offset: usize,
    /// Record kind.
    pub kind: String,
    /// Partition id (absent for log data).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition: Option<u32>,
    /// Key, or the blob for log data.
    pub key: String,
    /// Value (if applicable).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl RecordInfo {
    fn new(offset: usize, record: &Record) -> Self {
        let partition = match record {
            Record::LogData { .. } => None,
            _ => Some(record.partition().as_u32()),
        };
        Self {
            offset,
            kind: record.kind().to_string(),
            partition,
            key: display_bytes(record.key()),
            value: record.value().map(|v| display_bytes(v)),
        }
    }
}

/// Everything `dump` found in a batch.
#[derive(Debug, Serialize)]
pub struct DumpResult {
    /// Decoded records, in order.
    pub records: Vec<RecordInfo>,
    /// Decode error that stopped the dump, with its offset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Runs the dump command.
pub fn run(
    path: &Path,
    hex: bool,
    limit: Option<usize>,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = load_input(path, hex)?;
    let result = dump_records(&WriteBatch::from_bytes(&data), limit);

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

/// Decodes up to `limit` records from `batch`.
pub fn dump_records(batch: &WriteBatch, limit: Option<usize>) -> DumpResult {
    let max_records = limit.unwrap_or(usize::MAX);
    let mut iter = batch.new_iterator();
    let mut records = Vec::new();

    while records.len() < max_records {
        let offset = iter.offset();
        if !iter.advance() {
            break;
        }
        if let Some(record) = iter.current() {
            records.push(RecordInfo::new(offset, record));
        }
    }

    let error = iter
        .last_error()
        .map(|e| format!("at offset {}: {}", iter.offset(), e));

    DumpResult { records, error }
}

fn print_text_output(result: &DumpResult) {
    println!("Batch Records ({} shown)", result.records.len());
    println!("================");
    println!();

    for record in &result.records {
        print!("[{:08}] {:8}", record.offset, record.kind);

        if let Some(partition) = record.partition {
            print!(" partition={}", partition);
        }
        print!(" key={}", record.key);
        if let Some(ref value) = record.value {
            print!(" value={}", value);
        }

        println!();
    }

    if let Some(ref error) = result.error {
        println!();
        println!("✗ Decoding stopped {}", error);
    }
}
