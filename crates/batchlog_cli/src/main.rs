//! Batchlog CLI
//!
//! Command-line tools for looking inside serialized write batches.
//!
//! # Commands
//!
//! - `dump` - Print every record in a batch
//! - `inspect` - Display header, counts and size
//! - `verify` - Check that a batch decodes cleanly and its count matches
//! - `version` - Show version information

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Batchlog command-line batch tools.
#[derive(Parser)]
#[command(name = "batchlog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every record in a batch
    Dump {
        /// File holding the batch
        file: PathBuf,

        /// Treat the file as hex text instead of raw bytes
        #[arg(long)]
        hex: bool,

        /// Maximum number of records to print
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Display header, declared and decoded counts, and size
    Inspect {
        /// File holding the batch
        file: PathBuf,

        /// Treat the file as hex text instead of raw bytes
        #[arg(long)]
        hex: bool,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Verify that a batch decodes and its header count matches
    Verify {
        /// File holding the batch
        file: PathBuf,

        /// Treat the file as hex text instead of raw bytes
        #[arg(long)]
        hex: bool,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Dump {
            file,
            hex,
            limit,
            format,
        } => {
            commands::dump::run(&file, hex, limit, &format)?;
        }
        Commands::Inspect { file, hex, format } => {
            commands::inspect::run(&file, hex, &format)?;
        }
        Commands::Verify { file, hex } => {
            commands::verify::run(&file, hex)?;
        }
        Commands::Version => {
            println!("Batchlog CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("Batchlog Core v{}", batchlog_core::VERSION);
        }
    }

    Ok(())
}
