//! # Batchlog Testkit
//!
//! Test utilities for batchlog.
//!
//! This crate provides:
//! - Property-based test generators using proptest
//! - Golden wire vectors for format verification
//! - Fuzz testing harnesses
//!
//! ## Usage
//!
//! ```rust
//! use batchlog_testkit::prelude::*;
//!
//! let ops = vec![BatchOp::LogData { blob: b"x".to_vec() }];
//! let batch = build_batch(&ops);
//! assert_eq!(batch.count(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fuzz;
pub mod generators;
pub mod golden;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fuzz::*;
    pub use crate::generators::*;
    pub use crate::golden::{hex_decode, hex_encode};
}

pub use fuzz::*;
pub use generators::*;
pub use golden::{hex_decode, hex_encode};
