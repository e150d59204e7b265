//! CSV to JSON conversion module
//!
//! This module contains the core conversion logic, configuration, and statistics.

pub mod config;
pub mod engine;
pub mod stats;

pub use config::{ConversionConfig, DelimiterType, RowPolicy};

pub use engine::{
    convert_csv_to_json, run_conversion, ConversionEngine, ConversionOutcome, ConversionSummary,
    LoadedTable,
};
pub use stats::ConversionStatistics;

/// Result type for conversion operations
pub use crate::error::ConversionResult;
