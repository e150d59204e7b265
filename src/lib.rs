//! Accident hotspot CSV to JSON converter
//!
//! Reads a delimited export (by default cp949-encoded), optionally renames
//! its Korean headers to English identifiers, and writes the rows as an
//! indented UTF-8 JSON array.

pub mod cli;
pub mod conversion;
pub mod error;
pub mod formatter;
pub mod mapping;
pub mod parser;
pub mod table;

// Re-export commonly used types
pub use conversion::{
    convert_csv_to_json, run_conversion, ConversionConfig, ConversionEngine, ConversionOutcome,
    ConversionSummary,
};
pub use error::{ConversionError, ConversionErrorKind, ConversionResult, Phase};
pub use formatter::JsonFormatter;
pub use mapping::ColumnMap;
pub use parser::encoding::TextEncoding;
pub use parser::CsvSource;
pub use table::{Record, Table};

/// Convert `input` to `output` with the default hotspot settings
pub fn convert(
    input: impl Into<std::path::PathBuf>,
    output: impl Into<std::path::PathBuf>,
) -> ConversionOutcome {
    run_conversion(&ConversionConfig::for_paths(input, output))
}
