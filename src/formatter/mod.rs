//! JSON rendering of records

use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};
use crate::table::Record;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// Renders record sequences as an indented JSON array.
///
/// Non-ASCII text is written as-is; only the escapes JSON requires
/// (quotes, backslashes, control characters) are applied.
pub struct JsonFormatter {
    indent: Vec<u8>,
}

impl JsonFormatter {
    /// Create a formatter with `indent_size` spaces per level
    pub fn new(indent_size: u8) -> Self {
        Self {
            indent: vec![b' '; indent_size as usize],
        }
    }

    /// Format records as a JSON array
    pub fn format(&self, records: &[Record]) -> ConversionResult<String> {
        let mut buf = Vec::with_capacity(records.len() * 256);
        let formatter = PrettyFormatter::with_indent(&self.indent);
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);

        records.serialize(&mut serializer).map_err(|e| {
            ConversionError::write(ConversionErrorKind::io(
                format!("Failed to serialize records: {}", e),
                None,
            ))
            .with_source(e)
        })?;

        // serde_json only emits valid UTF-8
        String::from_utf8(buf).map_err(|e| {
            ConversionError::write(ConversionErrorKind::io(e.to_string(), None)).with_source(e)
        })
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new(4)
    }
}

/// Format records with the given indentation
pub fn format_records(records: &[Record], indent_size: u8) -> ConversionResult<String> {
    JsonFormatter::new(indent_size).format(records)
}
