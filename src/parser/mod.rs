//! CSV loading: bytes → decoded text → [`Table`]

pub mod encoding;

use crate::conversion::config::{ConversionConfig, RowPolicy};
use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};
use crate::table::Table;
use std::path::{Path, PathBuf};

/// A CSV file on disk
#[derive(Debug, Clone, PartialEq)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the source exists and is a regular file
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Size of the source in bytes, if readable
    pub fn size(&self) -> Option<u64> {
        std::fs::metadata(&self.path).ok().map(|m| m.len())
    }

    /// Read and decode the file with the configured input encoding
    pub fn read_text(&self, config: &ConversionConfig) -> ConversionResult<String> {
        if !self.exists() {
            return Err(ConversionError::load(ConversionErrorKind::InputNotFound {
                path: self.path.clone(),
            }));
        }

        let bytes = std::fs::read(&self.path).map_err(|e| {
            ConversionError::load(ConversionErrorKind::io(
                format!("Failed to read file: {}", e),
                Some(self.path.clone()),
            ))
            .with_source(e)
        })?;

        Ok(config.input_encoding.decode(&bytes)?.into_owned())
    }

    /// Read, decode and parse the file into a table
    pub fn load(&self, config: &ConversionConfig) -> ConversionResult<Table> {
        let text = self.read_text(config)?;
        parse_table(&text, config)
    }
}

/// Parse decoded CSV text. The first record is the header.
pub fn parse_table(text: &str, config: &ConversionConfig) -> ConversionResult<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(config.delimiter.as_byte())
        .flexible(config.row_policy == RowPolicy::PadShort)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() {
        return Err(ConversionError::load(ConversionErrorKind::csv_parse(
            "no header row".to_string(),
            None,
        )));
    }

    let width = headers.len();
    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result?;

        if record.len() > width {
            return Err(ConversionError::load(ConversionErrorKind::RaggedRow {
                line: record.position().map(|p| p.line()).unwrap_or(0),
                expected: width,
                found: record.len(),
            }));
        }

        let mut row: Vec<Option<String>> = record
            .iter()
            .map(|cell| (!config.is_null(cell)).then(|| cell.to_string()))
            .collect();
        row.resize(width, None);
        rows.push(row);
    }

    let table = Table::from_raw(headers, rows, config.infer_types);
    tracing::debug!(
        columns = width,
        rows = table.row_count(),
        types = ?table.column_types(),
        "parsed CSV table"
    );

    Ok(table)
}
