//! Configuration options for CSV to JSON conversion

use crate::mapping::ColumnMap;
use crate::parser::encoding::TextEncoding;
use std::path::PathBuf;

/// Default input path used by the hotspot export
pub const DEFAULT_INPUT_PATH: &str = "dataset.csv";
/// Default output path
pub const DEFAULT_OUTPUT_PATH: &str = "dataset_converted.json";
/// Default input encoding label
pub const DEFAULT_INPUT_ENCODING: &str = "cp949";
/// Default output encoding label
pub const DEFAULT_OUTPUT_ENCODING: &str = "utf-8";

/// Field delimiter options
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DelimiterType {
    /// Comma delimiter (,)
    Comma,
    /// Tab delimiter (\\t)
    Tab,
    /// Pipe delimiter (|)
    Pipe,
    /// Semicolon delimiter (;)
    Semicolon,
}

impl DelimiterType {
    pub fn as_byte(&self) -> u8 {
        match self {
            DelimiterType::Comma => b',',
            DelimiterType::Tab => b'\t',
            DelimiterType::Pipe => b'|',
            DelimiterType::Semicolon => b';',
        }
    }
}

/// How rows whose field count differs from the header are handled
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowPolicy {
    /// Any mismatch fails the load
    Strict,
    /// Short rows are padded with nulls, long rows still fail
    PadShort,
}

/// Cell texts read as null, the same set pandas' `read_csv` treats as missing
pub fn default_null_values() -> Vec<String> {
    [
        "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
        "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Conversion configuration options
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// CSV file to read
    pub input_path: PathBuf,
    /// JSON file to create or overwrite
    pub output_path: PathBuf,
    /// Encoding of the input bytes
    pub input_encoding: TextEncoding,
    /// Encoding of the written JSON
    pub output_encoding: TextEncoding,
    /// Rename stage; `None` passes headers through
    pub column_map: Option<ColumnMap>,
    /// Field delimiter
    pub delimiter: DelimiterType,
    /// Ragged row handling
    pub row_policy: RowPolicy,
    /// Cell texts converted to null
    pub null_values: Vec<String>,
    /// Infer integer/float columns instead of keeping every cell as text
    pub infer_types: bool,
    /// Spaces per indentation level in the JSON output
    pub indent_size: u8,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            // Both labels are in the resolver's alias table
            input_encoding: TextEncoding::for_label(DEFAULT_INPUT_ENCODING)
                .unwrap_or(TextEncoding::utf8()),
            output_encoding: TextEncoding::utf8(),
            column_map: Some(ColumnMap::hotspot()),
            delimiter: DelimiterType::Comma,
            row_policy: RowPolicy::Strict,
            null_values: default_null_values(),
            infer_types: true,
            indent_size: 4,
        }
    }
}

impl ConversionConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration for an input/output pair with the default settings
    pub fn for_paths(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input.into(),
            output_path: output.into(),
            ..Default::default()
        }
    }

    /// Configuration that keeps the source column names
    pub fn passthrough() -> Self {
        Self {
            column_map: None,
            ..Default::default()
        }
    }

    /// Set the input encoding from a label
    pub fn with_input_encoding(mut self, label: &str) -> Result<Self, String> {
        self.input_encoding = TextEncoding::for_label(label)?;
        Ok(self)
    }

    /// Set the output encoding from a label
    pub fn with_output_encoding(mut self, label: &str) -> Result<Self, String> {
        let encoding = TextEncoding::for_label(label)?;
        if !encoding.can_encode() {
            return Err(format!("'{}' cannot be used as an output encoding", label));
        }
        self.output_encoding = encoding;
        Ok(self)
    }

    /// Set or clear the column map
    pub fn with_column_map(mut self, map: Option<ColumnMap>) -> Self {
        self.column_map = map;
        self
    }

    /// Set field delimiter
    pub fn with_delimiter(mut self, delimiter: DelimiterType) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set ragged row policy
    pub fn with_row_policy(mut self, policy: RowPolicy) -> Self {
        self.row_policy = policy;
        self
    }

    /// Set the null token list
    pub fn with_null_values(mut self, values: Vec<String>) -> Self {
        self.null_values = values;
        self
    }

    /// Enable/disable numeric type inference
    pub fn with_type_inference(mut self, enabled: bool) -> Self {
        self.infer_types = enabled;
        self
    }

    /// Set indentation size
    pub fn with_indent_size(mut self, size: u8) -> Result<Self, String> {
        if size > 8 {
            return Err("Indent size must be 0-8 spaces".to_string());
        }
        self.indent_size = size;
        Ok(self)
    }

    /// Whether the rename stage runs
    pub fn renames_columns(&self) -> bool {
        self.column_map.is_some()
    }

    /// Whether a raw cell text is a null token
    pub fn is_null(&self, cell: &str) -> bool {
        self.null_values.iter().any(|v| v == cell)
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.indent_size > 8 {
            return Err("Indent size must be 0-8 spaces".to_string());
        }

        if !self.output_encoding.can_encode() {
            return Err(format!(
                "'{}' cannot be used as an output encoding",
                self.output_encoding
            ));
        }

        if self.input_path.as_os_str().is_empty() {
            return Err("Input path must not be empty".to_string());
        }

        if self.output_path.as_os_str().is_empty() {
            return Err("Output path must not be empty".to_string());
        }

        if self.input_path == self.output_path {
            return Err("Input and output paths must differ".to_string());
        }

        if let Some(map) = &self.column_map {
            map.validate().map_err(|e| e.kind.to_string())?;
        }

        Ok(())
    }
}
