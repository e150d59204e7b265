//! Error types and handling infrastructure for CSV to JSON conversion

use std::fmt;
use std::path::PathBuf;

/// Underlying cause attached to a conversion error
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Pipeline phase an error was raised in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Existence check, decoding and CSV parsing of the input
    Load,
    /// JSON rendering, output encoding and the file write
    Write,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Load => write!(f, "load"),
            Phase::Write => write!(f, "write"),
        }
    }
}

/// Core error types for the conversion process
#[derive(Debug, thiserror::Error)]
pub enum ConversionErrorKind {
    #[error("Input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("Failed to decode input as {encoding}")]
    Decode { encoding: String },

    #[error("CSV parse error: {message}")]
    CsvParse {
        message: String,
        line: Option<u64>,
    },

    #[error("Row at line {line} has {found} fields, header has {expected}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Unsupported encoding: {encoding}")]
    UnsupportedEncoding { encoding: String },

    #[error("Cannot encode output as {encoding}: {sample}")]
    Unencodable { encoding: String, sample: String },

    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
    },

    #[error("Invalid configuration: {message}")]
    Configuration { message: String },
}

impl ConversionErrorKind {
    pub fn io(message: String, path: Option<PathBuf>) -> Self {
        Self::Io { message, path }
    }

    pub fn configuration(message: String) -> Self {
        Self::Configuration { message }
    }

    pub fn csv_parse(message: String, line: Option<u64>) -> Self {
        Self::CsvParse { message, line }
    }
}

/// Main error type for conversion operations
#[derive(Debug, thiserror::Error)]
#[error("{phase} failed: {kind}")]
pub struct ConversionError {
    pub phase: Phase,
    pub kind: ConversionErrorKind,
    #[source]
    pub source: Option<BoxError>,
}

impl ConversionError {
    pub fn load(kind: ConversionErrorKind) -> Self {
        Self {
            phase: Phase::Load,
            kind,
            source: None,
        }
    }

    pub fn write(kind: ConversionErrorKind) -> Self {
        Self {
            phase: Phase::Write,
            kind,
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn is_load(&self) -> bool {
        self.phase == Phase::Load
    }

    pub fn is_write(&self) -> bool {
        self.phase == Phase::Write
    }

    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match (&self.phase, &self.kind) {
            (_, ConversionErrorKind::InputNotFound { path }) => {
                format!("Input file not found: {}", path.display())
            }
            (Phase::Load, ConversionErrorKind::CsvParse { message, line }) => match line {
                Some(line) => format!("CSV read error at line {}: {}", line, message),
                None => format!("CSV read error: {}", message),
            },
            (Phase::Load, kind) => format!("CSV read error: {}", kind),
            (Phase::Write, ConversionErrorKind::Io { message, path }) => match path {
                Some(path) => format!("JSON save error ({}): {}", path.display(), message),
                None => format!("JSON save error: {}", message),
            },
            (Phase::Write, kind) => format!("JSON save error: {}", kind),
        }
    }
}

impl From<csv::Error> for ConversionError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line());
        let kind = match err.kind() {
            csv::ErrorKind::UnequalLengths {
                pos,
                expected_len,
                len,
            } => ConversionErrorKind::RaggedRow {
                line: pos.as_ref().map(|p| p.line()).unwrap_or(0),
                expected: *expected_len as usize,
                found: *len as usize,
            },
            _ => ConversionErrorKind::csv_parse(err.to_string(), line),
        };
        ConversionError::load(kind)
    }
}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;
