//! Core conversion engine for CSV to JSON transformation

use crate::conversion::config::ConversionConfig;
use crate::conversion::stats::ConversionStatistics;
use crate::conversion::ConversionResult;
use crate::error::{ConversionError, ConversionErrorKind};
use crate::formatter::JsonFormatter;
use crate::parser::CsvSource;
use crate::table::{Record, Table};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info};

/// Result of a successful conversion
#[derive(Debug, Clone)]
pub struct ConversionSummary {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub statistics: ConversionStatistics,
}

impl ConversionSummary {
    pub fn row_count(&self) -> usize {
        self.statistics.row_count
    }
}

/// Outcome of a fail-soft conversion run
#[derive(Debug)]
pub enum ConversionOutcome {
    Converted(ConversionSummary),
    Failed(ConversionError),
}

impl ConversionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ConversionOutcome::Converted(_))
    }

    pub fn summary(&self) -> Option<&ConversionSummary> {
        match self {
            ConversionOutcome::Converted(summary) => Some(summary),
            ConversionOutcome::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ConversionError> {
        match self {
            ConversionOutcome::Converted(_) => None,
            ConversionOutcome::Failed(err) => Some(err),
        }
    }
}

impl From<ConversionResult<ConversionSummary>> for ConversionOutcome {
    fn from(result: ConversionResult<ConversionSummary>) -> Self {
        match result {
            Ok(summary) => ConversionOutcome::Converted(summary),
            Err(err) => ConversionOutcome::Failed(err),
        }
    }
}

/// Input that has been read, parsed and renamed but not yet written
#[derive(Debug)]
pub struct LoadedTable {
    table: Table,
    statistics: ConversionStatistics,
    input_size: u64,
    started: Instant,
}

impl LoadedTable {
    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn statistics(&self) -> &ConversionStatistics {
        &self.statistics
    }
}

/// Main conversion engine
pub struct ConversionEngine {
    config: ConversionConfig,
}

impl ConversionEngine {
    /// Create a new conversion engine
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Run the whole pipeline: load, rename, serialize, write
    pub fn convert(&self) -> ConversionResult<ConversionSummary> {
        let loaded = self.read_input()?;
        self.write_output(loaded)
    }

    /// Load phase: existence check, configuration check, decode, parse and rename
    pub fn read_input(&self) -> ConversionResult<LoadedTable> {
        let started = Instant::now();
        let source = CsvSource::new(&self.config.input_path);

        // A missing input is reported ahead of any configuration problem
        self.ensure_exists(&source)?;
        self.config.validate().map_err(|message| {
            ConversionError::load(ConversionErrorKind::configuration(message))
        })?;

        info!(
            input = %self.config.input_path.display(),
            encoding = %self.config.input_encoding,
            "reading CSV"
        );
        let mut table = self.load(&source)?;

        let mut statistics = ConversionStatistics::new();
        statistics.row_count = table.row_count();
        statistics.column_count = table.column_count();
        statistics.renamed_columns = self.rename(&mut table)?;
        info!(
            rows = statistics.row_count,
            renamed = statistics.renamed_columns,
            "loaded CSV"
        );

        Ok(LoadedTable {
            table,
            statistics,
            input_size: source.size().unwrap_or(0),
            started,
        })
    }

    /// Write phase: serialize the loaded records and write them out
    pub fn write_output(&self, loaded: LoadedTable) -> ConversionResult<ConversionSummary> {
        let LoadedTable {
            table,
            mut statistics,
            input_size,
            started,
        } = loaded;

        let records = table.into_records();
        let output_size = self.write(&records, &self.config.output_path)?;

        statistics.finish(input_size, output_size as u64, started.elapsed());
        info!(
            output = %self.config.output_path.display(),
            bytes = output_size,
            "wrote JSON"
        );

        Ok(ConversionSummary {
            input_path: self.config.input_path.clone(),
            output_path: self.config.output_path.clone(),
            statistics,
        })
    }

    fn ensure_exists(&self, source: &CsvSource) -> ConversionResult<()> {
        if source.exists() {
            return Ok(());
        }
        Err(ConversionError::load(ConversionErrorKind::InputNotFound {
            path: source.path().to_path_buf(),
        }))
    }

    /// Existence check, decode and parse
    pub fn load(&self, source: &CsvSource) -> ConversionResult<Table> {
        self.ensure_exists(source)?;
        source.load(&self.config)
    }

    /// Apply the column map, if one is configured
    pub fn rename(&self, table: &mut Table) -> ConversionResult<usize> {
        match &self.config.column_map {
            Some(map) => {
                let renamed = table.rename_columns(map)?;
                debug!(renamed, headers = ?table.headers(), "renamed columns");
                Ok(renamed)
            }
            None => Ok(0),
        }
    }

    /// Render records as JSON in the output encoding
    pub fn render(&self, records: &[Record]) -> ConversionResult<Vec<u8>> {
        let json = JsonFormatter::new(self.config.indent_size).format(records)?;
        self.config.output_encoding.encode(&json)
    }

    /// Render and write records, returning the number of bytes written
    pub fn write(&self, records: &[Record], path: &Path) -> ConversionResult<usize> {
        let bytes = self.render(records)?;
        std::fs::write(path, &bytes).map_err(|e| {
            ConversionError::write(ConversionErrorKind::io(
                e.to_string(),
                Some(path.to_path_buf()),
            ))
            .with_source(e)
        })?;
        Ok(bytes.len())
    }
}

/// Convert with the given configuration, propagating errors
pub fn convert_csv_to_json(config: &ConversionConfig) -> ConversionResult<ConversionSummary> {
    let engine = ConversionEngine::new(config.clone());
    engine.convert()
}

/// Convert with the given configuration, logging any failure instead of
/// returning it as an error
pub fn run_conversion(config: &ConversionConfig) -> ConversionOutcome {
    let outcome = ConversionOutcome::from(convert_csv_to_json(config));
    if let ConversionOutcome::Failed(err) = &outcome {
        error!(phase = %err.phase, "{}", err.user_message());
    }
    outcome
}
