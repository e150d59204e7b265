//! Command-line interface module

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

use crate::conversion::config::{
    DelimiterType, RowPolicy, DEFAULT_INPUT_ENCODING, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_ENCODING,
    DEFAULT_OUTPUT_PATH,
};
use crate::conversion::{ConversionConfig, ConversionEngine, ConversionOutcome, ConversionResult};
use crate::error::{ConversionError, ConversionErrorKind};
use crate::mapping::ColumnMap;

/// Main CLI arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "hotspotconv")]
#[command(about = "Convert an accident hotspot CSV export to a JSON array")]
#[command(version)]
#[command(long_about = None)]
pub struct Args {
    /// Input CSV file
    #[arg(default_value = DEFAULT_INPUT_PATH)]
    pub input: PathBuf,

    /// Output JSON file
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Encoding of the input file (e.g. cp949, utf-8, utf-8-sig)
    #[arg(long, default_value = DEFAULT_INPUT_ENCODING)]
    pub input_encoding: String,

    /// Encoding of the output file
    #[arg(long, default_value = DEFAULT_OUTPUT_ENCODING)]
    pub output_encoding: String,

    /// Keep the source column names
    #[arg(long, conflicts_with = "map")]
    pub no_rename: bool,

    /// JSON file with a {"source": "target"} column map to use instead of the built-in one
    #[arg(long)]
    pub map: Option<PathBuf>,

    /// Field delimiter: comma, tab, pipe, or semicolon (default: comma)
    #[arg(long)]
    pub delimiter: Option<Delimiter>,

    /// Pad rows with fewer fields than the header with nulls
    #[arg(long)]
    pub pad_short_rows: bool,

    /// Keep every cell as a string
    #[arg(long)]
    pub no_infer_types: bool,

    /// Indentation size for the JSON output (0-8 spaces)
    #[arg(long, default_value_t = 4)]
    pub indent: u8,

    /// Output conversion statistics
    #[arg(long)]
    pub stats: bool,

    /// Output conversion statistics as JSON
    #[arg(long)]
    pub stats_json: bool,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(long)]
    pub quiet: bool,
}

/// Delimiter types for CLI
#[derive(ValueEnum, Debug, Clone)]
pub enum Delimiter {
    #[value(name = "comma", alias = ",")]
    Comma,
    #[value(name = "tab", alias = "\t")]
    Tab,
    #[value(name = "pipe", alias = "|")]
    Pipe,
    #[value(name = "semicolon", alias = ";")]
    Semicolon,
}

impl From<Delimiter> for DelimiterType {
    fn from(delimiter: Delimiter) -> Self {
        match delimiter {
            Delimiter::Comma => DelimiterType::Comma,
            Delimiter::Tab => DelimiterType::Tab,
            Delimiter::Pipe => DelimiterType::Pipe,
            Delimiter::Semicolon => DelimiterType::Semicolon,
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub args: Args,
    pub conversion_config: ConversionConfig,
}

impl CliConfig {
    /// Create CLI configuration from arguments
    pub fn from_args(args: Args) -> ConversionResult<Self> {
        let conversion_config = Self::create_conversion_config(&args)?;

        Ok(Self {
            args,
            conversion_config,
        })
    }

    /// Create conversion configuration from CLI arguments
    fn create_conversion_config(args: &Args) -> ConversionResult<ConversionConfig> {
        let column_map = if args.no_rename {
            None
        } else if let Some(path) = &args.map {
            Some(ColumnMap::from_file(path)?)
        } else {
            Some(ColumnMap::hotspot())
        };

        let delimiter = args
            .delimiter
            .as_ref()
            .map(|d| d.clone().into())
            .unwrap_or(DelimiterType::Comma);

        let row_policy = if args.pad_short_rows {
            RowPolicy::PadShort
        } else {
            RowPolicy::Strict
        };

        let config = ConversionConfig::for_paths(&args.input, &args.output)
            .with_input_encoding(&args.input_encoding)
            .and_then(|c| c.with_output_encoding(&args.output_encoding))
            .map_err(configuration_error)?
            .with_column_map(column_map)
            .with_delimiter(delimiter)
            .with_row_policy(row_policy)
            .with_type_inference(!args.no_infer_types)
            .with_indent_size(args.indent)
            .map_err(configuration_error)?;

        // Path checks run in the engine, after the input existence check
        Ok(config)
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.args.quiet
    }

    /// Check if stats output is requested
    pub fn want_stats(&self) -> bool {
        self.args.stats
    }

    /// Get input source description
    pub fn input_description(&self) -> String {
        format!("'{}'", self.args.input.display())
    }

    /// Get output destination description
    pub fn output_description(&self) -> String {
        format!("'{}'", self.args.output.display())
    }
}

fn configuration_error(message: String) -> ConversionError {
    ConversionError::load(ConversionErrorKind::configuration(message))
}

/// Run one conversion and report its progress on the terminal
pub fn run(cli: &CliConfig) -> ConversionOutcome {
    let quiet = cli.is_quiet();
    if !quiet {
        println!(
            "Converting {} to JSON ({} → {})",
            cli.input_description(),
            cli.conversion_config.input_encoding,
            cli.conversion_config.output_encoding
        );
    }

    // Failures are printed below rather than logged
    let engine = ConversionEngine::new(cli.conversion_config.clone());
    let outcome = match engine.read_input() {
        Ok(loaded) => {
            let stats = loaded.statistics();
            if cli.conversion_config.renames_columns() {
                CliUtils::show_success(
                    &format!(
                        "Loaded {} rows, renamed {} of {} columns",
                        stats.row_count, stats.renamed_columns, stats.column_count
                    ),
                    quiet,
                );
            } else {
                CliUtils::show_success(&format!("Loaded {} rows", stats.row_count), quiet);
            }
            ConversionOutcome::from(engine.write_output(loaded))
        }
        Err(err) => ConversionOutcome::Failed(err),
    };

    match &outcome {
        ConversionOutcome::Converted(summary) => {
            let stats = &summary.statistics;
            CliUtils::show_success(
                &format!(
                    "Saved {} ({}) in {}",
                    cli.output_description(),
                    CliUtils::format_file_size(stats.output_size_bytes),
                    CliUtils::format_duration(Duration::from_millis(stats.processing_time_ms))
                ),
                quiet,
            );
            if cli.want_stats() && !quiet {
                println!("\n{}", stats.report());
            }
            if cli.args.stats_json {
                match stats.to_json() {
                    Ok(json) => println!("{}", json),
                    Err(e) => tracing::warn!(error = %e, "could not serialize statistics"),
                }
            }
        }
        ConversionOutcome::Failed(err) => handle_error(err),
    }
    outcome
}

/// Install the tracing subscriber. `RUST_LOG` wins over `--verbose`.
/// Call once, from `main`.
pub fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose {
        "hotspotconv=debug"
    } else {
        "hotspotconv=warn"
    };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// CLI utilities and helpers
pub struct CliUtils;

impl CliUtils {
    /// Format a file size in human-readable format
    pub fn format_file_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.1} {}", size, UNITS[unit_index])
        }
    }

    /// Format a duration in human-readable format
    pub fn format_duration(duration: Duration) -> String {
        let total_millis = duration.as_millis();

        if total_millis < 1000 {
            format!("{}ms", total_millis)
        } else if total_millis < 60_000 {
            format!("{:.1}s", total_millis as f64 / 1000.0)
        } else {
            let minutes = total_millis / 60_000;
            let seconds = (total_millis % 60_000) / 1000;
            format!("{}m {}s", minutes, seconds)
        }
    }

    /// Show a success message (if not in quiet mode)
    pub fn show_success(message: &str, quiet: bool) {
        if !quiet {
            println!("✓ {}", message);
        }
    }

    /// Show an error message
    pub fn show_error(message: &str) {
        eprintln!("✗ {}", message);
    }
}

/// Handle CLI errors with user-friendly messages
pub fn handle_error(error: &ConversionError) {
    CliUtils::show_error(&error.user_message());

    // Provide helpful suggestions
    match &error.kind {
        ConversionErrorKind::Decode { .. } => {
            eprintln!("\nTip: Use --input-encoding to match the file (e.g. cp949, utf-8)");
        }
        ConversionErrorKind::RaggedRow { .. } => {
            eprintln!("\nTip: Use --pad-short-rows to fill missing trailing fields with null");
        }
        ConversionErrorKind::Unencodable { .. } => {
            eprintln!("\nTip: Use --output-encoding utf-8 to keep every character");
        }
        _ => {}
    }
}
