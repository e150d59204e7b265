//! Statistics for conversion operations

use serde::Serialize;
use std::time::Duration;

/// Statistics collected for one conversion
#[derive(Debug, Clone, Serialize)]
pub struct ConversionStatistics {
    /// Data rows read (header excluded)
    pub row_count: usize,
    /// Columns per row
    pub column_count: usize,
    /// Columns whose name was changed by the column map
    pub renamed_columns: usize,
    /// Input file size in bytes
    pub input_size_bytes: u64,
    /// Encoded output size in bytes
    pub output_size_bytes: u64,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
    /// Throughput (input bytes processed per second)
    pub throughput_bytes_per_sec: f32,
    /// Timestamp of when statistics were collected
    pub collected_at: chrono::DateTime<chrono::Utc>,
}

impl Default for ConversionStatistics {
    fn default() -> Self {
        Self {
            row_count: 0,
            column_count: 0,
            renamed_columns: 0,
            input_size_bytes: 0,
            output_size_bytes: 0,
            processing_time_ms: 0,
            throughput_bytes_per_sec: 0.0,
            collected_at: chrono::Utc::now(),
        }
    }
}

impl ConversionStatistics {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill in sizes and timing once the output has been written
    pub fn finish(&mut self, input_size: u64, output_size: u64, processing_time: Duration) {
        self.input_size_bytes = input_size;
        self.output_size_bytes = output_size;
        self.processing_time_ms = processing_time.as_millis() as u64;
        self.throughput_bytes_per_sec = if processing_time.as_secs_f64() > 0.0 {
            (input_size as f64 / processing_time.as_secs_f64()) as f32
        } else {
            0.0
        };
        self.collected_at = chrono::Utc::now();
    }

    /// Output size relative to input size
    pub fn size_ratio(&self) -> f32 {
        if self.input_size_bytes == 0 {
            return 0.0;
        }
        self.output_size_bytes as f32 / self.input_size_bytes as f32
    }

    /// Statistics as a pretty-printed JSON object, for `--stats-json`
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Human-readable report
    pub fn report(&self) -> String {
        let mut out = String::from("Conversion Statistics:\n");
        out.push_str(&format!("Rows: {}\n", self.row_count));
        out.push_str(&format!("Columns: {}\n", self.column_count));
        out.push_str(&format!("Renamed columns: {}\n", self.renamed_columns));
        out.push_str(&format!("Input size: {} bytes\n", self.input_size_bytes));
        out.push_str(&format!(
            "Output size: {} bytes ({:.2}x)\n",
            self.output_size_bytes,
            self.size_ratio()
        ));
        out.push_str(&format!("Processing time: {}ms\n", self.processing_time_ms));
        out.push_str(&format!(
            "Collected at: {}",
            self.collected_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        out
    }
}
