//! In-memory table built from a CSV file

pub mod infer;

use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};
use crate::mapping::ColumnMap;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

pub use infer::ColumnType;

/// One row as an ordered column → value mapping
pub type Record = Map<String, Value>;

/// Rows sharing one header
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    column_types: Vec<ColumnType>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Build a table from raw cells. `None` cells become null.
    ///
    /// Duplicate header names get a `.1`, `.2`, ... suffix so that every
    /// record keeps all of its cells.
    pub fn from_raw(
        headers: Vec<String>,
        raw_rows: Vec<Vec<Option<String>>>,
        infer_types: bool,
    ) -> Self {
        let headers = dedupe_headers(headers);
        let column_types = if infer_types {
            infer::infer_column_types(headers.len(), &raw_rows)
        } else {
            vec![ColumnType::Text; headers.len()]
        };

        let rows = raw_rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .zip(&column_types)
                    .map(|(cell, ty)| infer::to_value(cell, *ty))
                    .collect()
            })
            .collect();

        Self {
            headers,
            column_types,
            rows,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn column_types(&self) -> &[ColumnType] {
        &self.column_types
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rename columns through `map`. Only header names change.
    ///
    /// Fails without touching the table if two columns would end up with
    /// the same name.
    pub fn rename_columns(&mut self, map: &ColumnMap) -> ConversionResult<usize> {
        let mut renamed = self.headers.clone();
        let count = map.apply(&mut renamed);

        let mut seen = HashSet::with_capacity(renamed.len());
        if let Some(duplicate) = renamed.iter().find(|h| !seen.insert(h.as_str())) {
            return Err(ConversionError::load(ConversionErrorKind::configuration(
                format!("renaming produces duplicate column '{}'", duplicate),
            )));
        }

        self.headers = renamed;
        Ok(count)
    }

    /// Records in row order, columns in header order
    pub fn to_records(&self) -> Vec<Record> {
        self.rows
            .iter()
            .map(|row| {
                self.headers
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect()
            })
            .collect()
    }

    /// Consume the table into records
    pub fn into_records(self) -> Vec<Record> {
        let headers = self.headers;
        self.rows
            .into_iter()
            .map(|row| headers.iter().cloned().zip(row).collect())
            .collect()
    }
}

fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut taken: HashSet<String> = headers.iter().cloned().collect();
    let mut out = Vec::with_capacity(headers.len());

    for header in headers {
        let count = counts.entry(header.clone()).or_insert(0);
        if *count == 0 {
            *count = 1;
            out.push(header);
            continue;
        }

        let mut candidate = format!("{}.{}", header, count);
        while taken.contains(&candidate) {
            *count += 1;
            candidate = format!("{}.{}", header, count);
        }
        *count += 1;
        taken.insert(candidate.clone());
        out.push(candidate);
    }

    out
}
