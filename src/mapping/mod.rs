//! Column renaming
//!
//! A [`ColumnMap`] translates source header names into identifier-style names.
//! Headers without an entry pass through untouched, so applying a map to
//! headers it has already renamed changes nothing.

use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;

/// Source and target names for the accident hotspot export
pub const HOTSPOT_COLUMNS: &[(&str, &str)] = &[
    ("사고다발지fid", "fid"),
    ("사고다발지id", "id"),
    ("법정동코드", "legal_dong_code"),
    ("지점코드", "spot_code"),
    ("시도시군구명", "city_district_name"),
    ("지점명", "spot_name"),
    ("사고건수", "accident_count"),
    ("사상자수", "casualty_count"),
    ("사망자수", "death_count"),
    ("중상자수", "severe_injury_count"),
    ("경상자수", "minor_injury_count"),
    ("부상신고자수", "reported_injury_count"),
    ("경도", "longitude"),
    ("위도", "latitude"),
    ("다발지역폴리곤", "polygon_geom"),
];

/// Ordered source → target column name lookup
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnMap {
    entries: Vec<(String, String)>,
}

impl ColumnMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in hotspot map
    pub fn hotspot() -> Self {
        Self {
            entries: HOTSPOT_COLUMNS
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        }
    }

    /// Add or replace a single entry
    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>) {
        let from = from.into();
        let to = to.into();
        match self.entries.iter_mut().find(|(f, _)| *f == from) {
            Some(entry) => entry.1 = to,
            None => self.entries.push((from, to)),
        }
    }

    /// Build a map from `(source, target)` pairs, rejecting duplicates
    pub fn from_pairs<I, K, V>(pairs: I) -> ConversionResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = Self::new();
        for (from, to) in pairs {
            let from = from.into();
            if map.get(&from).is_some() {
                return Err(config_error(format!(
                    "column '{}' is mapped more than once",
                    from
                )));
            }
            map.entries.push((from, to.into()));
        }
        map.validate()?;
        Ok(map)
    }

    /// Load a map from a JSON object of `"source": "target"` pairs
    pub fn from_json_str(content: &str) -> ConversionResult<Self> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| config_error(format!("invalid column map JSON: {}", e)))?;

        let object = value
            .as_object()
            .ok_or_else(|| config_error("column map must be a JSON object".to_string()))?;

        let mut pairs = Vec::with_capacity(object.len());
        for (from, to) in object {
            let to = to.as_str().ok_or_else(|| {
                config_error(format!("column map target for '{}' must be a string", from))
            })?;
            pairs.push((from.clone(), to.to_string()));
        }

        Self::from_pairs(pairs)
    }

    /// Load a map from a JSON file
    pub fn from_file(path: &Path) -> ConversionResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConversionError::load(ConversionErrorKind::io(
                format!("Failed to read column map: {}", e),
                Some(path.to_path_buf()),
            ))
        })?;
        Self::from_json_str(&content)
    }

    /// Look up the target name for a source column
    pub fn get(&self, from: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| f == from)
            .map(|(_, t)| t.as_str())
    }

    /// Target name for `column`, or the column itself when unmapped
    pub fn rename<'a>(&'a self, column: &'a str) -> &'a str {
        self.get(column).unwrap_or(column)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(f, t)| (f.as_str(), t.as_str()))
    }

    /// Check that no two sources share a target name
    pub fn validate(&self) -> ConversionResult<()> {
        let mut seen = HashSet::new();
        for (from, to) in &self.entries {
            if to.is_empty() {
                return Err(config_error(format!(
                    "column '{}' is mapped to an empty name",
                    from
                )));
            }
            if !seen.insert(to.as_str()) {
                return Err(config_error(format!(
                    "target column '{}' is used more than once",
                    to
                )));
            }
        }
        Ok(())
    }

    /// Rename headers in place, returning how many were changed
    pub fn apply(&self, headers: &mut [String]) -> usize {
        let mut renamed = 0;
        for header in headers.iter_mut() {
            if let Some(target) = self.get(header) {
                if target != header {
                    *header = target.to_string();
                    renamed += 1;
                }
            }
        }
        renamed
    }
}

fn config_error(message: String) -> ConversionError {
    ConversionError::load(ConversionErrorKind::configuration(message))
}
