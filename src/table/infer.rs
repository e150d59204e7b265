//! Per-column cell type inference

use serde_json::{Number, Value};

/// Inferred type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Every cell is null
    Empty,
    Integer,
    Float,
    Text,
}

impl ColumnType {
    /// Widen the column type to also admit `cell`
    fn admit(self, cell: &str) -> Self {
        match self {
            ColumnType::Text => ColumnType::Text,
            ColumnType::Empty | ColumnType::Integer if is_canonical_integer(cell) => {
                ColumnType::Integer
            }
            ColumnType::Empty | ColumnType::Integer | ColumnType::Float
                if is_decimal(cell) =>
            {
                ColumnType::Float
            }
            _ => ColumnType::Text,
        }
    }
}

/// Infer one type per column from the non-null cells
pub fn infer_column_types(width: usize, rows: &[Vec<Option<String>>]) -> Vec<ColumnType> {
    let mut types = vec![ColumnType::Empty; width];
    for row in rows {
        for (ty, cell) in types.iter_mut().zip(row) {
            if let Some(cell) = cell {
                *ty = ty.admit(cell);
            }
        }
    }
    types
}

/// Convert a raw cell into a JSON value of the column's type
pub fn to_value(cell: Option<String>, ty: ColumnType) -> Value {
    let Some(cell) = cell else {
        return Value::Null;
    };

    match ty {
        ColumnType::Integer => match cell.parse::<i64>() {
            Ok(n) => Value::from(n),
            Err(_) => cell
                .parse::<u64>()
                .map(Value::from)
                .unwrap_or(Value::String(cell)),
        },
        ColumnType::Float => cell
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::String(cell)),
        ColumnType::Empty | ColumnType::Text => Value::String(cell),
    }
}

/// Integers whose text survives a parse/print round trip, so codes with
/// leading zeros or a `+` sign stay text. Values above `i64::MAX` are
/// admitted as `u64`.
fn is_canonical_integer(cell: &str) -> bool {
    if let Ok(n) = cell.parse::<i64>() {
        return n.to_string() == cell;
    }
    match cell.parse::<u64>() {
        Ok(n) => n.to_string() == cell,
        Err(_) => false,
    }
}

/// Optional sign followed by digits only
fn is_integer_literal(cell: &str) -> bool {
    let digits = cell.strip_prefix(['-', '+']).unwrap_or(cell);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Finite decimal numbers. Rejects `inf`, `nan` and similar words that
/// `f64::from_str` accepts, and integer literals outside the `i64`/`u64`
/// range, which an `f64` would round.
fn is_decimal(cell: &str) -> bool {
    if is_integer_literal(cell) && cell.parse::<i64>().is_err() && cell.parse::<u64>().is_err() {
        return false;
    }
    let digits = cell.trim_start_matches(['-', '+']);
    if digits.len() > 1 && digits.starts_with('0') && !digits[1..].starts_with(['.', 'e', 'E']) {
        return false;
    }
    cell.chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
        && cell.chars().any(|c| c.is_ascii_digit())
        && cell.parse::<f64>().map(f64::is_finite).unwrap_or(false)
}
