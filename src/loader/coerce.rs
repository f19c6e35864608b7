//! Flat-file field parsing and type coercion

use chrono::NaiveDate;

use crate::database::{ColumnKind, DatabaseError, DatabaseResult, Row};
use crate::value::{DATE_FORMAT, FIELD_DELIMITER, Value};

/// Split a line into fields, dropping trailing empty fields
///
/// Files end every row with a delimiter, so `"1|a|"` holds two fields.
pub fn split_fields(line: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = line
        .trim_end_matches(['\r', '\n'])
        .split(FIELD_DELIMITER)
        .collect();
    while fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields
}

/// Coerce one field to the value its column expects
///
/// Empty fields are NULL. Dates must be exactly `YYYY-MM-DD`; numbers are
/// decimals when they contain a `.` and integers otherwise. Anything that
/// does not parse becomes NULL.
pub fn coerce_field(field: &str, kind: ColumnKind) -> Value {
    if field.is_empty() {
        return Value::Null;
    }
    match kind {
        ColumnKind::Text => Value::Text(field.to_string()),
        ColumnKind::Date => parse_date(field).map(Value::Date).unwrap_or(Value::Null),
        ColumnKind::Number => {
            let trimmed = field.trim();
            if trimmed.contains('.') {
                trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(Value::Decimal)
                    .unwrap_or(Value::Null)
            } else {
                trimmed.parse::<i64>().map(Value::Int).unwrap_or(Value::Null)
            }
        }
    }
}

fn parse_date(field: &str) -> Option<NaiveDate> {
    let bytes = field.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    NaiveDate::parse_from_str(field, DATE_FORMAT).ok()
}

/// Decode one raw line of a data file
///
/// Lines that are not UTF-8 cannot be split into fields and are rejected.
pub fn decode_line(bytes: &[u8]) -> DatabaseResult<&str> {
    std::str::from_utf8(bytes)
        .map_err(|e| DatabaseError::DataFormat(format!("line is not valid UTF-8: {}", e)))
}

/// Result of fitting one line to a table's columns
#[derive(Debug, Clone, PartialEq)]
pub struct CoercedRow {
    pub values: Row,
    /// Field count before padding or truncation
    pub field_count: usize,
}

impl CoercedRow {
    /// True when the line did not have exactly one field per column
    pub fn width_mismatch(&self) -> bool {
        self.field_count != self.values.len()
    }
}

/// Parse a line against the destination's column kinds
///
/// Short lines are padded with NULLs and long lines truncated, so the
/// result always has one value per column.
///
/// # Returns
/// `None` for blank lines
pub fn coerce_line(line: &str, kinds: &[ColumnKind]) -> Option<CoercedRow> {
    if line.trim().is_empty() {
        return None;
    }
    let fields = split_fields(line);
    let field_count = fields.len();

    let values = kinds
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            fields
                .get(i)
                .map(|field| coerce_field(field, *kind))
                .unwrap_or(Value::Null)
        })
        .collect();

    Some(CoercedRow {
        values,
        field_count,
    })
}
