//! Typed cell values
//!
//! A [`Value`] is what the generator emits, what the loader coerces flat-file
//! fields into, and what sessions bind as statement parameters.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Date format used in flat files and for parameter binding
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Field separator of the pipe-delimited flat-file format
pub const FIELD_DELIMITER: char = '|';

/// A single typed cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// SQL NULL, written as an empty field
    Null,
    /// Whole number
    Int(i64),
    /// Fractional number
    Decimal(f64),
    /// Character data
    Text(String),
    /// Calendar date
    Date(NaiveDate),
}

impl Value {
    /// Check if the value is NULL
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the value (integers widen to f64)
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    /// Integer view of the value
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Text view of the value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Date view of the value
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Render the value as a flat-file field
    ///
    /// NULL becomes an empty field, dates use `YYYY-MM-DD`.
    pub fn to_field(&self) -> String {
        match self {
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }

    /// Render the value as text for drivers that bind everything as strings
    ///
    /// # Returns
    /// `None` for NULL, the flat-file rendering otherwise
    pub fn to_text_param(&self) -> Option<String> {
        match self {
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Int(i) => write!(f, "{}", i),
            Value::Decimal(d) => write!(f, "{}", d),
            Value::Text(s) => write!(f, "{}", s),
            Value::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Decimal(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Round to two decimal places (currency)
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Round to four decimal places (rates)
pub fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_renders_empty_field() {
        assert_eq!(Value::Null.to_field(), "");
        assert_eq!(Value::Null.to_text_param(), None);
    }

    #[test]
    fn test_date_renders_iso() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(Value::from(d).to_field(), "2024-01-05");
    }

    #[test]
    fn test_decimal_rendering() {
        assert_eq!(Value::from(42.5).to_field(), "42.5");
        assert_eq!(Value::from(round2(19.999)).to_field(), "20");
        assert_eq!(Value::from(round2(3.14159)).to_field(), "3.14");
    }

    #[test]
    fn test_option_conversion() {
        let none: Option<i64> = None;
        assert!(Value::from(none).is_null());
        assert_eq!(Value::from(Some(7i64)), Value::Int(7));
    }

    #[test]
    fn test_numeric_views() {
        assert_eq!(Value::Int(3).as_f64(), Some(3.0));
        assert_eq!(Value::Decimal(2.5).as_i64(), None);
        assert_eq!(Value::Text("x".into()).as_str(), Some("x"));
    }
}
