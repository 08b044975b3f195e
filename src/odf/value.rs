//! Typed cell values.
//!
//! `office:value-type` names a closed set of types; [`ValueType`] is that set and
//! [`CellValue`] is the decoded scalar a cell contributes to a grid.

use crate::common::{Error, Result};
use chrono::{NaiveDateTime, TimeDelta};
use phf::{Map, phf_map};
use std::fmt;
use std::str::FromStr;

/// Declared type of a table cell (`office:value-type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Boolean,
    Float,
    Percentage,
    Currency,
    String,
    Date,
    Time,
}

/// Attribute spelling to value type (compile-time perfect hash map)
static VALUE_TYPES: Map<&'static str, ValueType> = phf_map! {
    "boolean" => ValueType::Boolean,
    "float" => ValueType::Float,
    "percentage" => ValueType::Percentage,
    "currency" => ValueType::Currency,
    "string" => ValueType::String,
    "date" => ValueType::Date,
    "time" => ValueType::Time,
};

impl ValueType {
    /// Attribute spelling of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Boolean => "boolean",
            ValueType::Float => "float",
            ValueType::Percentage => "percentage",
            ValueType::Currency => "currency",
            ValueType::String => "string",
            ValueType::Date => "date",
            ValueType::Time => "time",
        }
    }

    /// Whether the value lives in `office:value` as a number.
    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ValueType::Float | ValueType::Percentage | ValueType::Currency
        )
    }
}

impl FromStr for ValueType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        VALUE_TYPES
            .get(s)
            .copied()
            .ok_or_else(|| Error::UnrecognizedType(s.to_string()))
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded cell scalar.
///
/// `Empty` is the absent-marker: no data, as opposed to an empty string or zero.
/// Currency and percentage cells decode to `Float` and lose their unit.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Absent value
    #[default]
    Empty,
    /// Boolean value
    Boolean(bool),
    /// Numeric value (float, percentage, currency)
    Float(f64),
    /// Text string
    String(String),
    /// Calendar date or date-time
    Timestamp(NaiveDateTime),
    /// Signed elapsed time
    Duration(TimeDelta),
}

impl CellValue {
    /// Check if this is the absent-marker
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Borrow the string payload, if any
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric payload, if any
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Boolean(b) => write!(f, "{}", b),
            CellValue::Float(n) => write!(f, "{}", n),
            CellValue::String(s) => f.write_str(s),
            CellValue::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%dT%H:%M:%S%.f")),
            CellValue::Duration(d) => f.write_str(&crate::odf::datatype::DurationOdf::encode(d)),
        }
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::String(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::String(value)
    }
}
