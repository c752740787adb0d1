//! Typed dynamic values for parsed log documents.
//!
//! Parsed records are dynamic maps from field name to [`FieldValue`]. The
//! tokenizer produces string values (plus an instant for `timestamp`); the
//! storage engine promotes numeric-looking strings at store time via
//! [`coerce_scalar`].

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single field value inside a parsed log document.
///
/// Serializes untagged: instants as RFC 3339 strings, numbers as JSON
/// numbers, everything else as strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A UTF-8 string value.
    Str(String),
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit float.
    Float(f64),
    /// An instant in time (always UTC).
    Instant(DateTime<Utc>),
}

/// A parsed log document: an ordered map of field name to value.
pub type LogDocument = BTreeMap<String, FieldValue>;

impl FieldValue {
    /// Returns the string content if this is a [`FieldValue::Str`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the instant if this is a [`FieldValue::Instant`].
    #[must_use]
    pub fn as_instant(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Instant(ts) => Some(*ts),
            _ => None,
        }
    }

    /// Converts a JSON value into a field value.
    ///
    /// Numbers become [`FieldValue::Int`] or [`FieldValue::Float`]; every
    /// other JSON shape is carried as its string representation.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => Self::Str(s.clone()),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else {
                    Self::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::Bool(b) => Self::Str(b.to_string()),
            other => Self::Str(other.to_string()),
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Str(s) => write!(f, "{s}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Instant(ts) => write!(f, "{}", ts.to_rfc3339()),
        }
    }
}

/// Applies the integer-then-float-else-string promotion rule to a raw
/// string value.
///
/// Used by the storage engine when writing documents; `timestamp` and
/// `_`-prefixed keys are exempt at the call site.
#[must_use]
pub fn coerce_scalar(raw: &str) -> FieldValue {
    if let Ok(i) = raw.parse::<i64>() {
        return FieldValue::Int(i);
    }
    if let Ok(x) = raw.parse::<f64>() {
        return FieldValue::Float(x);
    }
    FieldValue::Str(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn coerce_integer_string() {
        assert_eq!(coerce_scalar("12345"), FieldValue::Int(12345));
        assert_eq!(coerce_scalar("-7"), FieldValue::Int(-7));
    }

    #[test]
    fn coerce_float_string() {
        assert_eq!(coerce_scalar("3.25"), FieldValue::Float(3.25));
    }

    #[test]
    fn coerce_non_numeric_stays_string() {
        assert_eq!(
            coerce_scalar("sshd"),
            FieldValue::Str("sshd".to_string())
        );
        // Mixed content must not be promoted.
        assert_eq!(
            coerce_scalar("42abc"),
            FieldValue::Str("42abc".to_string())
        );
    }

    #[test]
    fn instant_serializes_as_rfc3339() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let json = serde_json::to_string(&FieldValue::Instant(ts)).unwrap();
        assert_eq!(json, "\"2024-01-02T03:04:05Z\"");
    }

    #[test]
    fn numbers_serialize_as_json_numbers() {
        assert_eq!(serde_json::to_string(&FieldValue::Int(7)).unwrap(), "7");
        assert_eq!(
            serde_json::to_string(&FieldValue::Float(1.5)).unwrap(),
            "1.5"
        );
    }

    #[test]
    fn from_json_maps_number_shapes() {
        assert_eq!(
            FieldValue::from_json(&serde_json::json!(12)),
            FieldValue::Int(12)
        );
        assert_eq!(
            FieldValue::from_json(&serde_json::json!(0.5)),
            FieldValue::Float(0.5)
        );
        assert_eq!(
            FieldValue::from_json(&serde_json::json!("us-west-2")),
            FieldValue::Str("us-west-2".to_string())
        );
    }
}
