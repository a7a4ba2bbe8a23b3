use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

/// A primitive field value as it travels on the wire.
///
/// The device accepts and emits numbers either as JSON numbers or as numeric
/// strings, so values keep the primitive they were created with instead of
/// being coerced on either side.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Number(Number),
    Text(String),
}

impl FieldValue {
    /// Lenient conversion from an arbitrary JSON value.
    ///
    /// Numbers and strings are kept as-is, `null` becomes an empty string and
    /// anything else is kept as its JSON text.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Number(n) => FieldValue::Number(n),
            Value::String(s) => FieldValue::Text(s),
            Value::Null => FieldValue::Text(String::new()),
            Value::Bool(b) => FieldValue::Text(b.to_string()),
            other => FieldValue::Text(other.to_string()),
        }
    }

    /// Numeric reading of the value. Text is trimmed and parsed; non-finite
    /// results are rejected.
    pub fn as_f64(&self) -> Option<f64> {
        let parsed = match self {
            FieldValue::Number(n) => n.as_f64(),
            FieldValue::Text(s) => s.trim().parse::<f64>().ok(),
        };
        parsed.filter(|v| v.is_finite())
    }

    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Number(n) => Value::Number(n.clone()),
            FieldValue::Text(s) => Value::String(s.clone()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Text(s) if s.is_empty())
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(FieldValue::from_json)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value.into())
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Number(value.into())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        match Number::from_f64(value) {
            Some(n) => FieldValue::Number(n),
            None => FieldValue::Text(value.to_string()),
        }
    }
}

/// Formats a numeric reading the way the dashboard shows it: one decimal
/// place with ties rounded away from zero, or `--` when the device sent
/// nothing usable. Negative values keep their sign even when they round to
/// zero (`-0.04` shows `-0.0`).
pub fn format_reading(reading: Option<f64>) -> String {
    match reading {
        Some(v) => {
            let rounded = (v.abs() * 10.0 + 0.5).floor() / 10.0;
            format!("{}{:.1}", if v < 0.0 { "-" } else { "" }, rounded)
        }
        None => "--".to_string(),
    }
}

pub(crate) fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| FieldValue::from_json(v).as_f64()))
}

pub(crate) fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.map(|v| FieldValue::from_json(v).to_string()).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_text_is_read_as_number() {
        assert_eq!(FieldValue::from(" 12.34 ").as_f64(), Some(12.34));
        assert_eq!(FieldValue::from(7_i64).as_f64(), Some(7.0));
        assert_eq!(FieldValue::from("abc").as_f64(), None);
        assert_eq!(FieldValue::from("NaN").as_f64(), None);
    }

    #[test]
    fn reading_format_rounds_to_one_decimal() {
        assert_eq!(format_reading(Some(12.34)), "12.3");
        assert_eq!(format_reading(Some(5.6)), "5.6");
        assert_eq!(format_reading(Some(173.0)), "173.0");
        assert_eq!(format_reading(Some(63.25)), "63.3");
        assert_eq!(format_reading(Some(-10.0)), "-10.0");
        assert_eq!(format_reading(None), "--");
    }

    #[test]
    fn negative_ties_round_away_from_zero() {
        assert_eq!(format_reading(Some(-2.25)), "-2.3");
        assert_eq!(format_reading(Some(-63.25)), "-63.3");
        assert_eq!(format_reading(Some(-2.24)), "-2.2");
        assert_eq!(format_reading(Some(-0.04)), "-0.0");
        assert_eq!(format_reading(Some(0.04)), "0.0");
        assert_eq!(format_reading(Some(-0.0)), "0.0");
    }

    #[test]
    fn null_and_bool_are_kept_as_text() {
        assert_eq!(FieldValue::from_json(Value::Null), FieldValue::Text(String::new()));
        assert_eq!(FieldValue::from_json(Value::Bool(true)).to_string(), "true");
    }
}
