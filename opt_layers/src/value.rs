//! Dynamic values flowing through option resolution.
//!
//! Raw values arrive as command-line text, environment strings, booleans from
//! bare switches, or structured defaults. [`Value`] models all of them along
//! with the temporal values produced by the `datetime` family of types.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Ordered dictionary with no inherited members.
pub type Dict = BTreeMap<String, Value>;

/// Calendar and clock values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Temporal {
    /// Date and time with a fixed UTC offset.
    DateTime(DateTime<FixedOffset>),
    /// Calendar date without a time component.
    Date(NaiveDate),
    /// Time of day without a date component.
    Time(NaiveTime),
}

impl fmt::Display for Temporal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DateTime(value) => f.write_str(&value.to_rfc3339()),
            Self::Date(value) => write!(f, "{value}"),
            Self::Time(value) => write!(f, "{value}"),
        }
    }
}

/// A dynamically typed option value.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Absence of a value.
    #[default]
    Null,
    /// Boolean switch state.
    Bool(bool),
    /// Numeric value. All numbers share one floating representation, so
    /// integral checks are performed by the type registry.
    Number(f64),
    /// Text.
    String(String),
    /// Ordered sequence.
    Array(Vec<Value>),
    /// Plain dictionary.
    Object(Dict),
    /// Date, time or date-time.
    Temporal(Temporal),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the text when the value is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the number when the value is numeric.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            _ => None,
        }
    }

    /// Returns the flag when the value is a boolean.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Short label naming the variant, used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "dictionary",
            Self::Temporal(_) => "datetime",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(flag) => write!(f, "{flag}"),
            Self::Number(number) => write!(f, "{number}"),
            Self::String(text) => write!(f, "{text:?}"),
            Self::Array(items) => {
                f.write_str("[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Object(entries) if entries.is_empty() => f.write_str("{}"),
            Self::Object(entries) => {
                f.write_str("{ ")?;
                for (index, (key, item)) in entries.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {item}")?;
                }
                f.write_str(" }")
            }
            Self::Temporal(value) => write!(f, "{value}"),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(flag) => Self::Bool(flag),
            serde_json::Value::Number(number) => number.as_f64().map_or(Self::Null, Self::Number),
            serde_json::Value::String(text) => Self::String(text),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(entries) => Self::Object(
                entries
                    .into_iter()
                    .map(|(key, item)| (key, Self::from(item)))
                    .collect(),
            ),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(Self::from)
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Self::Number(number)
    }
}

impl From<i32> for Value {
    fn from(number: i32) -> Self {
        Self::Number(f64::from(number))
    }
}

impl From<u32> for Value {
    fn from(number: u32) -> Self {
        Self::Number(f64::from(number))
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::String(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::String(text)
    }
}

impl From<Vec<Self>> for Value {
    fn from(items: Vec<Self>) -> Self {
        Self::Array(items)
    }
}

impl From<Dict> for Value {
    fn from(entries: Dict) -> Self {
        Self::Object(entries)
    }
}

impl From<Temporal> for Value {
    fn from(value: Temporal) -> Self {
        Self::Temporal(value)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case(Value::Null, "null")]
    #[case(Value::from(8080), "8080")]
    #[case(Value::from(1.5), "1.5")]
    #[case(Value::from("x"), "\"x\"")]
    #[case(Value::from(vec![Value::from(1), Value::from(-3)]), "[1, -3]")]
    #[case(Value::Object(Dict::new()), "{}")]
    fn renders_for_diagnostics(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
    }

    #[test]
    fn renders_dictionaries_in_key_order() {
        let value = Value::from(json!({"b": "x", "a": 1}));
        assert_eq!(value.to_string(), "{ a: 1, b: \"x\" }");
    }

    #[test]
    fn converts_nested_json() {
        let value = Value::from(json!({"ports": [80, 443], "tls": true}));
        let Value::Object(entries) = value else {
            panic!("expected a dictionary");
        };
        assert_eq!(
            entries.get("ports"),
            Some(&Value::from(vec![Value::from(80), Value::from(443)]))
        );
        assert_eq!(entries.get("tls"), Some(&Value::Bool(true)));
    }

    #[test]
    fn deserializes_through_json() -> anyhow::Result<()> {
        let value: Value = serde_json::from_str(r#"{"level": "info"}"#)?;
        anyhow::ensure!(value.kind() == "dictionary", "unexpected kind {}", value.kind());
        Ok(())
    }
}
