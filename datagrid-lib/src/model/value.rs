//! Value enum for dynamic field values

use std::borrow::Cow;
use std::collections::BTreeMap;

use chrono::DateTime;
use chrono::SecondsFormat;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// A dynamic value that can hold any field of a row.
///
/// Rows arrive as JSON from a REST API, so the variants mirror the JSON data
/// model plus a native date-time for values produced by derive accessors.
///
/// # Type Mapping
///
/// | JSON | Rust Variant |
/// |------|--------------|
/// | null | `Null` |
/// | true/false | `Bool` |
/// | integer | `Int` |
/// | other number | `Float` |
/// | string | `String` |
/// | array | `List` |
/// | object | `Object` |
///
/// `DateTime` is never produced by deserialization; JSON strings stay strings.
///
/// # Example
///
/// ```
/// use datagrid_lib::model::Value;
///
/// let name = Value::from("Contoso");
/// let headcount = Value::from(120i64);
/// let active = Value::from(true);
/// let empty = Value::Null;
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null/empty value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// String value.
    String(String),
    /// Date and time in UTC.
    DateTime(DateTime<Utc>),
    /// Array of values.
    List(Vec<Value>),
    /// Nested object.
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::DateTime(_) => "datetime",
            Value::List(_) => "list",
            Value::Object(_) => "object",
        }
    }

    /// Returns the string slice if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as a float if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the nested field of an object value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(field),
            _ => None,
        }
    }

    /// Text used for free-text search.
    ///
    /// Returns `None` for values that can never match a search term: nulls,
    /// empty strings and objects.
    pub fn search_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Null | Value::Object(_) => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(Cow::Borrowed(s)),
            Value::List(items) => {
                let parts: Vec<Cow<'_, str>> = items.iter().filter_map(Value::search_text).collect();
                if parts.is_empty() {
                    None
                } else {
                    Some(Cow::Owned(parts.join(",")))
                }
            }
            other => Some(Cow::Owned(other.display_text())),
        }
    }

    /// Text shown in a rendered cell. Nulls render as an empty string.
    pub fn display_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(v) => v.to_string(),
            Value::Int(v) => v.to_string(),
            Value::Float(v) => v.to_string(),
            Value::String(s) => s.clone(),
            Value::DateTime(dt) => dt.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            Value::List(items) => items
                .iter()
                .map(Value::display_text)
                .collect::<Vec<_>>()
                .join(","),
            Value::Object(_) => serde_json::to_string(self).unwrap_or_default(),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_deserialize_json_shapes() {
        let value: Value =
            serde_json::from_str(r#"{"a": null, "b": 3, "c": 1.5, "d": "x", "e": [true]}"#)
                .unwrap();
        assert_eq!(value.get("a"), Some(&Value::Null));
        assert_eq!(value.get("b"), Some(&Value::Int(3)));
        assert_eq!(value.get("c"), Some(&Value::Float(1.5)));
        assert_eq!(value.get("d"), Some(&Value::from("x")));
        assert_eq!(value.get("e"), Some(&Value::List(vec![Value::Bool(true)])));
    }

    #[test]
    fn test_iso_strings_stay_strings() {
        let value: Value = serde_json::from_str(r#""2024-03-01T10:00:00Z""#).unwrap();
        assert_eq!(value.type_name(), "string");
    }

    #[test]
    fn test_search_text() {
        assert_eq!(Value::Null.search_text(), None);
        assert_eq!(Value::from("").search_text(), None);
        assert_eq!(Value::from(42i64).search_text().as_deref(), Some("42"));
        assert_eq!(Value::from(1.0).search_text().as_deref(), Some("1"));
        assert_eq!(Value::from(false).search_text().as_deref(), Some("false"));
        assert_eq!(
            Value::List(vec!["a".into(), Value::Null, 2i64.into()])
                .search_text()
                .as_deref(),
            Some("a,2")
        );
        assert_eq!(Value::Object(BTreeMap::new()).search_text(), None);
    }

    #[test]
    fn test_display_datetime() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        assert_eq!(Value::from(dt).display_text(), "2024-03-01T10:00:00Z");
    }

    #[test]
    fn test_from_serde_json() {
        let json = serde_json::json!({"n": {"deep": 7}});
        let value = Value::from(json);
        assert_eq!(
            value.get("n").and_then(|n| n.get("deep")),
            Some(&Value::Int(7))
        );
    }
}
