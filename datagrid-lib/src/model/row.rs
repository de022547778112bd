//! Dynamic table row

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use super::Value;

/// A single row of table data.
///
/// Rows hold field values as an ordered map, so the engine never assumes a
/// fixed schema and serialized output is deterministic. Rows serialize as a
/// plain JSON object.
///
/// # Example
///
/// ```
/// use datagrid_lib::model::Row;
///
/// let row = Row::new()
///     .set("name", "Contoso")
///     .set("headcount", 120i64);
///
/// assert_eq!(row.get("name").and_then(|v| v.as_str()), Some("Contoso"));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    fields: BTreeMap<String, Value>,
}

impl Row {
    /// Creates a new empty row.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Looks up a dotted path such as `company.name`.
    ///
    /// An exact field name wins over path splitting, so keys that contain a
    /// dot are still reachable.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        if let Some(value) = self.fields.get(path) {
            return Some(value);
        }

        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.fields.get(first)?;
        for segment in segments {
            current = current.get(segment)?;
        }
        Some(current)
    }

    /// Returns `true` if the row contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_path_nested() {
        let row: Row =
            serde_json::from_str(r#"{"company": {"name": "Acme", "address": {"city": "Oslo"}}}"#)
                .unwrap();
        assert_eq!(row.get_path("company.name"), Some(&Value::from("Acme")));
        assert_eq!(row.get_path("company.address.city"), Some(&Value::from("Oslo")));
        assert_eq!(row.get_path("company.missing"), None);
        assert_eq!(row.get_path("company.name.deeper"), None);
    }

    #[test]
    fn test_get_path_prefers_exact_key() {
        let row = Row::new()
            .set("a.b", "flat")
            .set("a", Value::from(serde_json::json!({"b": "nested"})));
        assert_eq!(row.get_path("a.b"), Some(&Value::from("flat")));
    }

    #[test]
    fn test_serialize_is_plain_object() {
        let row = Row::new().set("b", 2i64).set("a", "x");
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"a":"x","b":2}"#);
    }
}
