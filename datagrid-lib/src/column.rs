//! Column descriptors.
//!
//! A [`Column`] describes how to derive a display, sort and search value from
//! a [`Row`]. The [`Accessor`] is either a field path read straight from the
//! row or a derive function; both go through [`resolve`] so filtering,
//! sorting and rendering share one evaluation path.

use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::error::AccessError;
use crate::error::ConfigError;
use crate::model::Row;
use crate::model::Value;

/// Signature of a derive accessor.
pub type DeriveFn = dyn Fn(&Row) -> Result<Value, AccessError> + Send + Sync;

/// How a column reads its value from a row.
#[derive(Clone)]
pub enum Accessor {
    /// Read a field (or dotted path) directly from the row.
    Field(String),
    /// Compute the value from the whole row.
    Derive(Arc<DeriveFn>),
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Field(path) => f.debug_tuple("Field").field(path).finish(),
            Accessor::Derive(_) => f.write_str("Derive(..)"),
        }
    }
}

/// Column configuration.
///
/// # Examples
///
/// ```
/// use datagrid_lib::column::Column;
/// use datagrid_lib::model::Value;
///
/// let columns = vec![
///     Column::field("id").unsortable(),
///     Column::field("name").header("Name").searchable(),
///     Column::field("company").path("company.name").searchable(),
///     Column::derive("initial", |row| {
///         Ok(row
///             .get("name")
///             .and_then(Value::as_str)
///             .and_then(|name| name.chars().next())
///             .map(|c| Value::from(c.to_string()))
///             .unwrap_or_default())
///     }),
/// ];
/// ```
#[derive(Debug, Clone)]
pub struct Column {
    /// Unique key used for sort state and render keys.
    pub key: String,
    /// Header text.
    pub header: String,
    /// How the value is read from a row.
    pub accessor: Accessor,
    /// Whether the column takes part in free-text search.
    pub searchable: bool,
    /// Whether activating the header changes the sort.
    pub sortable: bool,
}

impl Column {
    /// Create a column reading the field named after its key.
    pub fn field(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            header: key.clone(),
            accessor: Accessor::Field(key.clone()),
            key,
            searchable: false,
            sortable: true,
        }
    }

    /// Create a column computing its value from the row.
    pub fn derive<F>(key: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Row) -> Result<Value, AccessError> + Send + Sync + 'static,
    {
        let key = key.into();
        Self {
            header: key.clone(),
            accessor: Accessor::Derive(Arc::new(f)),
            key,
            searchable: false,
            sortable: true,
        }
    }

    /// Read from a different field or dotted path.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.accessor = Accessor::Field(path.into());
        self
    }

    /// Set the header text.
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Include the column in free-text search.
    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    /// Ignore header activations for this column.
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Derive this column's value for a row.
    ///
    /// A missing field resolves to [`Value::Null`]; only derive functions
    /// can fail.
    pub fn resolve<'r>(&self, row: &'r Row) -> Result<Cow<'r, Value>, AccessError> {
        match &self.accessor {
            Accessor::Field(path) => Ok(row
                .get_path(path)
                .map(Cow::Borrowed)
                .unwrap_or(Cow::Owned(Value::Null))),
            Accessor::Derive(f) => f(row).map(Cow::Owned),
        }
    }
}

/// Derive `column`'s value for `row`.
pub fn resolve<'r>(column: &Column, row: &'r Row) -> Result<Cow<'r, Value>, AccessError> {
    column.resolve(row)
}

/// Serializable column description, as loaded from a JSON file.
///
/// Only field accessors can be described this way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Column key.
    pub key: String,
    /// Field or dotted path to read; defaults to the key.
    #[serde(default)]
    pub field: Option<String>,
    /// Header text; defaults to the key.
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default)]
    pub searchable: bool,
    #[serde(default = "default_sortable")]
    pub sortable: bool,
}

fn default_sortable() -> bool {
    true
}

impl From<ColumnSpec> for Column {
    fn from(spec: ColumnSpec) -> Self {
        let mut column = Column::field(spec.key);
        if let Some(field) = spec.field {
            column = column.path(field);
        }
        if let Some(header) = spec.header {
            column = column.header(header);
        }
        column.searchable = spec.searchable;
        column.sortable = spec.sortable;
        column
    }
}

/// An immutable, shareable set of columns.
///
/// Cloning is cheap and keeps the identity, which the table store uses to
/// tell a new column set from the one it already computed with.
#[derive(Debug, Clone)]
pub struct Columns {
    inner: Arc<[Column]>,
}

impl Columns {
    /// Create a column set, rejecting duplicate keys.
    pub fn new(columns: Vec<Column>) -> Result<Self, ConfigError> {
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.key == column.key) {
                return Err(ConfigError::DuplicateColumn {
                    key: column.key.clone(),
                });
            }
        }
        Ok(Self {
            inner: columns.into(),
        })
    }

    /// Create a column set from serialized specs.
    pub fn from_specs(specs: Vec<ColumnSpec>) -> Result<Self, ConfigError> {
        Self::new(specs.into_iter().map(Column::from).collect())
    }

    /// Find a column by key.
    pub fn get(&self, key: &str) -> Option<&Column> {
        self.inner.iter().find(|c| c.key == key)
    }

    /// Iterate over the searchable columns.
    pub fn searchable(&self) -> impl Iterator<Item = &Column> {
        self.inner.iter().filter(|c| c.searchable)
    }

    /// Returns `true` if both sets are the same allocation.
    pub fn same_as(&self, other: &Columns) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Deref for Columns {
    type Target = [Column];

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_resolves_to_null() {
        let column = Column::field("name");
        let row = Row::new().set("id", 1i64);
        assert_eq!(column.resolve(&row).unwrap().as_ref(), &Value::Null);
    }

    #[test]
    fn test_derive_accessor() {
        let column = Column::derive("double", |row| match row.get("n") {
            Some(Value::Int(n)) => Ok(Value::Int(n * 2)),
            Some(other) => Err(AccessError::unsupported("double", other.type_name())),
            None => Ok(Value::Null),
        });
        let row = Row::new().set("n", 21i64);
        assert_eq!(resolve(&column, &row).unwrap().into_owned(), Value::Int(42));

        let bad = Row::new().set("n", "x");
        assert_eq!(
            resolve(&column, &bad).unwrap_err(),
            AccessError::unsupported("double", "string")
        );
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let err = Columns::new(vec![Column::field("a"), Column::field("a")]).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateColumn { key: "a".into() });
    }

    #[test]
    fn test_spec_defaults() {
        let specs: Vec<ColumnSpec> = serde_json::from_str(
            r#"[{"key": "name", "searchable": true}, {"key": "city", "field": "address.city", "sortable": false}]"#,
        )
        .unwrap();
        let columns = Columns::from_specs(specs).unwrap();

        let name = columns.get("name").unwrap();
        assert!(name.searchable);
        assert!(name.sortable);
        assert_eq!(name.header, "name");

        let city = columns.get("city").unwrap();
        assert!(!city.sortable);
        assert!(matches!(&city.accessor, Accessor::Field(p) if p == "address.city"));
    }

    #[test]
    fn test_clone_keeps_identity() {
        let a = Columns::new(vec![Column::field("x")]).unwrap();
        let b = a.clone();
        let c = Columns::new(vec![Column::field("x")]).unwrap();
        assert!(a.same_as(&b));
        assert!(!a.same_as(&c));
    }
}
