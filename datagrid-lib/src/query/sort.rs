//! Sort state and the sort stage.

use std::borrow::Cow;
use std::cmp::Ordering;

use log::warn;
use serde::Deserialize;
use serde::Serialize;

use super::collate;
use crate::column::Column;
use crate::model::Row;
use crate::model::Value;

/// Sort direction for ordering rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Apply this direction to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }

    /// Arrow shown next to an active column header.
    pub fn arrow(self) -> &'static str {
        match self {
            Direction::Asc => "▲",
            Direction::Desc => "▼",
        }
    }
}

/// Which column the table is sorted by, if any.
///
/// # Example
///
/// ```
/// use datagrid_lib::query::{Direction, SortState};
///
/// let state = SortState::default().toggled("name");
/// assert_eq!(state, SortState::asc("name"));
///
/// let state = state.toggled("name");
/// assert_eq!(state.direction, Direction::Desc);
///
/// let state = state.toggled("email");
/// assert_eq!(state, SortState::asc("email"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SortState {
    /// Active column key; `None` keeps input order.
    pub key: Option<String>,
    #[serde(default)]
    pub direction: Direction,
}

impl SortState {
    /// Ascending on a column.
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            direction: Direction::Asc,
        }
    }

    /// Descending on a column.
    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            direction: Direction::Desc,
        }
    }

    /// Returns the active key, if any.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Direction to show on `key`'s header, if it is the active column.
    pub fn indicator(&self, key: &str) -> Option<Direction> {
        (self.key() == Some(key)).then_some(self.direction)
    }

    /// State after the header for `key` is activated.
    ///
    /// The active column flips from ascending to descending; anything else
    /// (another column, or the active column already descending) becomes
    /// ascending on `key`.
    pub fn toggled(&self, key: &str) -> SortState {
        if self.key() == Some(key) && self.direction == Direction::Asc {
            SortState::desc(key)
        } else {
            SortState::asc(key)
        }
    }
}

/// Order rows by the column with key `key`.
///
/// Returns input order when `key` is `None` or names no column. The sort is
/// stable, so tied rows keep their relative order in both directions. Nulls
/// and rows whose accessor fails are the tied minimum.
pub fn sort<'a>(
    rows: impl IntoIterator<Item = &'a Row>,
    key: Option<&str>,
    direction: Direction,
    columns: &[Column],
) -> Vec<&'a Row> {
    let Some(column) = key.and_then(|key| columns.iter().find(|c| c.key == key)) else {
        return rows.into_iter().collect();
    };

    let mut keyed: Vec<(Cow<'a, Value>, &'a Row)> = rows
        .into_iter()
        .map(|row| (sort_value(column, row), row))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| direction.apply(compare_values(a, b)));
    keyed.into_iter().map(|(_, row)| row).collect()
}

fn sort_value<'a>(column: &Column, row: &'a Row) -> Cow<'a, Value> {
    column.resolve(row).unwrap_or_else(|err| {
        warn!("Sorting row as minimum for column '{}': {}", column.key, err);
        Cow::Owned(Value::Null)
    })
}

/// Ascending comparison of two values.
///
/// Strings use [`collate`]; numbers, date-times and booleans compare
/// relationally. `Null` is less than everything else. Values of different
/// kinds order by kind: bool, number, date-time, string, list, object.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    match (a, b) {
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,
        (Value::String(x), Value::String(y)) => collate(x, y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Int(x), Value::Int(y)) => x.cmp(y),
        (Value::Float(x), Value::Float(y)) => compare_floats(*x, *y),
        (Value::Int(x), Value::Float(y)) => compare_int_float(*x, *y),
        (Value::Float(x), Value::Int(y)) => compare_int_float(*y, *x).reverse(),
        (Value::DateTime(x), Value::DateTime(y)) => x.cmp(y),
        (Value::List(x), Value::List(y)) => x
            .iter()
            .zip(y)
            .map(|(a, b)| compare_values(a, b))
            .find(|o| o.is_ne())
            .unwrap_or_else(|| x.len().cmp(&y.len())),
        (Value::Object(_), Value::Object(_)) => Ordering::Equal,
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

/// Total order on floats where `-0.0 == 0.0`; NaN sorts by sign past the infinities.
fn compare_floats(x: f64, y: f64) -> Ordering {
    let zero = |v: f64| if v == 0.0 { 0.0 } else { v };
    zero(x).total_cmp(&zero(y))
}

/// Exact comparison of an integer with a float, without rounding through `f64`.
fn compare_int_float(int: i64, float: f64) -> Ordering {
    // 2^63, exactly representable.
    const BOUND: f64 = 9_223_372_036_854_775_808.0;

    if float.is_nan() {
        return if float.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    let whole = float.trunc();
    if whole >= BOUND {
        return Ordering::Less;
    }
    if whole < -BOUND {
        return Ordering::Greater;
    }
    // In range, so the cast is exact.
    match int.cmp(&(whole as i64)) {
        Ordering::Equal => 0.0_f64.total_cmp(&(float - whole)),
        other => other,
    }
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Int(_) | Value::Float(_) => 2,
        Value::DateTime(_) => 3,
        Value::String(_) => 4,
        Value::List(_) => 5,
        Value::Object(_) => 6,
    }
}
