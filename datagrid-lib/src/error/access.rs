//! AccessError for column accessors

/// Error returned when a column cannot derive a value from a row.
///
/// The pipeline never propagates these: a failing row is treated as a
/// non-match when filtering and as the tied minimum when sorting.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AccessError {
    /// The derive function failed for this row.
    #[error("Column '{column}' failed to derive a value: {message}")]
    Failed { column: String, message: String },

    /// The row holds a value the column cannot work with.
    #[error("Column '{column}' cannot use a {type_name} value")]
    Unsupported {
        column: String,
        type_name: &'static str,
    },
}

impl AccessError {
    /// Creates a new derive failure.
    pub fn failed(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Creates a new unsupported value error.
    pub fn unsupported(column: impl Into<String>, type_name: &'static str) -> Self {
        Self::Unsupported {
            column: column.into(),
            type_name,
        }
    }

    /// Returns the key of the column that failed.
    pub fn column(&self) -> &str {
        match self {
            Self::Failed { column, .. } | Self::Unsupported { column, .. } => column,
        }
    }
}
