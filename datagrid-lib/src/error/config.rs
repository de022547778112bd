//! Configuration error types

/// Errors found while validating a table configuration or column set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A page size of zero was listed in the options.
    #[error("Page size options must be positive")]
    ZeroPageSize,

    /// The default page size is not one of the configured options.
    #[error("Default page size {size} is not one of the options {options:?}")]
    DefaultPageSize { size: usize, options: Vec<usize> },

    /// The initial sort names a column that does not exist.
    #[error("Initial sort column '{key}' does not exist")]
    UnknownSortColumn { key: String },

    /// The initial sort names a column that is not sortable.
    #[error("Initial sort column '{key}' is not sortable")]
    UnsortableColumn { key: String },

    /// Two columns share the same key.
    #[error("Duplicate column key '{key}'")]
    DuplicateColumn { key: String },
}
