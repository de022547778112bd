//! Table configuration

use serde::Deserialize;
use serde::Serialize;

use crate::column::Column;
use crate::error::ConfigError;
use crate::query::MatchMode;
use crate::query::SortState;

/// Configuration for a table's pagination, initial sort and search.
///
/// Every field has a default, so a partial JSON object deserializes.
///
/// # Example
///
/// ```
/// use datagrid_lib::config::TableConfig;
/// use datagrid_lib::query::SortState;
///
/// let config = TableConfig::default()
///     .with_page_size_options(vec![5, 10, 20])
///     .with_default_page_size(5)
///     .with_initial_sort(SortState::desc("created_at"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Page sizes the user may pick from. Empty allows any positive size.
    ///
    /// Default: 10, 25, 50, 100
    pub page_size_options: Vec<usize>,

    /// Page size on first render.
    ///
    /// Default: 10
    pub default_page_size: usize,

    /// Sort applied before any header is activated.
    ///
    /// Default: none (input order)
    pub initial_sort: Option<SortState>,

    /// How search terms are matched.
    ///
    /// Default: substring
    pub match_mode: MatchMode,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size_options: vec![10, 25, 50, 100],
            default_page_size: 10,
            initial_sort: None,
            match_mode: MatchMode::Substring,
        }
    }
}

impl TableConfig {
    /// Creates a new table config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size options.
    pub fn with_page_size_options(mut self, options: Vec<usize>) -> Self {
        self.page_size_options = options;
        self
    }

    /// Sets the default page size.
    pub fn with_default_page_size(mut self, size: usize) -> Self {
        self.default_page_size = size;
        self
    }

    /// Sets the initial sort.
    pub fn with_initial_sort(mut self, sort: SortState) -> Self {
        self.initial_sort = Some(sort);
        self
    }

    /// Sets the match mode.
    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    /// Returns `true` if the user may switch to `size`.
    pub fn accepts_page_size(&self, size: usize) -> bool {
        size > 0 && (self.page_size_options.is_empty() || self.page_size_options.contains(&size))
    }

    /// Check the config against the columns it will be used with.
    pub fn validate(&self, columns: &[Column]) -> Result<(), ConfigError> {
        if self.default_page_size == 0 || self.page_size_options.contains(&0) {
            return Err(ConfigError::ZeroPageSize);
        }
        if !self.accepts_page_size(self.default_page_size) {
            return Err(ConfigError::DefaultPageSize {
                size: self.default_page_size,
                options: self.page_size_options.clone(),
            });
        }
        if let Some(key) = self.initial_sort.as_ref().and_then(SortState::key) {
            match columns.iter().find(|c| c.key == key) {
                None => {
                    return Err(ConfigError::UnknownSortColumn {
                        key: key.to_string(),
                    });
                }
                Some(column) if !column.sortable => {
                    return Err(ConfigError::UnsortableColumn {
                        key: key.to_string(),
                    });
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}
