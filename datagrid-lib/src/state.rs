//! Table state and the reducer that drives it.
//!
//! All user interaction arrives as a [`TableEvent`]. [`reduce`] is a pure
//! function from the current [`TableState`] and an event to the next state;
//! every reset (page back to 1 on search, sort or page-size changes) happens
//! here rather than as a side effect of rendering.

use log::debug;
use log::warn;
use serde::Deserialize;
use serde::Serialize;

use crate::column::Column;
use crate::config::TableConfig;
use crate::query::SortState;
use crate::query::total_pages;

/// The user-controlled inputs of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableState {
    /// Free-text search term; empty means no filtering.
    pub search: String,
    pub sort: SortState,
    /// 1-based page number as requested; clamped when paginating.
    pub page: usize,
    pub page_size: usize,
}

impl TableState {
    /// Initial state for a config.
    pub fn from_config(config: &TableConfig) -> Self {
        Self {
            search: String::new(),
            sort: config.initial_sort.clone().unwrap_or_default(),
            page: 1,
            page_size: config.default_page_size.max(1),
        }
    }
}

impl Default for TableState {
    fn default() -> Self {
        Self::from_config(&TableConfig::default())
    }
}

/// Something the renderer or the data owner reports to the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    /// The search box changed.
    SearchChanged(String),
    /// A column header was activated.
    SortToggled(String),
    /// A page link was activated.
    PageChanged(usize),
    /// A page size was picked.
    PageSizeChanged(usize),
    /// The column set was replaced.
    ColumnsChanged,
    /// The rows were replaced; `matched` rows pass the current search.
    RowsChanged { matched: usize },
    /// Back to the configured defaults.
    Reset,
}

/// What the reducer needs to know besides the state itself.
#[derive(Debug, Clone, Copy)]
pub struct ReduceContext<'a> {
    pub columns: &'a [Column],
    pub config: &'a TableConfig,
}

/// Compute the state after `event`.
///
/// Invalid inputs never fail: unknown or unsortable sort keys and page sizes
/// outside the configured options leave the state unchanged.
///
/// # Example
///
/// ```
/// use datagrid_lib::column::Column;
/// use datagrid_lib::config::TableConfig;
/// use datagrid_lib::state::{reduce, ReduceContext, TableEvent, TableState};
///
/// let columns = vec![Column::field("name")];
/// let config = TableConfig::default();
/// let ctx = ReduceContext { columns: &columns, config: &config };
///
/// let state = TableState::from_config(&config);
/// let state = reduce(&state, TableEvent::PageChanged(3), &ctx);
/// let state = reduce(&state, TableEvent::SortToggled("name".into()), &ctx);
/// assert_eq!(state.page, 1);
/// ```
pub fn reduce(state: &TableState, event: TableEvent, ctx: &ReduceContext<'_>) -> TableState {
    let mut next = state.clone();
    match event {
        TableEvent::SearchChanged(search) => {
            next.search = search;
            next.page = 1;
        }
        TableEvent::SortToggled(key) => match ctx.columns.iter().find(|c| c.key == key) {
            Some(column) if column.sortable => {
                next.sort = state.sort.toggled(&key);
                next.page = 1;
            }
            Some(_) => debug!("Ignoring sort on unsortable column '{}'", key),
            None => debug!("Ignoring sort on unknown column '{}'", key),
        },
        TableEvent::PageChanged(page) => {
            next.page = page.max(1);
        }
        TableEvent::PageSizeChanged(size) => {
            if ctx.config.accepts_page_size(size) {
                next.page_size = size;
                next.page = 1;
            } else {
                warn!(
                    "Ignoring page size {} (options: {:?})",
                    size, ctx.config.page_size_options
                );
            }
        }
        TableEvent::ColumnsChanged => {
            next.page = 1;
            if let Some(key) = state.sort.key()
                && !ctx.columns.iter().any(|c| c.key == key && c.sortable)
            {
                debug!("Clearing sort on removed or unsortable column '{}'", key);
                next.sort = SortState::default();
            }
        }
        TableEvent::RowsChanged { matched } => {
            let pages = total_pages(matched, state.page_size);
            if pages > 0 && state.page > pages {
                debug!("Page {} is past the last page {}, back to 1", state.page, pages);
                next.page = 1;
            }
        }
        TableEvent::Reset => {
            next = TableState::from_config(ctx.config);
        }
    }
    next
}
