//! Table store.

use log::debug;
use log::trace;

use crate::column::Columns;
use crate::config::TableConfig;
use crate::error::ConfigError;
use crate::model::Row;
use crate::pipeline;
use crate::pipeline::TableView;
use crate::query::Direction;
use crate::query::filter_with;
use crate::state::ReduceContext;
use crate::state::TableEvent;
use crate::state::TableState;
use crate::state::reduce;

/// Last computed view and the inputs it was computed from.
#[derive(Debug)]
struct Memo {
    rows_generation: u64,
    columns: Columns,
    state: TableState,
    view: TableView,
}

/// A data table: rows, columns, user state and the memoized view.
///
/// `Table` owns everything the pipeline reads. Interaction goes through
/// [`Table::dispatch`] (or the shorthand setters), and [`Table::view`]
/// recomputes only when rows, columns or state changed since the last call.
///
/// # Example
///
/// ```
/// use datagrid_lib::Table;
/// use datagrid_lib::column::{Column, Columns};
/// use datagrid_lib::config::TableConfig;
/// use datagrid_lib::model::Row;
///
/// let columns = Columns::new(vec![Column::field("name").searchable()]).unwrap();
/// let mut table = Table::new(columns, TableConfig::default())
///     .unwrap()
///     .with_rows(vec![
///         Row::new().set("name", "Bob"),
///         Row::new().set("name", "alice"),
///         Row::new().set("name", "Eve"),
///     ]);
///
/// table.toggle_sort("name");
/// let names: Vec<String> = table
///     .view()
///     .rows
///     .iter()
///     .map(|row| row.get("name").unwrap().display_text())
///     .collect();
/// assert_eq!(names, ["alice", "Bob", "Eve"]);
/// ```
#[derive(Debug)]
pub struct Table {
    rows: Vec<Row>,
    rows_generation: u64,
    columns: Columns,
    config: TableConfig,
    state: TableState,
    memo: Option<Memo>,
}

impl Table {
    /// Create an empty table, validating the config against the columns.
    pub fn new(columns: Columns, config: TableConfig) -> Result<Self, ConfigError> {
        config.validate(&columns)?;
        Ok(Self {
            rows: Vec::new(),
            rows_generation: 0,
            state: TableState::from_config(&config),
            columns,
            config,
            memo: None,
        })
    }

    /// Set initial rows.
    pub fn with_rows(mut self, rows: Vec<Row>) -> Self {
        self.set_rows(rows);
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Get all rows, unfiltered.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Get the column set.
    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    /// Get the config.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Get the current state.
    pub fn state(&self) -> &TableState {
        &self.state
    }

    /// Direction to show on a column header, if it is the sort column.
    pub fn sort_indicator(&self, key: &str) -> Option<Direction> {
        self.state.sort.indicator(key)
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Apply an event to the state.
    pub fn dispatch(&mut self, event: TableEvent) {
        trace!("Table event: {:?}", event);
        let ctx = ReduceContext {
            columns: &self.columns,
            config: &self.config,
        };
        self.state = reduce(&self.state, event, &ctx);
    }

    /// Change the search term.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.dispatch(TableEvent::SearchChanged(term.into()));
    }

    /// Activate a column header.
    pub fn toggle_sort(&mut self, key: impl Into<String>) {
        self.dispatch(TableEvent::SortToggled(key.into()));
    }

    /// Go to a page.
    pub fn set_page(&mut self, page: usize) {
        self.dispatch(TableEvent::PageChanged(page));
    }

    /// Pick a page size.
    pub fn set_page_size(&mut self, size: usize) {
        self.dispatch(TableEvent::PageSizeChanged(size));
    }

    /// Replace all rows.
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        self.rows_generation += 1;
        let matched = filter_with(
            &self.rows,
            &self.state.search,
            &self.columns,
            self.config.match_mode,
        )
        .len();
        self.dispatch(TableEvent::RowsChanged { matched });
    }

    /// Replace the column set.
    ///
    /// Fails without changing anything if the config's initial sort does not
    /// fit the new columns.
    pub fn set_columns(&mut self, columns: Columns) -> Result<(), ConfigError> {
        self.config.validate(&columns)?;
        self.columns = columns;
        self.dispatch(TableEvent::ColumnsChanged);
        Ok(())
    }

    /// Back to the configured defaults.
    pub fn reset(&mut self) {
        self.dispatch(TableEvent::Reset);
    }

    // -------------------------------------------------------------------------
    // View
    // -------------------------------------------------------------------------

    /// Get the current view, recomputing it only if an input changed.
    pub fn view(&mut self) -> &TableView {
        let memo = match self.memo.take() {
            Some(memo)
                if memo.rows_generation == self.rows_generation
                    && memo.columns.same_as(&self.columns)
                    && memo.state == self.state =>
            {
                debug!("Reusing memoized table view");
                memo
            }
            _ => Memo {
                view: pipeline::run(
                    &self.rows,
                    &self.columns,
                    &self.state,
                    self.config.match_mode,
                ),
                rows_generation: self.rows_generation,
                columns: self.columns.clone(),
                state: self.state.clone(),
            },
        };
        &self.memo.insert(memo).view
    }
}
