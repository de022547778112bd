//! Derived-state pipeline: filter → sort → paginate.

use log::trace;
use serde::Serialize;

use crate::column::Column;
use crate::model::Row;
use crate::query::MatchMode;
use crate::query::PageInfo;
use crate::query::SortState;
use crate::query::filter_with;
use crate::query::paginate;
use crate::query::sort;
use crate::state::TableState;

/// Everything a renderer needs for one frame of the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    /// Rows of the current page, in display order.
    pub rows: Vec<Row>,
    /// Active sort, for header indicators.
    pub sort: SortState,
    /// Page metadata; `total_items` counts rows that passed the search.
    pub page: PageInfo,
    /// Row count before filtering.
    pub total_rows: usize,
}

/// Run the three stages for `state`.
///
/// Pure: the same inputs always produce an equal view.
pub fn run(rows: &[Row], columns: &[Column], state: &TableState, mode: MatchMode) -> TableView {
    let filtered = filter_with(rows, &state.search, columns, mode);
    let sorted = sort(filtered, state.sort.key(), state.sort.direction, columns);
    let page = paginate(&sorted, state.page, state.page_size);

    trace!(
        "Pipeline: {} rows, {} matched, page {}/{}",
        rows.len(),
        page.info.total_items,
        page.info.current_page,
        page.info.total_pages
    );

    TableView {
        rows: page.window.into_iter().cloned().collect(),
        sort: state.sort.clone(),
        page: page.info,
        total_rows: rows.len(),
    }
}
