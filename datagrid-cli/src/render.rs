//! Terminal rendering of a table view.

use comfy_table::presets::UTF8_FULL;
use datagrid_lib::TableView;
use datagrid_lib::column::{Column, Columns};
use datagrid_lib::model::Row;
use datagrid_lib::query::{PageLink, page_links};
use log::warn;

/// Pages shown on each side of the current page in the footer.
const PAGE_LINK_SIBLINGS: usize = 1;

/// Render the view as a text table followed by a pagination footer.
pub fn table(columns: &Columns, view: &TableView) -> String {
    let mut out = comfy_table::Table::new();
    out.load_preset(UTF8_FULL);
    out.set_header(
        columns
            .iter()
            .map(|column| header(column, view))
            .collect::<Vec<_>>(),
    );
    for row in &view.rows {
        out.add_row(
            columns
                .iter()
                .map(|column| cell(column, row))
                .collect::<Vec<_>>(),
        );
    }
    format!("{}\n{}", out, footer(view))
}

fn header(column: &Column, view: &TableView) -> String {
    match view.sort.indicator(&column.key) {
        Some(direction) if column.sortable => format!("{} {}", column.header, direction.arrow()),
        _ => column.header.clone(),
    }
}

fn cell(column: &Column, row: &Row) -> String {
    match column.resolve(row) {
        Ok(value) => value.display_text(),
        Err(err) => {
            warn!("Rendering empty cell: {}", err);
            String::new()
        }
    }
}

/// "Showing 11-20 of 23" plus page links, or a note when nothing matched.
fn footer(view: &TableView) -> String {
    let page = &view.page;
    if page.total_items == 0 {
        return if view.total_rows == 0 {
            "No rows".to_string()
        } else {
            format!("No matching rows (0 of {})", view.total_rows)
        };
    }

    let mut summary = format!(
        "Showing {}-{} of {}",
        page.first_item, page.last_item, page.total_items
    );
    if page.total_items != view.total_rows {
        summary.push_str(&format!(" (filtered from {})", view.total_rows));
    }

    let links: Vec<String> = page_links(page.current_page, page.total_pages, PAGE_LINK_SIBLINGS)
        .into_iter()
        .map(|link| match link {
            PageLink::Page(n) if n == page.current_page => format!("[{}]", n),
            PageLink::Page(n) => n.to_string(),
            PageLink::Gap => "…".to_string(),
        })
        .collect();

    format!(
        "{} · page {}/{}  {}",
        summary,
        page.current_page,
        page.total_pages,
        links.join(" ")
    )
}

#[cfg(test)]
mod tests {
    use datagrid_lib::Table;
    use datagrid_lib::config::TableConfig;

    use super::*;

    fn table_of(count: i64) -> Table {
        let columns = Columns::new(vec![
            Column::field("id").header("ID"),
            Column::field("name").header("Name").searchable(),
        ])
        .unwrap();
        let rows = (1..=count)
            .map(|i| Row::new().set("id", i).set("name", format!("user {}", i)))
            .collect();
        Table::new(columns, TableConfig::default()).unwrap().with_rows(rows)
    }

    #[test]
    fn test_header_arrow_on_sorted_column() {
        let mut t = table_of(3);
        t.toggle_sort("id");
        t.toggle_sort("id");
        let columns = t.columns().clone();
        let text = table(&columns, t.view());
        assert!(text.contains("ID ▼"));
        assert!(!text.contains("Name ▲"));
    }

    #[test]
    fn test_footer_summary_and_links() {
        let mut t = table_of(95);
        t.set_page(5);
        let text = footer(t.view());
        assert_eq!(text, "Showing 41-50 of 95 · page 5/10  1 … 4 [5] 6 … 10");
    }

    #[test]
    fn test_footer_filtered() {
        let mut t = table_of(12);
        t.set_search("user 1");
        assert_eq!(
            footer(t.view()),
            "Showing 1-4 of 4 (filtered from 12) · page 1/1  [1]"
        );

        t.set_search("nobody");
        assert_eq!(footer(t.view()), "No matching rows (0 of 12)");
    }

    #[test]
    fn test_rows_rendered() {
        let mut t = table_of(2);
        let columns = t.columns().clone();
        let text = table(&columns, t.view());
        assert!(text.contains("user 1"));
        assert!(text.contains("user 2"));
    }
}
