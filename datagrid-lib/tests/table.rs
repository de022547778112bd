//! Table store driven by renderer events.

use datagrid_lib::Table;
use datagrid_lib::column::{Column, Columns};
use datagrid_lib::config::TableConfig;
use datagrid_lib::model::Row;
use datagrid_lib::query::{Direction, MatchMode, PageLink, SortState, page_links};
use datagrid_lib::response::ApiResponse;
use datagrid_lib::state::TableEvent;

const USERS: &str = r#"{
    "success": true,
    "data": [
        {"_id": "u1", "name": "Bob", "email": "bob@example.com", "role": "admin", "profile": {"city": "Oslo"}},
        {"_id": "u2", "name": "alice", "email": "alice@example.com", "role": "student", "profile": {"city": "Lima"}},
        {"_id": "u3", "name": "Eve", "email": "eve@example.com", "role": "student", "profile": {"city": "Bergen"}},
        {"_id": "u4", "name": "Émile", "email": "emile@example.com", "role": "recruiter", "profile": null}
    ],
    "total": 4,
    "page": 1,
    "pages": 1
}"#;

fn users_table(config: TableConfig) -> Table {
    let columns = Columns::new(vec![
        Column::field("name").header("Name").searchable(),
        Column::field("email").header("Email").searchable(),
        Column::field("city").path("profile.city").searchable(),
        Column::field("role").header("Role"),
        Column::field("_id").header("Actions").unsortable(),
    ])
    .unwrap();
    let rows = ApiResponse::from_json(USERS).unwrap().into_rows().unwrap();
    Table::new(columns, config).unwrap().with_rows(rows)
}

fn ids(table: &mut Table) -> Vec<String> {
    table
        .view()
        .rows
        .iter()
        .filter_map(|r| r.get("_id").map(|v| v.display_text()))
        .collect()
}

#[test]
fn test_initial_view_is_input_order() {
    let mut table = users_table(TableConfig::default());
    assert_eq!(ids(&mut table), ["u1", "u2", "u3", "u4"]);
    assert_eq!(table.view().page.total_pages, 1);
    assert_eq!(table.view().total_rows, 4);
}

#[test]
fn test_initial_sort_from_config() {
    let mut table = users_table(TableConfig::default().with_initial_sort(SortState::desc("name")));
    assert_eq!(ids(&mut table), ["u3", "u4", "u1", "u2"]);
}

#[test]
fn test_header_clicks() {
    let mut table = users_table(TableConfig::default());

    table.toggle_sort("name");
    assert_eq!(ids(&mut table), ["u2", "u1", "u4", "u3"]);
    assert_eq!(table.sort_indicator("name"), Some(Direction::Asc));

    table.toggle_sort("name");
    assert_eq!(ids(&mut table), ["u3", "u4", "u1", "u2"]);
    assert_eq!(table.sort_indicator("name"), Some(Direction::Desc));

    table.toggle_sort("_id");
    assert_eq!(table.sort_indicator("name"), Some(Direction::Desc));
    assert_eq!(table.sort_indicator("_id"), None);

    table.toggle_sort("role");
    assert_eq!(table.state().sort, SortState::asc("role"));
    assert_eq!(ids(&mut table), ["u1", "u4", "u2", "u3"]);
}

#[test]
fn test_search_on_nested_and_non_searchable_columns() {
    let mut table = users_table(TableConfig::default());

    table.set_search("BERG");
    assert_eq!(ids(&mut table), ["u3"]);

    table.set_search("recruiter");
    assert!(ids(&mut table).is_empty());
    assert_eq!(table.view().page.total_pages, 0);

    table.set_search("");
    assert_eq!(ids(&mut table).len(), 4);
}

#[test]
fn test_fuzzy_match_mode() {
    let mut table = users_table(TableConfig::default().with_match_mode(MatchMode::Fuzzy));
    table.set_search("bx");
    assert_eq!(ids(&mut table), ["u1"]);
}

#[test]
fn test_paging_events() {
    let columns = Columns::new(vec![Column::field("n").searchable()]).unwrap();
    let config = TableConfig::default().with_page_size_options(vec![5, 10]).with_default_page_size(5);
    let rows = (1..=23i64).map(|n| Row::new().set("n", n)).collect();
    let mut table = Table::new(columns, config).unwrap().with_rows(rows);

    table.set_page(5);
    let page = table.view().page;
    assert_eq!((page.current_page, page.first_item, page.last_item), (5, 21, 23));
    assert_eq!(
        page_links(page.current_page, page.total_pages, 1),
        vec![PageLink::Page(1), PageLink::Gap, PageLink::Page(4), PageLink::Page(5)]
    );

    table.set_page_size(10);
    assert_eq!(table.state().page, 1);
    assert_eq!(table.view().page.total_pages, 3);

    table.set_page(3);
    table.set_page_size(25);
    assert_eq!(table.state().page, 3);
    assert_eq!(table.state().page_size, 10);

    table.set_search("2");
    assert_eq!(table.state().page, 1);
    // 2, 12, 20..=23
    assert_eq!(table.view().page.total_items, 6);
}

#[test]
fn test_reset_event() {
    let mut table = users_table(TableConfig::default());
    table.set_search("bob");
    table.toggle_sort("email");
    table.dispatch(TableEvent::Reset);
    assert_eq!(table.state().search, "");
    assert_eq!(table.state().sort, SortState::default());
    assert_eq!(ids(&mut table).len(), 4);
}
