//! Command-line arguments and the run loop.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use datagrid_lib::Table;
use datagrid_lib::column::{Column, ColumnSpec, Columns};
use datagrid_lib::config::TableConfig;
use datagrid_lib::model::Row;
use datagrid_lib::response::ApiResponse;
use datagrid_lib::state::TableEvent;
use log::{debug, info};

use crate::render;

/// Search, sort and page through a JSON list response.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// JSON list response (`{"success", "data", ...}`) or array of rows; `-` reads stdin
    pub input: Option<PathBuf>,

    /// JSON array of column specs; defaults to every field of the first row
    #[arg(short, long)]
    pub columns: Option<PathBuf>,

    /// JSON table config (page sizes, initial sort, match mode)
    #[arg(long, env = "DATAGRID_CONFIG")]
    pub config: Option<PathBuf>,

    /// Free-text search term
    #[arg(short, long)]
    pub search: Option<String>,

    /// Activate a column header; repeat to toggle direction
    #[arg(long = "sort", value_name = "KEY")]
    pub sort: Vec<String>,

    /// Page to show; out-of-range pages are clamped
    #[arg(short, long, allow_negative_numbers = true)]
    pub page: Option<i64>,

    /// Rows per page; must be one of the configured options
    #[arg(long)]
    pub page_size: Option<usize>,

    #[arg(long, value_enum, default_value_t = Format::Table)]
    pub format: Format,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Table,
    Json,
}

/// Read everything named by `args` and render the requested page.
pub fn run(args: &Args) -> Result<String> {
    let body = read_input(args.input.as_deref())?;
    let columns = match &args.columns {
        Some(path) => Some(load_columns(path)?),
        None => None,
    };
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => TableConfig::default(),
    };
    render_body(args, &body, columns, config)
}

/// Render `body` with already-loaded columns and config.
pub fn render_body(
    args: &Args,
    body: &str,
    columns: Option<Columns>,
    config: TableConfig,
) -> Result<String> {
    let rows = ApiResponse::from_json(body)
        .context("Failed to parse input")?
        .into_rows()?;
    info!("Loaded {} rows", rows.len());

    let columns = match columns {
        Some(columns) => columns,
        None => infer_columns(&rows)?,
    };
    let mut table = Table::new(columns, config)
        .context("Invalid table config")?
        .with_rows(rows);
    for event in events(args) {
        table.dispatch(event);
    }

    let columns = table.columns().clone();
    let view = table.view();
    match args.format {
        Format::Table => Ok(render::table(&columns, view)),
        Format::Json => Ok(serde_json::to_string_pretty(view)?),
    }
}

/// Translate arguments into the events a user would have produced.
///
/// Page size and sort come first because both reset the page.
fn events(args: &Args) -> Vec<TableEvent> {
    let mut events = Vec::new();
    if let Some(size) = args.page_size {
        events.push(TableEvent::PageSizeChanged(size));
    }
    for key in &args.sort {
        events.push(TableEvent::SortToggled(key.clone()));
    }
    if let Some(search) = &args.search {
        events.push(TableEvent::SearchChanged(search.clone()));
    }
    if let Some(page) = args.page {
        let page = usize::try_from(page.max(1)).unwrap_or(usize::MAX);
        events.push(TableEvent::PageChanged(page));
    }
    events
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            debug!("Reading rows from stdin");
            let mut body = String::new();
            std::io::stdin()
                .read_to_string(&mut body)
                .context("Failed to read stdin")?;
            Ok(body)
        }
    }
}

fn load_columns(path: &Path) -> Result<Columns> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read columns {}", path.display()))?;
    let specs: Vec<ColumnSpec> = serde_json::from_str(&text)
        .with_context(|| format!("Invalid column specs in {}", path.display()))?;
    Ok(Columns::from_specs(specs)?)
}

fn load_config(path: &Path) -> Result<TableConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid config in {}", path.display()))
}

/// One searchable column per field of the first row.
fn infer_columns(rows: &[Row]) -> Result<Columns> {
    let keys = rows
        .first()
        .map(|row| row.fields().keys().cloned().collect::<Vec<_>>())
        .unwrap_or_default();
    debug!("Inferred columns: {:?}", keys);
    Ok(Columns::new(
        keys.into_iter()
            .map(|key| Column::field(key).searchable())
            .collect(),
    )?)
}

#[cfg(test)]
mod tests {
    use datagrid_lib::query::SortState;

    use super::*;

    const BODY: &str = r#"{"success": true, "data": [
        {"id": 1, "name": "Bob"},
        {"id": 2, "name": "alice"},
        {"id": 3, "name": "Eve"}
    ]}"#;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["datagrid"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_parse_args() {
        let args = args(&["users.json", "--sort", "name", "--sort", "name", "-p", "-3", "-vv"]);
        assert_eq!(args.input, Some(PathBuf::from("users.json")));
        assert_eq!(args.sort, ["name", "name"]);
        assert_eq!(args.page, Some(-3));
        assert_eq!(args.verbose, 2);
        assert_eq!(args.format, Format::Table);
    }

    #[test]
    fn test_event_order() {
        let args = args(&["--page-size", "25", "--sort", "id", "-s", "x", "-p", "0"]);
        assert_eq!(
            events(&args),
            vec![
                TableEvent::PageSizeChanged(25),
                TableEvent::SortToggled("id".into()),
                TableEvent::SearchChanged("x".into()),
                TableEvent::PageChanged(1),
            ]
        );
    }

    #[test]
    fn test_json_output_sorted_desc() {
        let args = args(&["--sort", "name", "--sort", "name", "--format", "json"]);
        let output = render_body(&args, BODY, None, TableConfig::default()).unwrap();
        let view: serde_json::Value = serde_json::from_str(&output).unwrap();
        let names: Vec<&str> = view["rows"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["Eve", "Bob", "alice"]);
        assert_eq!(view["sort"]["direction"], "desc");
    }

    #[test]
    fn test_search_with_explicit_columns() {
        let columns = Columns::new(vec![
            Column::field("id").searchable(),
            Column::field("name"),
        ])
        .unwrap();
        let args = args(&["-s", "b", "--format", "json"]);
        let output = render_body(&args, BODY, Some(columns), TableConfig::default()).unwrap();
        let view: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(view["page"]["total_items"], 0);
    }

    #[test]
    fn test_bad_config_is_an_error() {
        let config = TableConfig::default().with_initial_sort(SortState::asc("missing"));
        let err = render_body(&args(&[]), BODY, None, config).unwrap_err();
        assert!(format!("{:#}", err).contains("missing"));
    }

    #[test]
    fn test_unsuccessful_response_is_an_error() {
        let body = r#"{"success": false, "message": "Session expired"}"#;
        let err = render_body(&args(&[]), body, None, TableConfig::default()).unwrap_err();
        assert!(err.to_string().contains("Session expired"));
    }

    #[test]
    fn test_load_columns_file() {
        let path = std::env::temp_dir().join(format!("datagrid-columns-{}.json", std::process::id()));
        fs::write(&path, r#"[{"key": "name", "header": "Name", "searchable": true}]"#).unwrap();
        let columns = load_columns(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].header, "Name");
    }
}
