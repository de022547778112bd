//! Free-text search over searchable columns using nucleo-matcher.

use log::warn;
use nucleo_matcher::pattern::{Atom, AtomKind, CaseMatching, Normalization};
use nucleo_matcher::{Config, Matcher, Utf32Str, chars};
use serde::Deserialize;
use serde::Serialize;

use crate::column::Column;
use crate::model::Row;

/// How a search term is matched against cell text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Case-insensitive contiguous substring.
    #[default]
    Substring,
    /// Case-insensitive fuzzy match (characters in order, gaps allowed).
    Fuzzy,
}

/// Keep rows where at least one searchable column contains `term`.
///
/// The term is trimmed; an empty term keeps every row in input order.
/// Matching is case-insensitive and non-string values are matched against
/// their string form. Columns that are not searchable are never consulted.
///
/// # Example
///
/// ```
/// use datagrid_lib::column::Column;
/// use datagrid_lib::model::Row;
/// use datagrid_lib::query::filter;
///
/// let rows = vec![
///     Row::new().set("name", "Bob"),
///     Row::new().set("name", "alice"),
/// ];
/// let columns = vec![Column::field("name").searchable()];
///
/// let matched = filter(&rows, "B", &columns);
/// assert_eq!(matched, vec![&rows[0]]);
/// ```
pub fn filter<'a>(
    rows: impl IntoIterator<Item = &'a Row>,
    term: &str,
    columns: &[Column],
) -> Vec<&'a Row> {
    filter_with(rows, term, columns, MatchMode::Substring)
}

/// [`filter()`] with an explicit match mode.
pub fn filter_with<'a>(
    rows: impl IntoIterator<Item = &'a Row>,
    term: &str,
    columns: &[Column],
    mode: MatchMode,
) -> Vec<&'a Row> {
    let term = term.trim();
    if term.is_empty() {
        return rows.into_iter().collect();
    }

    let searchable: Vec<&Column> = columns.iter().filter(|c| c.searchable).collect();
    if searchable.is_empty() {
        return Vec::new();
    }

    let mut searcher = Searcher::new(term, mode);
    rows.into_iter()
        .filter(|row| searchable.iter().any(|column| searcher.matches(column, row)))
        .collect()
}

/// Reusable matcher state for one search term.
struct Searcher {
    atom: Atom,
    matcher: Matcher,
    buf: Vec<char>,
    mode: MatchMode,
    /// Lowercased term for the plain `contains` path.
    folded: String,
    term_clustered: bool,
}

impl Searcher {
    fn new(term: &str, mode: MatchMode) -> Self {
        let (kind, normalization) = match mode {
            MatchMode::Substring => (AtomKind::Substring, Normalization::Never),
            MatchMode::Fuzzy => (AtomKind::Fuzzy, Normalization::Smart),
        };
        Self {
            atom: Atom::new(term, CaseMatching::Ignore, normalization, kind, false),
            matcher: Matcher::new(Config::DEFAULT),
            buf: Vec::new(),
            mode,
            folded: fold(term),
            term_clustered: is_clustered(term),
        }
    }

    fn matches(&mut self, column: &Column, row: &Row) -> bool {
        let value = match column.resolve(row) {
            Ok(value) => value,
            Err(err) => {
                warn!("Treating row as a non-match for column '{}': {}", column.key, err);
                return false;
            }
        };
        let Some(text) = value.search_text() else {
            return false;
        };
        // nucleo keeps one char per grapheme cluster, which would drop
        // combining marks from substring matches.
        if self.mode == MatchMode::Substring && (self.term_clustered || is_clustered(&text)) {
            return fold(&text).contains(&self.folded);
        }
        let haystack = Utf32Str::new(&text, &mut self.buf);
        self.atom.score(haystack, &mut self.matcher).is_some()
    }
}

/// `true` if some grapheme cluster of `text` spans more than one char.
fn is_clustered(text: &str) -> bool {
    !text.is_ascii() && chars::graphemes(text).count() != text.chars().count()
}

fn fold(text: &str) -> String {
    text.chars().map(chars::to_lower_case).collect()
}
