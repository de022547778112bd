//! Locale-aware string ordering.

use std::cmp::Ordering;

use nucleo_matcher::chars;

/// Compare two strings the way a human-facing collation would.
///
/// Levels are compared in turn, moving on only when the previous level ties:
///
/// 1. base letters: Latin diacritics folded to ASCII, case folded
/// 2. accents: case folded only, so `e` sorts before `é`
/// 3. case: lowercase before uppercase
/// 4. code points
///
/// ```
/// use datagrid_lib::query::collate;
///
/// let mut names = vec!["Eve", "bob", "Émile", "alice", "Bob"];
/// names.sort_by(|a, b| collate(a, b));
/// assert_eq!(names, ["alice", "bob", "Bob", "Émile", "Eve"]);
/// ```
pub fn collate(a: &str, b: &str) -> Ordering {
    compare_by(a, b, |c| chars::to_lower_case(chars::normalize(c)))
        .then_with(|| compare_by(a, b, chars::to_lower_case))
        .then_with(|| compare_by(a, b, char::is_uppercase))
        .then_with(|| a.cmp(b))
}

fn compare_by<K: Ord>(a: &str, b: &str, key: impl Fn(char) -> K) -> Ordering {
    a.chars().map(&key).cmp(b.chars().map(&key))
}
