//! Pagination stage and page metadata.

use serde::Deserialize;
use serde::Serialize;

/// Number of pages needed for `total_items`; zero when there are no items.
///
/// A page size of zero is treated as one.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1))
}

/// Clamp a 1-based page number into `[1, total_pages]`.
///
/// With no pages the result is `1`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Pagination metadata for rendering page controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageInfo {
    /// The page actually shown, after clamping.
    pub current_page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_items: usize,
    /// 1-based index of the first row in the window; 0 when empty.
    pub first_item: usize,
    /// 1-based index of the last row in the window; 0 when empty.
    pub last_item: usize,
}

impl PageInfo {
    /// Compute metadata for `page` over `total_items` rows.
    pub fn new(page: usize, page_size: usize, total_items: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_pages(total_items, page_size);
        let current_page = clamp_page(page, total_pages);
        let (first_item, last_item) = if total_items == 0 {
            (0, 0)
        } else {
            let start = (current_page - 1) * page_size;
            (start + 1, (start + page_size).min(total_items))
        };
        Self {
            current_page,
            page_size,
            total_pages,
            total_items,
            first_item,
            last_item,
        }
    }

    /// Range of row indices covered by the current page.
    pub fn range(&self) -> std::ops::Range<usize> {
        if self.total_items == 0 {
            0..0
        } else {
            self.first_item - 1..self.last_item
        }
    }

    /// Returns `true` if there is a page before this one.
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Returns `true` if there is a page after this one.
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// A window of rows together with its page metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Paginated<T> {
    pub window: Vec<T>,
    pub info: PageInfo,
}

impl<T> Paginated<T> {
    /// Total number of pages.
    pub fn total_pages(&self) -> usize {
        self.info.total_pages
    }

    /// Total number of rows across all pages.
    pub fn total_items(&self) -> usize {
        self.info.total_items
    }
}

/// Slice `rows` into the window for `page`.
///
/// Pages past the end clamp to the last page and page `0` is page `1`, so
/// this never fails; an empty input gives an empty window and zero pages.
///
/// # Example
///
/// ```
/// use datagrid_lib::query::paginate;
///
/// let rows: Vec<u32> = (1..=23).collect();
/// let page = paginate(&rows, 4, 10);
/// assert_eq!(page.total_pages(), 3);
/// assert_eq!(page.info.current_page, 3);
/// assert_eq!(page.window, vec![21, 22, 23]);
/// ```
pub fn paginate<T: Clone>(rows: &[T], page: usize, page_size: usize) -> Paginated<T> {
    let info = PageInfo::new(page, page_size, rows.len());
    Paginated {
        window: rows[info.range()].to_vec(),
        info,
    }
}

/// One entry of a page-number control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageLink {
    /// A link to a page.
    Page(usize),
    /// A run of elided pages.
    Gap,
}

/// Page-number controls around `current`.
///
/// The first and last pages are always present along with `siblings` pages
/// on each side of the current one. Runs of skipped pages collapse into a
/// [`PageLink::Gap`]; a run of exactly one page is shown instead.
///
/// ```
/// use datagrid_lib::query::{page_links, PageLink::{Gap, Page}};
///
/// assert_eq!(
///     page_links(5, 10, 1),
///     vec![Page(1), Gap, Page(4), Page(5), Page(6), Gap, Page(10)]
/// );
/// ```
pub fn page_links(current: usize, total_pages: usize, siblings: usize) -> Vec<PageLink> {
    if total_pages == 0 {
        return Vec::new();
    }

    let current = clamp_page(current, total_pages);
    let low = current.saturating_sub(siblings).max(1);
    let high = current.saturating_add(siblings).min(total_pages);

    let mut pages = vec![1];
    pages.extend(low..=high);
    pages.push(total_pages);
    pages.sort_unstable();
    pages.dedup();

    let mut links = Vec::with_capacity(pages.len() + 2);
    let mut previous = 0;
    for page in pages {
        match page - previous {
            1 => {}
            2 => links.push(PageLink::Page(page - 1)),
            _ => links.push(PageLink::Gap),
        }
        links.push(PageLink::Page(page));
        previous = page;
    }
    links
}
