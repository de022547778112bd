//! The three table stages: filter, sort and paginate.
//!
//! Each stage is a pure function over borrowed rows. The pipeline runs them in
//! order: filter → sort → paginate.
//!
//! - [`filter()`] - keep rows where a searchable column contains the term
//! - [`sort()`] - stable ordering by one column
//! - [`paginate()`] - slice into a window with page metadata

mod collate;
mod filter;
mod page;
mod sort;

pub use collate::collate;
pub use filter::MatchMode;
pub use filter::filter;
pub use filter::filter_with;
pub use page::PageInfo;
pub use page::PageLink;
pub use page::Paginated;
pub use page::clamp_page;
pub use page::page_links;
pub use page::paginate;
pub use page::total_pages;
pub use sort::Direction;
pub use sort::SortState;
pub use sort::compare_values;
pub use sort::sort;
