//! Client-side tabular data engine
//!
//! Filters, sorts and paginates rows that are already in memory, the way an
//! admin console's data table does after fetching a list from a REST API.
//! Every stage is a pure function; [`Table`] wires them to user events and
//! memoizes the last result.

pub mod column;
pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod query;
pub mod response;
pub mod state;

mod table;

pub use pipeline::TableView;
pub use table::*;
