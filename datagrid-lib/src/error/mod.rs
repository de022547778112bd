//! Error types

mod access;
mod config;
mod response;

pub use access::*;
pub use config::*;
pub use response::*;
