//! Live adapters for real external interactions.

pub mod filesystem;
pub mod native_search;
pub mod silver_searcher;
