//! Replaying adapters that serve recorded interactions from cassettes.

pub mod search;

pub use search::ReplayingSearchOracle;
