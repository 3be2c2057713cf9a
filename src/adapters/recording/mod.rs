//! Recording adapters that capture interactions to cassettes.

pub mod search;

pub use search::RecordingSearchOracle;
