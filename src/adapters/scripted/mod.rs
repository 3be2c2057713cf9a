//! Scripted adapters that answer from in-memory fixtures.

pub mod filesystem;
pub mod search;

pub use filesystem::ScriptedFileSystem;
pub use search::ScriptedSearchOracle;
