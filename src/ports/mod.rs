//! Port traits defining external boundaries.
//!
//! Each trait is a boundary between the sweep core and something outside
//! it (text search, disk). Implementations live in `src/adapters/`.

pub mod filesystem;
pub mod search;

pub use filesystem::FileSystem;
pub use search::SearchOracle;
