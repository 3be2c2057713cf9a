//! Port implementations.
//!
//! `live` talks to the real disk and search tools. `recording` wraps a live
//! adapter and writes its answers to a cassette; `replaying` answers from
//! such a cassette. `scripted` answers from in-memory fixtures so tests stay
//! deterministic.

pub mod live;
pub mod recording;
pub mod replaying;
pub mod scripted;
