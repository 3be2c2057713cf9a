//! Cassettes: recorded search answers that can be replayed later.
//!
//! Recording a sweep captures every query sent to the search backend and
//! its answer. Replaying the cassette reproduces the exact same
//! classification without the backend installed.

pub mod format;
pub mod recorder;
pub mod replayer;
