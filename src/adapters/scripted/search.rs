//! Scripted adapter for the `SearchOracle` port.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Mutex;

use crate::ports::search::SearchOracle;

/// Search oracle that reports a fixed set of needles as found.
///
/// Every query is recorded so tests can assert which searches ran and in
/// what order.
#[derive(Default)]
pub struct ScriptedSearchOracle {
    hits: HashSet<String>,
    unavailable: Option<String>,
    queries: Mutex<Vec<String>>,
}

impl ScriptedSearchOracle {
    /// Creates an oracle that finds nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `needle` as present in the source tree.
    #[must_use]
    pub fn with_hit(mut self, needle: impl Into<String>) -> Self {
        self.hits.insert(needle.into());
        self
    }

    /// Makes `probe` fail with the given reason.
    #[must_use]
    pub fn unavailable(mut self, reason: impl Into<String>) -> Self {
        self.unavailable = Some(reason.into());
        self
    }

    /// Returns the needles queried so far, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if the query log lock is poisoned.
    #[must_use]
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().expect("query log lock poisoned").clone()
    }
}

impl SearchOracle for ScriptedSearchOracle {
    fn name(&self) -> &str {
        "scripted"
    }

    fn probe(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        match &self.unavailable {
            Some(reason) => Err(reason.clone().into()),
            None => Ok(()),
        }
    }

    fn found(&self, needle: &str, _root: &Path) -> bool {
        self.queries.lock().expect("query log lock poisoned").push(needle.to_string());
        self.hits.contains(needle)
    }
}
