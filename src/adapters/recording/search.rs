//! Recording adapter for the `SearchOracle` port.

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::cassette::recorder::CassetteRecorder;
use crate::ports::SearchOracle;

/// Records search answers while delegating to an inner implementation.
pub struct RecordingSearchOracle {
    inner: Arc<dyn SearchOracle>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSearchOracle {
    /// Creates a recording oracle wrapping the given implementation.
    pub fn new(inner: Arc<dyn SearchOracle>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct SearchInput<'a> {
    needle: &'a str,
}

impl SearchOracle for RecordingSearchOracle {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn probe(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.inner.probe()
    }

    fn found(&self, needle: &str, root: &Path) -> bool {
        let found = self.inner.found(needle, root);
        let input = serde_json::to_value(SearchInput { needle }).unwrap_or_default();
        self.recorder.lock().expect("recorder lock poisoned").record(
            "search",
            "found",
            input,
            serde_json::Value::Bool(found),
        );
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::scripted::ScriptedSearchOracle;
    use crate::cassette::format::Cassette;

    #[test]
    fn records_each_answer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("search.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&path, "test", "scripted")));

        let oracle = RecordingSearchOracle::new(
            Arc::new(ScriptedSearchOracle::new().with_hit("a.png")),
            Arc::clone(&recorder),
        );
        assert!(oracle.found("a.png", Path::new("src")));
        assert!(!oracle.found("b.png", Path::new("src")));

        recorder.lock().unwrap().write().unwrap();
        let cassette: Cassette =
            serde_yaml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(cassette.interactions.len(), 2);
        assert_eq!(cassette.interactions[0].input, serde_json::json!({"needle": "a.png"}));
        assert_eq!(cassette.interactions[1].output, serde_json::json!(false));
    }
}
