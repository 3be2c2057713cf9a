//! Replaying adapter for the `SearchOracle` port.

use std::path::Path;

use serde_json::json;
use tracing::warn;

use crate::cassette::replayer::CassetteReplayer;
use crate::ports::SearchOracle;

/// Answers searches from a recorded cassette.
///
/// A query the cassette has no answer for is reported as found, so a stale
/// recording can only make the sweep keep more, never delete more.
pub struct ReplayingSearchOracle {
    replayer: CassetteReplayer,
}

impl ReplayingSearchOracle {
    /// Creates a replaying oracle from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer }
    }
}

impl SearchOracle for ReplayingSearchOracle {
    fn name(&self) -> &str {
        self.replayer.backend()
    }

    fn probe(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(())
    }

    fn found(&self, needle: &str, _root: &Path) -> bool {
        match self.replayer.lookup("search", "found", &json!({ "needle": needle })) {
            Some(output) => output.as_bool().unwrap_or(true),
            None => {
                warn!(needle, "no recorded answer, assuming found");
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;

    fn make_replayer(interactions: Vec<Interaction>) -> CassetteReplayer {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            backend: "ag".into(),
            interactions,
        };
        CassetteReplayer::new(&cassette)
    }

    #[test]
    fn replays_recorded_answers() {
        let replayer = make_replayer(vec![Interaction {
            seq: 0,
            port: "search".into(),
            method: "found".into(),
            input: json!({"needle": ":/images/a.png"}),
            output: json!(false),
        }]);
        let oracle = ReplayingSearchOracle::new(replayer);
        assert!(!oracle.found(":/images/a.png", Path::new("src")));
        assert_eq!(oracle.name(), "ag");
    }

    #[test]
    fn unknown_query_is_treated_as_found() {
        let oracle = ReplayingSearchOracle::new(make_replayer(vec![]));
        assert!(oracle.found("never-recorded.png", Path::new("src")));
    }
}
