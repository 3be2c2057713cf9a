//! Cassette data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded call on a port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Sequence number (assigned automatically by the recorder).
    pub seq: u64,
    /// Port name (e.g. "search").
    pub port: String,
    /// Method name invoked on the port.
    pub method: String,
    /// Input data sent to the port.
    pub input: serde_json::Value,
    /// Output data returned from the port.
    pub output: serde_json::Value,
}

/// A cassette containing a sequence of recorded interactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Search backend that produced the answers.
    pub backend: String,
    /// Ordered list of interactions.
    pub interactions: Vec<Interaction>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_hand_written_yaml() {
        let yaml = r#"
name: nightly
recorded_at: 2025-03-15T14:30:00Z
backend: ag
interactions:
  - seq: 0
    port: search
    method: found
    input: { needle: ":/images/a.png" }
    output: true
"#;
        let cassette: Cassette = serde_yaml::from_str(yaml).expect("deserialize");
        assert_eq!(cassette.backend, "ag");
        assert_eq!(cassette.interactions[0].input, json!({"needle": ":/images/a.png"}));
        assert_eq!(cassette.interactions[0].output, json!(true));
    }
}
