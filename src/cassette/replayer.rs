//! Replays recorded interactions from a cassette.

use std::collections::HashMap;
use std::path::Path;

use super::format::Cassette;

/// Key for indexing interactions by port, method and input.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct InteractionKey {
    port: String,
    method: String,
    input: String,
}

impl InteractionKey {
    fn new(port: &str, method: &str, input: &serde_json::Value) -> Self {
        Self { port: port.to_string(), method: method.to_string(), input: input.to_string() }
    }
}

/// Answers port calls from a loaded cassette.
///
/// Calls are matched on their input rather than their position, so a
/// replayed run may ask questions in a different order than the recording.
/// When the same input was recorded more than once the last answer wins.
pub struct CassetteReplayer {
    backend: String,
    outputs: HashMap<InteractionKey, serde_json::Value>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let outputs = cassette
            .interactions
            .iter()
            .map(|i| (InteractionKey::new(&i.port, &i.method, &i.input), i.output.clone()))
            .collect();
        Self { backend: cassette.backend.clone(), outputs }
    }

    /// Load a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error string if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read cassette {}: {e}", path.display()))?;
        let cassette: Cassette = serde_yaml::from_str(&yaml)
            .map_err(|e| format!("failed to parse cassette {}: {e}", path.display()))?;
        Ok(Self::new(&cassette))
    }

    /// Backend that produced the recording.
    #[must_use]
    pub fn backend(&self) -> &str {
        &self.backend
    }

    /// The recorded output for a call, if one exists.
    #[must_use]
    pub fn lookup(&self, port: &str, method: &str, input: &serde_json::Value) -> Option<&serde_json::Value> {
        self.outputs.get(&InteractionKey::new(port, method, input))
    }
}
