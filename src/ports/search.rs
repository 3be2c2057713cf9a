//! Search port for literal text lookups over a source tree.

use std::path::Path;

/// Answers "does this text occur anywhere under this directory?".
///
/// The classifier only ever consumes the boolean answer; match content and
/// counts are not part of the contract.
pub trait SearchOracle: Send + Sync {
    /// Short backend name used in logs and error messages.
    fn name(&self) -> &str;

    /// Checks that the backend can run at all.
    ///
    /// Called once before any classification starts.
    ///
    /// # Errors
    ///
    /// Returns an error describing why the backend is unusable.
    fn probe(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Returns `true` if `needle` occurs literally in some file under `root`.
    ///
    /// Backend failures are reported as `false`.
    fn found(&self, needle: &str, root: &Path) -> bool;
}
