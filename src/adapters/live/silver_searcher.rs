//! Live search adapter that shells out to The Silver Searcher (`ag`).

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::trace;

use crate::ports::search::SearchOracle;

/// Program name looked up on `PATH` by default.
pub const DEFAULT_PROGRAM: &str = "ag";

/// Live search oracle backed by the `ag` command-line tool.
///
/// `ag` exits 0 when at least one file matched and non-zero otherwise, so
/// the exit status alone answers the query.
pub struct SilverSearcher {
    program: String,
}

impl SilverSearcher {
    /// Creates a searcher that runs `ag` from `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_program(DEFAULT_PROGRAM)
    }

    /// Creates a searcher that runs the given program instead of `ag`.
    #[must_use]
    pub fn with_program(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }
}

impl Default for SilverSearcher {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchOracle for SilverSearcher {
    fn name(&self) -> &str {
        &self.program
    }

    fn probe(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let path = which::which(&self.program)
            .map_err(|e| format!("`{}` is not installed or not on PATH: {e}", self.program))?;
        trace!(program = %path.display(), "resolved search program");
        Ok(())
    }

    fn found(&self, needle: &str, root: &Path) -> bool {
        let status = Command::new(&self.program)
            .args(["--literal", "--files-with-matches", "--silent", "--", needle])
            .arg(root)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        match status {
            Ok(status) => status.success(),
            Err(e) => {
                trace!(program = %self.program, error = %e, "search process failed to start");
                false
            }
        }
    }
}
