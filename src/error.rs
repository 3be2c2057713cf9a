//! Fatal error types for a sweep run.
//!
//! Per-asset deletion failures are not represented here: they are recorded
//! on the report entry and the run carries on.

use std::path::PathBuf;

use thiserror::Error;

/// A condition that aborts the run before any deletion happens.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SweepError {
    /// The manifest document could not be read.
    #[error("cannot read manifest {}: {source}", path.display())]
    ManifestNotFound {
        /// Path that was opened.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The manifest was read but is not an `RCC > qresource > file` document.
    #[error("manifest {} is malformed: {message}", path.display())]
    ManifestMalformed {
        /// Path of the offending document.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// The text-search backend cannot be used.
    #[error("search backend `{oracle}` is unavailable: {reason}")]
    SearchOracleUnavailable {
        /// Backend name.
        oracle: String,
        /// Why the probe failed.
        reason: String,
    },

    /// The directory searched for references does not exist.
    #[error(
        "search directory {} does not exist; check --source-dir or `source_dir` in .qrc-sweep.yaml",
        path.display()
    )]
    SearchRootNotFound {
        /// The missing directory.
        path: PathBuf,
    },

    /// No directory containing the manifest could be found.
    #[error(
        "cannot find {manifest} in any of: {}; run this tool from the project root",
        display_paths(searched)
    )]
    ProjectRootNotFound {
        /// Manifest file name that was looked for.
        manifest: String,
        /// Every directory that was checked.
        searched: Vec<PathBuf>,
    },

    /// A search cassette could not be loaded or written.
    #[error("cassette {}: {message}", path.display())]
    Cassette {
        /// Cassette file path.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },

    /// The project config file is unreadable or invalid.
    #[error("invalid config {}: {message}", path.display())]
    Config {
        /// Config file path.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ")
}
