//! Run configuration.
//!
//! Settings are layered: built-in defaults, then the optional
//! `.qrc-sweep.yaml` in the project root, then `QRC_SWEEP_*` environment
//! variables, then command-line flags. The policy toggles come from flags
//! only.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SweepError;
use crate::manifest::{DEFAULT_MANIFEST, DEFAULT_PREFIX};
use crate::ports::FileSystem;

/// Project-level config file name.
pub const CONFIG_FILE: &str = ".qrc-sweep.yaml";

/// Default directory searched for references, relative to the root.
pub const DEFAULT_SOURCE_DIR: &str = "src";

/// Behavior toggles for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PolicyConfig {
    /// Log every decision, not only removals.
    pub verbose: bool,
    /// Report removals without deleting anything.
    pub dry_run: bool,
    /// Remove assets whose only evidence is an ambiguous basename match.
    pub force: bool,
}

/// Which text-search backend to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SearcherKind {
    /// The Silver Searcher (`ag`) on `PATH`.
    #[default]
    Ag,
    /// In-process directory walk.
    Native,
}

impl FromStr for SearcherKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ag" => Ok(Self::Ag),
            "native" => Ok(Self::Native),
            other => Err(format!("unknown searcher `{other}` (expected `ag` or `native`)")),
        }
    }
}

impl fmt::Display for SearcherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ag => "ag",
            Self::Native => "native",
        })
    }
}

/// Contents of `.qrc-sweep.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Manifest entry prefix.
    pub prefix: Option<String>,
    /// Directory searched for references.
    pub source_dir: Option<PathBuf>,
    /// Search backend.
    pub searcher: Option<SearcherKind>,
}

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// `--prefix`.
    pub prefix: Option<String>,
    /// `--source-dir`.
    pub source_dir: Option<PathBuf>,
    /// `--searcher`.
    pub searcher: Option<SearcherKind>,
}

/// Fully resolved settings for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Project root holding the manifest.
    pub root: PathBuf,
    /// Manifest file name relative to `root`.
    pub manifest: String,
    /// Manifest entry prefix.
    pub prefix: String,
    /// Directory searched for references, relative to `root`.
    pub source_dir: PathBuf,
    /// Search backend.
    pub searcher: SearcherKind,
    /// Behavior toggles.
    pub policy: PolicyConfig,
}

impl Settings {
    /// Absolute manifest path.
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(&self.manifest)
    }

    /// Directory the searches run in.
    #[must_use]
    pub fn search_root(&self) -> PathBuf {
        self.root.join(&self.source_dir)
    }
}

/// Manifest file name from the flag, then `QRC_SWEEP_MANIFEST`, then the default.
///
/// Resolved before the config file is read since it is needed to find the
/// project root.
pub fn manifest_name(flag: Option<&str>, env: impl Fn(&str) -> Option<String>) -> String {
    flag.map(str::to_string)
        .or_else(|| env("QRC_SWEEP_MANIFEST"))
        .unwrap_or_else(|| DEFAULT_MANIFEST.to_string())
}

/// Loads `.qrc-sweep.yaml` from `root`, or defaults if it does not exist.
///
/// # Errors
///
/// Returns [`SweepError::Config`] if the file exists but cannot be read or
/// parsed.
pub fn load_file_config(fs: &dyn FileSystem, root: &Path) -> Result<FileConfig, SweepError> {
    let path = root.join(CONFIG_FILE);
    if !fs.exists(&path) {
        return Ok(FileConfig::default());
    }
    let text = fs
        .read_to_string(&path)
        .map_err(|e| SweepError::Config { path: path.clone(), message: e.to_string() })?;
    if text.trim().is_empty() {
        return Ok(FileConfig::default());
    }
    serde_yaml::from_str(&text).map_err(|e| SweepError::Config { path, message: e.to_string() })
}

/// Merges every layer into [`Settings`].
///
/// `env` looks up environment variables; pass `|k| std::env::var(k).ok()`
/// for the real environment.
///
/// # Errors
///
/// Returns [`SweepError::Config`] if `QRC_SWEEP_SEARCHER` names an unknown
/// backend.
pub fn resolve(
    root: PathBuf,
    manifest: String,
    file: FileConfig,
    env: impl Fn(&str) -> Option<String>,
    overrides: Overrides,
    policy: PolicyConfig,
) -> Result<Settings, SweepError> {
    let env_searcher = env("QRC_SWEEP_SEARCHER")
        .map(|value| value.parse::<SearcherKind>())
        .transpose()
        .map_err(|message| SweepError::Config { path: PathBuf::from("QRC_SWEEP_SEARCHER"), message })?;

    let prefix = overrides
        .prefix
        .or_else(|| env("QRC_SWEEP_PREFIX"))
        .or(file.prefix)
        .unwrap_or_else(|| DEFAULT_PREFIX.to_string());
    let source_dir = overrides
        .source_dir
        .or_else(|| env("QRC_SWEEP_SOURCE_DIR").map(PathBuf::from))
        .or(file.source_dir)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE_DIR));
    let searcher = overrides.searcher.or(env_searcher).or(file.searcher).unwrap_or_default();

    Ok(Settings { root, manifest, prefix, source_dir, searcher, policy })
}
