//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{Overrides, PolicyConfig, SearcherKind};

/// Top-level CLI parser for `qrc-sweep`.
#[derive(Debug, Parser)]
#[command(
    name = "qrc-sweep",
    version,
    about = "Remove images declared in a Qt resource manifest that the sources no longer use"
)]
pub struct Cli {
    /// Log every decision, not only removals.
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Report what would be removed without deleting anything.
    #[arg(long = "dry", global = true)]
    pub dry_run: bool,

    /// Remove images whose file name appears in the sources without a resource URL.
    #[arg(long, global = true)]
    pub force: bool,

    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Project root (defaults to the working directory or two levels above the binary).
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Manifest file name relative to the root.
    #[arg(long, global = true, value_name = "FILE")]
    pub manifest: Option<String>,

    /// Only consider manifest entries starting with this prefix.
    #[arg(long, global = true)]
    pub prefix: Option<String>,

    /// Directory searched for references, relative to the root.
    #[arg(long, global = true, value_name = "DIR")]
    pub source_dir: Option<PathBuf>,

    /// Text-search backend.
    #[arg(long, global = true, value_enum)]
    pub searcher: Option<SearcherKind>,

    /// Record every search answer to this cassette file.
    #[arg(long, global = true, value_name = "FILE", conflicts_with = "replay")]
    pub record: Option<PathBuf>,

    /// Answer searches from a recorded cassette instead of running a backend.
    #[arg(long, global = true, value_name = "FILE")]
    pub replay: Option<PathBuf>,

    /// The command to execute (defaults to `sweep`).
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Policy toggles given on the command line.
    #[must_use]
    pub fn policy(&self) -> PolicyConfig {
        PolicyConfig { verbose: self.verbose, dry_run: self.dry_run, force: self.force }
    }

    /// Settings overrides given on the command line.
    #[must_use]
    pub fn overrides(&self) -> Overrides {
        Overrides {
            prefix: self.prefix.clone(),
            source_dir: self.source_dir.clone(),
            searcher: self.searcher,
        }
    }
}

/// Supported subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Classify every declared image and delete the unused ones.
    Sweep,
    /// List the declared images.
    List,
    /// Explain how the given images are classified, without deleting anything.
    Check {
        /// Manifest paths such as `images/foo.png`.
        #[arg(required = true, value_name = "ASSET")]
        assets: Vec<String>,
    },
}
