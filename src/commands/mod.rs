//! Command dispatch and handlers.

pub mod check;
pub mod list;
pub mod sweep;

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::adapters::live::filesystem::LiveFileSystem;
use crate::cli::{Cli, Command};
use crate::config::{self, Settings};
use crate::context::ServiceContext;
use crate::error::SweepError;
use crate::logging;
use crate::ports::FileSystem;
use crate::project;

/// Dispatch a parsed command line to its handler.
///
/// # Errors
///
/// Returns an error string if settings cannot be resolved or the selected
/// command fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    logging::init(cli.verbose);

    let cwd = env::current_dir().map_err(|e| format!("failed to get current directory: {e}"))?;
    let exe = env::current_exe().ok();
    let exe_dir = exe.as_deref().and_then(Path::parent);
    let settings = resolve_settings(cli, &LiveFileSystem, &cwd, exe_dir, |key| env::var(key).ok())
        .map_err(|e| e.to_string())?;
    debug!(
        verbose = settings.policy.verbose,
        dry_run = settings.policy.dry_run,
        force = settings.policy.force,
        root = %settings.root.display(),
        searcher = %settings.searcher,
        "settings resolved"
    );

    let ctx = match &cli.replay {
        Some(cassette) => ServiceContext::replaying(&cwd.join(cassette)).map_err(|e| e.to_string())?,
        None => ServiceContext::live(settings.searcher),
    };

    let Some(cassette) = &cli.record else {
        return dispatch_with_context(cli, &ctx, &settings);
    };
    let (ctx, recorder) = ctx.recording_to(&cwd.join(cassette));
    let result = dispatch_with_context(cli, &ctx, &settings);

    // Write the cassette even when the command failed.
    let written = match recorder.lock() {
        Ok(recorder) => recorder.write(),
        Err(_) => Err(io::Error::other("recorder lock poisoned")),
    };
    finish_recording(result, written, cassette)
}

/// Combines the command result with the cassette write.
///
/// A command error always wins; a failed write is then only logged.
fn finish_recording(
    result: Result<(), String>,
    written: io::Result<PathBuf>,
    cassette: &Path,
) -> Result<(), String> {
    match (result, written) {
        (Ok(()), Ok(path)) => {
            eprintln!("Search answers recorded to: {}", path.display());
            Ok(())
        }
        (Ok(()), Err(e)) => Err(format!("failed to write cassette {}: {e}", cassette.display())),
        (Err(err), Ok(path)) => {
            eprintln!("Search answers recorded to: {}", path.display());
            Err(err)
        }
        (Err(err), Err(e)) => {
            warn!(cassette = %cassette.display(), error = %e, "failed to write cassette");
            Err(err)
        }
    }
}

/// Locate the project root and merge every configuration layer.
///
/// # Errors
///
/// Returns an error if no project root holds the manifest or the config
/// file or environment is invalid.
pub fn resolve_settings(
    cli: &Cli,
    fs: &dyn FileSystem,
    cwd: &Path,
    exe_dir: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Settings, SweepError> {
    let manifest = config::manifest_name(cli.manifest.as_deref(), &env);
    let root = match &cli.root {
        Some(root) => project::require_root(fs, &cwd.join(root), &manifest)?,
        None => project::locate_root(fs, cwd, exe_dir, &manifest)?,
    };
    let file = config::load_file_config(fs, &root)?;
    config::resolve(root, manifest, file, &env, cli.overrides(), cli.policy())
}

/// Dispatch a command with the given service context and settings.
fn dispatch_with_context(cli: &Cli, ctx: &ServiceContext, settings: &Settings) -> Result<(), String> {
    match &cli.command {
        None | Some(Command::Sweep) => sweep::run(ctx, settings, cli.json),
        Some(Command::List) => list::run(ctx, settings, cli.json),
        Some(Command::Check { assets }) => check::run(ctx, settings, assets, cli.json),
    }
}
