//! Project root discovery.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::SweepError;
use crate::ports::FileSystem;

/// Finds the directory holding `manifest`.
///
/// `start` (normally the working directory) wins if it has the manifest.
/// Otherwise the tool is assumed to be installed two levels below the
/// project root, so `exe_dir/../..` is tried.
///
/// # Errors
///
/// Returns [`SweepError::ProjectRootNotFound`] listing every directory that
/// was checked.
pub fn locate_root(
    fs: &dyn FileSystem,
    start: &Path,
    exe_dir: Option<&Path>,
    manifest: &str,
) -> Result<PathBuf, SweepError> {
    let mut searched = vec![start.to_path_buf()];
    if fs.exists(&start.join(manifest)) {
        return Ok(start.to_path_buf());
    }

    if let Some(exe_dir) = exe_dir {
        let candidate = exe_dir.join("..").join("..");
        debug!(candidate = %candidate.display(), "manifest not in start directory");
        if fs.exists(&candidate.join(manifest)) {
            return Ok(normalize(&candidate));
        }
        searched.push(candidate);
    }

    Err(SweepError::ProjectRootNotFound { manifest: manifest.to_string(), searched })
}

/// Checks an explicitly given root.
///
/// # Errors
///
/// Returns [`SweepError::ProjectRootNotFound`] if `root` has no manifest.
pub fn require_root(fs: &dyn FileSystem, root: &Path, manifest: &str) -> Result<PathBuf, SweepError> {
    if fs.exists(&root.join(manifest)) {
        Ok(root.to_path_buf())
    } else {
        Err(SweepError::ProjectRootNotFound {
            manifest: manifest.to_string(),
            searched: vec![root.to_path_buf()],
        })
    }
}

fn normalize(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
