//! Classification driver: checks every declared asset and deletes the dead ones.

use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::{PolicyConfig, Settings};
use crate::context::ServiceContext;
use crate::error::SweepError;
use crate::manifest::{self, DeclaredAsset};
use crate::policy::{self, Classification};

/// Why a deletion did not go through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureKind {
    /// The process may not delete the file.
    PermissionDenied,
    /// Any other I/O failure.
    Other,
}

/// What happened to an asset classified as removable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum RemovalOutcome {
    /// Dry run: the file would have been deleted.
    Planned,
    /// The file was deleted.
    Removed,
    /// The file was already gone.
    Missing,
    /// Deletion failed; the run carried on.
    Failed {
        /// Failure category.
        kind: FailureKind,
        /// I/O error text.
        message: String,
    },
}

/// One asset's line in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SweepEntry {
    /// The declared asset.
    pub asset: DeclaredAsset,
    /// The checker's decision.
    pub classification: Classification,
    /// Deletion result, for removable assets only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removal: Option<RemovalOutcome>,
}

/// Result of a whole run, in manifest order.
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    /// When the run finished classifying.
    pub generated_at: DateTime<Utc>,
    /// Toggles the run used.
    pub policy: PolicyConfig,
    /// Per-asset results.
    pub entries: Vec<SweepEntry>,
}

impl SweepReport {
    /// Entries classified as removable.
    pub fn removal_candidates(&self) -> impl Iterator<Item = &SweepEntry> {
        self.entries.iter().filter(|e| e.classification.is_remove())
    }

    /// Number of entries kept.
    #[must_use]
    pub fn kept_count(&self) -> usize {
        self.entries.len() - self.removal_candidates().count()
    }

    /// Number of entries whose deletion failed or found nothing to delete.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| {
                matches!(e.removal, Some(RemovalOutcome::Missing | RemovalOutcome::Failed { .. }))
            })
            .count()
    }
}

/// Checks each asset in order and handles the removable ones.
///
/// Deletions are skipped under `dry_run`. Per-asset deletion failures are
/// recorded and logged; they never stop the batch.
#[must_use]
pub fn run(
    ctx: &ServiceContext,
    root: &Path,
    search_root: &Path,
    assets: &[DeclaredAsset],
    policy: PolicyConfig,
) -> SweepReport {
    let mut entries = Vec::with_capacity(assets.len());
    for asset in assets {
        let classification = policy::classify(asset, policy.force, ctx.search.as_ref(), search_root);
        if policy.verbose {
            info!(
                asset = %asset,
                verdict = %classification.verdict,
                reason = %classification.reason,
                "classified"
            );
        }

        let removal = classification.is_remove().then(|| {
            info!(asset = %asset, reason = %classification.reason, "unlinking");
            if policy.dry_run {
                RemovalOutcome::Planned
            } else {
                remove(ctx, root, asset)
            }
        });

        entries.push(SweepEntry { asset: asset.clone(), classification, removal });
    }

    SweepReport { generated_at: Utc::now(), policy, entries }
}

fn remove(ctx: &ServiceContext, root: &Path, asset: &DeclaredAsset) -> RemovalOutcome {
    let path = root.join(asset.path());
    if !ctx.fs.exists(&path) {
        warn!(file = %path.display(), "file is not found");
        return RemovalOutcome::Missing;
    }
    match ctx.fs.remove_file(&path) {
        Ok(()) => RemovalOutcome::Removed,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!(file = %path.display(), "file vanished before removal");
            RemovalOutcome::Missing
        }
        Err(e) => {
            warn!(file = %path.display(), error = %e, "unable to remove file");
            let kind = if e.kind() == io::ErrorKind::PermissionDenied {
                FailureKind::PermissionDenied
            } else {
                FailureKind::Other
            };
            RemovalOutcome::Failed { kind, message: e.to_string() }
        }
    }
}

/// Fails unless the directory searched for references exists.
///
/// Every search under a missing directory answers "not found", which would
/// mark every non-exempt asset for removal.
///
/// # Errors
///
/// Returns [`SweepError::SearchRootNotFound`] if it is not a directory.
pub fn require_search_root(ctx: &ServiceContext, settings: &Settings) -> Result<(), SweepError> {
    let path = settings.search_root();
    if ctx.fs.is_dir(&path) {
        Ok(())
    } else {
        Err(SweepError::SearchRootNotFound { path })
    }
}

/// Runs a full sweep: probe the search backend, read the manifest, check the
/// search directory, classify.
///
/// # Errors
///
/// Returns an error before any deletion if the search backend is unavailable,
/// the manifest cannot be read or parsed, or the search directory is missing.
pub fn sweep(ctx: &ServiceContext, settings: &Settings) -> Result<SweepReport, SweepError> {
    ctx.probe_search()?;
    let assets =
        manifest::read_declared_assets(ctx.fs.as_ref(), &settings.manifest_path(), &settings.prefix)?;
    require_search_root(ctx, settings)?;
    info!(count = assets.len(), manifest = %settings.manifest, "declared assets loaded");
    Ok(run(ctx, &settings.root, &settings.search_root(), &assets, settings.policy))
}
