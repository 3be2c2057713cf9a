//! `qrc-sweep check` command.

use serde::Serialize;

use crate::config::Settings;
use crate::context::ServiceContext;
use crate::driver;
use crate::manifest::DeclaredAsset;
use crate::policy::{self, Classification};
use crate::report;

#[derive(Serialize)]
struct CheckOutput<'a> {
    asset: &'a DeclaredAsset,
    classification: &'a Classification,
}

/// Execute the `check` command.
///
/// Classifies the named assets under the current policy and prints the
/// rules evaluated for each. Nothing is deleted.
///
/// # Errors
///
/// Returns an error string if the search backend is unavailable or the
/// search directory does not exist.
pub fn run(
    ctx: &ServiceContext,
    settings: &Settings,
    assets: &[String],
    json: bool,
) -> Result<(), String> {
    ctx.probe_search().map_err(|e| e.to_string())?;
    driver::require_search_root(ctx, settings).map_err(|e| e.to_string())?;
    let search_root = settings.search_root();
    let results: Vec<(DeclaredAsset, Classification)> = assets
        .iter()
        .map(|path| {
            let asset = DeclaredAsset::new(path.trim_start_matches(":/"));
            let c = policy::classify(&asset, settings.policy.force, ctx.search.as_ref(), &search_root);
            (asset, c)
        })
        .collect();

    if json {
        let output: Vec<CheckOutput<'_>> = results
            .iter()
            .map(|(asset, classification)| CheckOutput { asset, classification })
            .collect();
        let text = serde_json::to_string_pretty(&output)
            .map_err(|e| format!("failed to serialize check results: {e}"))?;
        println!("{text}");
    } else {
        println!("{}", report::format_checks(&results));
    }
    Ok(())
}
