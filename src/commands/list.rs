//! `qrc-sweep list` command.

use crate::config::Settings;
use crate::context::ServiceContext;
use crate::manifest;
use crate::report;

/// Execute the `list` command.
///
/// # Errors
///
/// Returns an error string if the manifest cannot be read or parsed.
pub fn run(ctx: &ServiceContext, settings: &Settings, json: bool) -> Result<(), String> {
    let assets =
        manifest::read_declared_assets(ctx.fs.as_ref(), &settings.manifest_path(), &settings.prefix)
            .map_err(|e| e.to_string())?;
    if json {
        let text = serde_json::to_string_pretty(&assets)
            .map_err(|e| format!("failed to serialize asset list: {e}"))?;
        println!("{text}");
    } else {
        println!("{}", report::format_assets(&assets));
    }
    Ok(())
}
