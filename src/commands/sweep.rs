//! `qrc-sweep sweep` command.

use crate::config::Settings;
use crate::context::ServiceContext;
use crate::driver;
use crate::report;

/// Execute the `sweep` command.
///
/// # Errors
///
/// Returns an error string if the search backend is unavailable, the
/// manifest cannot be read, or the report cannot be serialized.
pub fn run(ctx: &ServiceContext, settings: &Settings, json: bool) -> Result<(), String> {
    let report = driver::sweep(ctx, settings).map_err(|e| e.to_string())?;
    if json {
        println!("{}", report::format_json(&report)?);
    } else {
        println!("{}", report::format_report(&report, settings.policy.verbose));
    }
    Ok(())
}
