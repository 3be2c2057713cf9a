//! Core library entry for the `qrc-sweep` CLI.
//!
//! Finds images declared in a Qt resource manifest that nothing in the
//! source tree references any more, and deletes them.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod driver;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod policy;
pub mod ports;
pub mod project;
pub mod report;

use clap::Parser;

pub use error::SweepError;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli)
}
