//! Binary entrypoint for the `qrc-sweep` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // A `.env` in the working directory may carry QRC_SWEEP_* settings.
    let _ = dotenvy::dotenv();

    match qrc_sweep::run(std::env::args_os()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
