//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Installs a stderr subscriber.
///
/// `RUST_LOG` wins when set. Otherwise `verbose` selects `debug` for this
/// crate and plain runs log at `info`. Calling this more than once is a no-op.
pub fn init(verbose: bool) {
    let default = if verbose { "qrc_sweep=debug" } else { "qrc_sweep=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::init;

    #[test]
    fn repeated_init_is_harmless() {
        init(false);
        init(true);
    }
}
