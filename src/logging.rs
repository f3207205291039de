use std::io;

use tracing_subscriber::EnvFilter;

/// Logs go to stderr so they never mix with a calendar written to stdout.
/// `RUST_LOG` takes precedence over `--verbose`.
pub fn init(verbose: bool) {
    let default = if verbose { "kalendar_core=debug,kalendar=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
