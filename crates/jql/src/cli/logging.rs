//! Diagnostic logging to stderr.

use std::io;

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber.
///
/// Without `-v` the filter comes from `RUST_LOG`, defaulting to `warn`. `-v` selects `debug` and
/// `-vv` selects `trace` regardless of `RUST_LOG`.
pub fn init(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
    if let Err(e) = installed {
        eprintln!("warning: could not install logger: {e}");
    }
}
