//! Logging bootstrap for hosts and demos

use tracing_subscriber::EnvFilter;

/// Install a `tracing` subscriber reading `RUST_LOG`, defaulting to `info`
///
/// Safe to call more than once; later calls leave the first subscriber in
/// place.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok();
    if installed {
        tracing::debug!("tracing subscriber installed");
    }
}
