//! Logging initialization
//!
//! All diagnostics go to stderr so they never mix into command output
//! that consumers of the primary stream might parse.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber
///
/// The filter comes from `RUST_LOG`, defaulting to `info`. Safe to call
/// once per process; a second call reports an error instead of panicking.
pub fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
