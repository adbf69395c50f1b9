// src/logging.rs
// =============================================================================
// Structured logging with `tracing`.
//
// Logs go to stderr so the report on stdout (especially --json) stays clean.
// RUST_LOG wins if set; otherwise we log this crate at info (debug with
// --verbose) and everything else at warn.
// =============================================================================

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Call once, first thing in main.
pub fn init(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(format!("warn,image_harvester={}", default_level))
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}
