//! Log setup for the binaries.
//!
//! The terminal belongs to the game, so logs only go to a file, and only
//! when `ARCADE_LOG_PATH` names one.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub const LOG_PATH_VAR: &str = "ARCADE_LOG_PATH";

/// Install a file subscriber if `ARCADE_LOG_PATH` is set. Returns whether
/// logging is on.
pub fn init_from_env() -> Result<bool> {
    match std::env::var(LOG_PATH_VAR) {
        Ok(path) if !path.trim().is_empty() => {
            init_file(Path::new(path.trim()))?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// Append logs to `path`, filtered by `RUST_LOG` (default `info`).
pub fn init_file(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .context("failed to install log subscriber")?;
    Ok(())
}
