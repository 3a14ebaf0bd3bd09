//! File-backed tracing setup.
//!
//! The TUI owns the terminal while running, so logs must never go to
//! stdout/stderr once the alternate screen is active. All output goes to
//! a dated log file instead; `RUST_LOG` controls the filter.

use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Resolve the log directory, creating it if needed.
pub fn log_dir() -> Result<PathBuf> {
    let dir = dirs::data_dir()
        .context("could not determine data directory")?
        .join("mindbar")
        .join("logs");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Initialize tracing to a dated file under the data directory.
/// Returns the path of the log file for display after teardown.
pub fn init_tracing() -> Result<PathBuf> {
    let path = log_dir()?.join(format!(
        "mindbar-{}.log",
        Local::now().format("%Y%m%d-%H%M%S")
    ));
    let file = fs::File::create(&path)
        .with_context(|| format!("could not create log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .init();

    Ok(path)
}
