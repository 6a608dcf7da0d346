//! File logging. The terminal belongs to the TUI, so tracing output goes to
//! `redwatch.log` next to the saved profiles.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::profiles::config_dir;

/// Env var holding the filter directive, e.g. `REDWATCH_LOG=redwatch=debug`.
pub const LOG_ENV: &str = "REDWATCH_LOG";

pub fn log_path() -> PathBuf {
    config_dir().join("redwatch.log")
}

/// Install the global subscriber writing to [`log_path`]. Returns the file used.
pub fn init_file_logging() -> anyhow::Result<PathBuf> {
    let path = log_path();
    init_logging_at(&path)?;
    Ok(path)
}

pub fn init_logging_at(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_filter(filter),
        )
        .try_init()?;
    Ok(())
}
