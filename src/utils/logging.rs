//! File logging for the terminal front-end.
//!
//! The terminal is in raw mode while the game runs, so log output goes to
//! ~/.spampede/spampede.log instead of stderr.

use crate::core::constants::{LOG_FILENAME, LOG_FILTER_ENV};
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Install a global `tracing` subscriber appending to `dir/spampede.log`.
/// The filter comes from `SPAMPEDE_LOG` and defaults to `info`.
pub fn init_file_logging(dir: &Path) -> io::Result<PathBuf> {
    let path = dir.join(LOG_FILENAME);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))?;

    Ok(path)
}
