//! Tracing subscriber setup.
//!
//! The TUI owns the terminal, so interactive sessions log to a file under
//! the config directory. One-shot CLI commands log to stderr.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use tracing_subscriber::EnvFilter;

use crate::constants;

/// Filter from `MESO_LOG`, else the configured level, else `info`.
fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(constants::LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new(constants::DEFAULT_LOG_LEVEL))
}

/// Path of the log file for a given config directory.
#[must_use]
pub fn log_file_path(config_dir: &Path) -> PathBuf {
    config_dir
        .join(constants::LOGS_DIR_NAME)
        .join(constants::LOG_FILE_NAME)
}

/// Routes tracing output to `{config_dir}/logs/meso.log`.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a global subscriber
/// is already installed.
pub fn init_file(config_dir: &Path, default_level: &str) -> Result<PathBuf> {
    let path = log_file_path(config_dir);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("Failed to create {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("Failed to open {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| eyre!("Failed to initialize logging: {e}"))?;
    Ok(path)
}

/// Routes tracing output to stderr for one-shot commands.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_stderr(default_level: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| eyre!("Failed to initialize logging: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_path() {
        let path = log_file_path(Path::new("/home/user/.config/meso"));
        assert_eq!(path, PathBuf::from("/home/user/.config/meso/logs/meso.log"));
    }
}
