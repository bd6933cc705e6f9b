//! Path helpers.

use std::path::PathBuf;

use crate::constants;

/// Expands a leading `~/` to the user's home directory.
pub fn expand_home(path_str: &str) -> PathBuf {
    if let Some(stripped) = path_str.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path_str)
}

/// Resolves the config directory and describes where it came from.
///
/// An explicit path (flag or `MESO_CONFIG_DIR`) wins; otherwise the platform
/// config directory is used, falling back to `~/.meso`.
pub fn resolve_config_dir(explicit: Option<&str>) -> (PathBuf, &'static str) {
    if let Some(dir) = explicit.filter(|d| !d.trim().is_empty()) {
        return (expand_home(dir.trim()), "explicit");
    }
    if let Some(base) = dirs::config_dir() {
        return (base.join(constants::CONFIG_DIR_NAME), "default");
    }
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    (home.join(format!(".{}", constants::CONFIG_DIR_NAME)), "fallback")
}
