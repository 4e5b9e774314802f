//! Centralized path management for the folder-mover CLI
//!
//! Config and data locations follow platform conventions so every command
//! resolves them the same way.

use std::path::PathBuf;

/// The name of the application directory used across all platforms
const APP_DIR: &str = "folder-mover";

/// The name of the configuration file
const CONFIG_FILE: &str = "config.toml";

/// The name of the default account snapshot file
const SNAPSHOT_FILE: &str = "snapshot.json";

/// Returns the base data directory for the application
///
/// - Linux: `~/.local/share/folder-mover`
/// - macOS: `~/Library/Application Support/folder-mover`
/// - Windows: `%APPDATA%/folder-mover`
///
/// Falls back to `.folder-mover` in the current directory.
pub fn get_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(".folder-mover"))
}

/// Snapshot file used when `service.snapshot_path` is not configured
pub fn default_snapshot_path() -> PathBuf {
    get_data_dir().join(SNAPSHOT_FILE)
}

/// Returns the configuration directory
///
/// `XDG_CONFIG_HOME` wins on non-Windows platforms.
pub fn get_config_dir() -> PathBuf {
    #[cfg(not(target_os = "windows"))]
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg_config).join(APP_DIR);
    }

    dirs::config_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(".folder-mover"))
}

/// Returns the path to the configuration file
pub fn get_config_path() -> PathBuf {
    get_config_dir().join(CONFIG_FILE)
}
