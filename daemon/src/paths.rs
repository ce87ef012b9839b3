//! Canonical per-user file locations.
//!
//! Everything lives under the keywarp config directory:
//!   - config.toml  Declarative bindings and tunables.
//!   - lock         Advisory singleton lock, held while a daemon runs.
//!   - keywarp.log  stdout/stderr of a daemonized instance.

use std::path::PathBuf;

const APP_DIR_NAME: &str = "keywarp";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const LOCK_FILE_NAME: &str = "lock";
pub const LOG_FILE_NAME: &str = "keywarp.log";

/// Returns the keywarp configuration directory: `$XDG_CONFIG_HOME/keywarp`,
/// or `$HOME/.config/keywarp` when `XDG_CONFIG_HOME` is unset or empty.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            return PathBuf::from(xdg).join(APP_DIR_NAME);
        }
    }
    let home = std::env::var("HOME").expect("HOME environment variable not set");
    PathBuf::from(home).join(".config").join(APP_DIR_NAME)
}

/// Returns the full path to the config file.
pub fn config_file_path() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}

/// Returns the full path to the singleton lock file.
pub fn lock_file_path() -> PathBuf {
    config_dir().join(LOCK_FILE_NAME)
}

/// Returns the full path to the daemon log file.
pub fn log_file_path() -> PathBuf {
    config_dir().join(LOG_FILE_NAME)
}
