//! Standard locations for Mood Player files

use std::path::PathBuf;

/// Directory name under the user's config directory
pub const APP_DIR_NAME: &str = "mood-player";

/// Config file name inside [`default_config_dir`]
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Get the default config directory
///
/// Returns: `~/.config/mood-player` (platform config dir, falling back to `.`)
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Get the default config file path
pub fn default_config_path() -> PathBuf {
    default_config_dir().join(CONFIG_FILE_NAME)
}
