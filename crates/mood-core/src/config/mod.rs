//! Configuration for Mood Player
//!
//! - Generic YAML config loading/saving
//! - Default config location
//! - [`MoodConfig`] and its per-subsystem sections
//!
//! # Usage
//!
//! ```ignore
//! use mood_core::config::{default_config_path, load_config, MoodConfig};
//!
//! let config: MoodConfig = load_config(&default_config_path());
//! ```

mod io;
mod paths;
mod settings;

pub use io::{load_config, save_config};
pub use paths::{default_config_dir, default_config_path, APP_DIR_NAME, CONFIG_FILE_NAME};
pub use settings::{DetectionConfig, HistoryConfig, IngestConfig, MoodConfig, PlaybackConfig};
