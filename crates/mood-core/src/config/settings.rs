//! Mood Player settings
//!
//! Every section is `#[serde(default)]`, so a config file only needs the keys
//! it changes.
//!
//! ```yaml
//! detection:
//!   interval_ms: 1000
//!   confidence_threshold: 0.7
//! history:
//!   max_entries: 10
//! playback:
//!   end_of_track: double_advance
//!   shuffle: false
//!   repeat: none
//! ingest:
//!   max_upload_bytes: 50000000
//! ```

use crate::classifier::MoodClassifier;
use crate::history::MoodHistory;
use crate::playback::{EndOfTrackPolicy, RepeatMode};
use crate::types::{DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_HISTORY_CAPACITY};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoodConfig {
    pub detection: DetectionConfig,
    pub history: HistoryConfig,
    pub playback: PlaybackConfig,
    pub ingest: IngestConfig,
}

/// Detection loop scheduling and classifier settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Master switch; the detection service refuses to start when false
    /// Default: true
    pub enabled: bool,

    /// Period between detection passes
    /// Default: 1000 ms
    pub interval_ms: u64,

    /// Minimum confidence for a non-neutral mood (exclusive)
    /// Default: 0.7
    pub confidence_threshold: f32,

    /// Consecutive detector failures retried on the short schedule
    /// Default: 3
    pub max_retries: u32,

    /// Base retry delay, multiplied by the attempt number
    /// Default: 1000 ms
    pub retry_delay_ms: u64,

    /// Polling period once retries are exhausted
    /// Default: 5000 ms
    pub degraded_interval_ms: u64,

    /// Frames closer together than this are dropped by worker detectors
    /// Default: 33 ms (30 fps)
    pub min_frame_interval_ms: u64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: 1000,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            max_retries: 3,
            retry_delay_ms: 1000,
            degraded_interval_ms: 5000,
            min_frame_interval_ms: 33,
        }
    }
}

impl DetectionConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn degraded_interval(&self) -> Duration {
        Duration::from_millis(self.degraded_interval_ms)
    }

    pub fn min_frame_interval(&self) -> Duration {
        Duration::from_millis(self.min_frame_interval_ms)
    }

    pub fn classifier(&self) -> MoodClassifier {
        MoodClassifier::new(self.confidence_threshold)
    }
}

/// Mood history retention
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Entries kept, newest first
    /// Default: 10 (also the upper limit)
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl HistoryConfig {
    pub fn history(&self) -> MoodHistory {
        MoodHistory::new(self.max_entries)
    }
}

/// Initial transport modes and end-of-track behaviour
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub end_of_track: EndOfTrackPolicy,
    pub shuffle: bool,
    pub repeat: RepeatMode,
}

/// Upload limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Largest accepted upload
    /// Default: 50 MB
    pub max_upload_bytes: u64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: 50_000_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MoodConfig::default();
        assert!(config.detection.enabled);
        assert_eq!(config.detection.interval(), Duration::from_secs(1));
        assert_eq!(config.detection.confidence_threshold, 0.7);
        assert_eq!(config.detection.max_retries, 3);
        assert_eq!(config.history.max_entries, 10);
        assert_eq!(config.playback.end_of_track, EndOfTrackPolicy::DoubleAdvance);
        assert_eq!(config.playback.repeat, RepeatMode::None);
        assert!(!config.playback.shuffle);
        assert_eq!(config.ingest.max_upload_bytes, 50_000_000);
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let yaml = r#"
detection:
  interval_ms: 250
playback:
  end_of_track: single_advance
  repeat: all
"#;
        let config: MoodConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.detection.interval_ms, 250);
        assert_eq!(config.detection.retry_delay_ms, 1000);
        assert_eq!(config.playback.end_of_track, EndOfTrackPolicy::SingleAdvance);
        assert_eq!(config.playback.repeat, RepeatMode::All);
        assert_eq!(config.history, HistoryConfig::default());
    }

    #[test]
    fn test_builders_use_settings() {
        let mut config = MoodConfig::default();
        config.detection.confidence_threshold = 0.5;
        config.history.max_entries = 3;

        assert_eq!(config.detection.classifier().threshold(), 0.5);
        assert_eq!(config.history.history().capacity(), 3);
    }

    #[test]
    fn test_history_capacity_capped() {
        let config: MoodConfig = serde_yaml::from_str("history:\n  max_entries: 25\n").unwrap();
        assert_eq!(config.history.max_entries, 25);
        assert_eq!(config.history.history().capacity(), DEFAULT_HISTORY_CAPACITY);
    }
}
