//! Playback state

use crate::types::Mood;
use serde::{Deserialize, Serialize};

/// Repeat behaviour at the end of a track
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatMode {
    #[default]
    None,
    One,
    All,
}

impl RepeatMode {
    /// Next mode in the `none → one → all → none` cycle
    pub fn cycle(self) -> Self {
        match self {
            RepeatMode::None => RepeatMode::One,
            RepeatMode::One => RepeatMode::All,
            RepeatMode::All => RepeatMode::None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RepeatMode::None => "none",
            RepeatMode::One => "one",
            RepeatMode::All => "all",
        }
    }
}

/// Cursor movement when a track ends with [`RepeatMode::None`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndOfTrackPolicy {
    /// Step the cursor once (wrapping to 0 past the end), then play next.
    /// Net effect: one track is skipped on every natural track end.
    #[default]
    DoubleAdvance,
    /// Play next only, same as [`RepeatMode::All`]
    SingleAdvance,
}

/// Snapshot of the transport
///
/// The engine owns the only live instance; callers get shared references or
/// clones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Mood whose bucket is the current playlist; `None` plays everything
    pub active_mood: Option<Mood>,
    /// Position in the current playlist (validated modulo its length on use)
    pub cursor_index: usize,
    pub is_playing: bool,
    pub is_shuffled: bool,
    pub repeat_mode: RepeatMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat_cycle() {
        assert_eq!(RepeatMode::None.cycle(), RepeatMode::One);
        assert_eq!(RepeatMode::One.cycle(), RepeatMode::All);
        assert_eq!(RepeatMode::All.cycle(), RepeatMode::None);
    }

    #[test]
    fn test_policy_yaml_names() {
        let policy: EndOfTrackPolicy = serde_yaml::from_str("single_advance").unwrap();
        assert_eq!(policy, EndOfTrackPolicy::SingleAdvance);
        assert_eq!(
            serde_yaml::to_string(&RepeatMode::All).unwrap().trim(),
            "all"
        );
    }
}
