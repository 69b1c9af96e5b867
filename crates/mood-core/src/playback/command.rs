//! Playback commands and controls
//!
//! [`PlaybackControl`] is what the UI asks of the engine; [`PlaybackCommand`]
//! is what the engine tells the audio output.

use super::track::Track;
use serde::{Deserialize, Serialize};

/// Instruction for the audio output collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackCommand {
    /// Load and start a track from the beginning
    Play(Track),
    /// Restart the current track
    Replay(Track),
    /// Pause output
    Pause,
    /// Resume paused output
    Resume,
}

impl PlaybackCommand {
    /// Track started by this command, if any
    pub fn track(&self) -> Option<&Track> {
        match self {
            PlaybackCommand::Play(track) | PlaybackCommand::Replay(track) => Some(track),
            PlaybackCommand::Pause | PlaybackCommand::Resume => None,
        }
    }
}

/// Transport controls exposed to the UI collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackControl {
    Next,
    Previous,
    TogglePlayPause,
    ToggleShuffle,
    ToggleRepeat,
    /// The audio output reached the end of the current track
    TrackEnded,
    /// Play a specific entry of the current playlist
    Select(usize),
}
