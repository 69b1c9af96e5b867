//! Playback error types

use thiserror::Error;

/// Errors from explicit track selection
///
/// Navigation (next, previous, track end) never fails: an empty playlist is a
/// no-op there.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// The current playlist has no tracks
    #[error("Current playlist is empty")]
    EmptyPlaylist,

    /// Selected index is past the end of the current playlist
    #[error("Track index {index} out of range for playlist of {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Result type for playback operations
pub type PlaybackResult<T> = Result<T, PlaybackError>;
