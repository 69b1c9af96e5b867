//! Mood-driven playback
//!
//! The [`PlaybackEngine`] owns the mood-tagged [`Catalog`] and the single
//! [`PlaybackState`]. Every mutation goes through engine methods, which answer
//! with an optional [`PlaybackCommand`] for the audio output collaborator.
//!
//! ```text
//!   ingest(track) ──► Catalog { Happy: [..], Sad: [..], .. }
//!                            │
//!   on_mood_changed(mood) ───┤  current_playlist() = bucket of active mood
//!   play_next / previous ────┤                      or every bucket flattened
//!   on_track_ended ──────────┘
//!                            ▼
//!                   Some(PlaybackCommand::Play(track))
//! ```

mod catalog;
mod command;
mod engine;
mod error;
mod state;
mod track;
pub mod transitions;

pub use catalog::Catalog;
pub use command::{PlaybackCommand, PlaybackControl};
pub use engine::PlaybackEngine;
pub use error::{PlaybackError, PlaybackResult};
pub use state::{EndOfTrackPolicy, PlaybackState, RepeatMode};
pub use track::{format_duration, Track};

#[cfg(test)]
pub(crate) use catalog::tests::track as test_track;
