//! Playback state machine

use super::catalog::Catalog;
use super::command::{PlaybackCommand, PlaybackControl};
use super::error::{PlaybackError, PlaybackResult};
use super::state::{EndOfTrackPolicy, PlaybackState, RepeatMode};
use super::track::Track;
use crate::config::PlaybackConfig;
use crate::types::Mood;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Owns the catalog and the playback state
///
/// The current playlist is recomputed from the catalog on every navigation
/// call, so ingestion between calls is always reflected and the cursor is
/// validated against the playlist as it is now.
pub struct PlaybackEngine<R = StdRng> {
    catalog: Catalog,
    state: PlaybackState,
    now_playing: Option<Track>,
    end_of_track: EndOfTrackPolicy,
    rng: R,
}

impl PlaybackEngine<StdRng> {
    /// Create an engine seeded from the operating system
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Create an engine with the configured modes and end-of-track policy
    pub fn from_config(config: &PlaybackConfig) -> Self {
        Self::new()
            .with_modes(config.shuffle, config.repeat)
            .with_end_of_track(config.end_of_track)
    }
}

impl Default for PlaybackEngine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> PlaybackEngine<R> {
    /// Create an engine drawing shuffle positions from `rng`
    pub fn with_rng(rng: R) -> Self {
        Self {
            catalog: Catalog::new(),
            state: PlaybackState::default(),
            now_playing: None,
            end_of_track: EndOfTrackPolicy::default(),
            rng,
        }
    }

    /// Set the cursor policy for natural track ends under [`RepeatMode::None`]
    pub fn with_end_of_track(mut self, policy: EndOfTrackPolicy) -> Self {
        self.end_of_track = policy;
        self
    }

    /// Set the initial transport modes
    pub fn with_modes(mut self, shuffled: bool, repeat_mode: RepeatMode) -> Self {
        self.state.is_shuffled = shuffled;
        self.state.repeat_mode = repeat_mode;
        self
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Track most recently sent to the audio output
    pub fn now_playing(&self) -> Option<&Track> {
        self.now_playing.as_ref()
    }

    pub fn end_of_track_policy(&self) -> EndOfTrackPolicy {
        self.end_of_track
    }

    /// Add a track to the catalog
    ///
    /// Leaves the cursor and the active mood untouched.
    pub fn ingest(&mut self, track: Track) {
        log::debug!("ingest: {} -> {}", track.id, track.mood);
        if let Some(old) = self.catalog.insert(track) {
            log::info!("ingest: Replaced track {} (was {})", old.id, old.mood);
        }
    }

    /// Bucket of the active mood, or every bucket flattened when no mood is active
    pub fn current_playlist(&self) -> Vec<&Track> {
        match self.state.active_mood {
            Some(mood) => self.catalog.bucket(mood).iter().collect(),
            None => self.catalog.all_tracks(),
        }
    }

    fn playlist_len(&self) -> usize {
        match self.state.active_mood {
            Some(mood) => self.catalog.bucket(mood).len(),
            None => self.catalog.len(),
        }
    }

    /// React to a newly detected mood
    ///
    /// Switches the playlist to the mood's bucket and starts its first track
    /// (a random one when shuffled). If the bucket is empty the mood still
    /// becomes active but the current track keeps playing.
    pub fn on_mood_changed(&mut self, mood: Mood) -> Option<PlaybackCommand> {
        if self.state.active_mood == Some(mood) {
            return None;
        }

        log::info!(
            "on_mood_changed: {:?} -> {}",
            self.state.active_mood,
            mood
        );
        self.state.active_mood = Some(mood);
        self.state.cursor_index = 0;

        let len = self.playlist_len();
        if len == 0 {
            log::info!("on_mood_changed: No tracks tagged {}, keeping current track", mood);
            return None;
        }

        let index = if self.state.is_shuffled {
            self.rng.random_range(0..len)
        } else {
            0
        };
        self.play_at(index)
    }

    /// Advance to the next track (random when shuffled), wrapping at the end
    pub fn play_next(&mut self) -> Option<PlaybackCommand> {
        let len = self.playlist_len();
        if len == 0 {
            return None;
        }

        let index = if self.state.is_shuffled {
            self.rng.random_range(0..len)
        } else {
            (self.state.cursor_index + 1) % len
        };
        self.play_at(index)
    }

    /// Step back to the previous track (random when shuffled), wrapping at the start
    pub fn play_previous(&mut self) -> Option<PlaybackCommand> {
        let len = self.playlist_len();
        if len == 0 {
            return None;
        }

        let index = if self.state.is_shuffled {
            self.rng.random_range(0..len)
        } else {
            (self.state.cursor_index % len + len - 1) % len
        };
        self.play_at(index)
    }

    /// The audio output finished the current track
    pub fn on_track_ended(&mut self) -> Option<PlaybackCommand> {
        match self.state.repeat_mode {
            RepeatMode::One => {
                let track = self.now_playing.clone()?;
                self.state.is_playing = true;
                Some(PlaybackCommand::Replay(track))
            }
            RepeatMode::All => self.play_next(),
            RepeatMode::None => {
                if self.end_of_track == EndOfTrackPolicy::DoubleAdvance {
                    self.state.cursor_index += 1;
                    if self.state.cursor_index >= self.playlist_len() {
                        self.state.cursor_index = 0;
                    }
                }
                self.play_next()
            }
        }
    }

    /// Flip shuffle, returning the new setting
    pub fn toggle_shuffle(&mut self) -> bool {
        self.state.is_shuffled = !self.state.is_shuffled;
        self.state.is_shuffled
    }

    /// Cycle the repeat mode, returning the new mode
    pub fn toggle_repeat(&mut self) -> RepeatMode {
        self.state.repeat_mode = self.state.repeat_mode.cycle();
        self.state.repeat_mode
    }

    /// Pause when playing; otherwise resume the current track or start the
    /// track under the cursor
    pub fn toggle_play_pause(&mut self) -> Option<PlaybackCommand> {
        if self.state.is_playing {
            return self.pause();
        }

        if self.now_playing.is_some() {
            self.state.is_playing = true;
            return Some(PlaybackCommand::Resume);
        }

        let len = self.playlist_len();
        if len == 0 {
            return None;
        }
        self.play_at(self.state.cursor_index % len)
    }

    pub fn pause(&mut self) -> Option<PlaybackCommand> {
        if !self.state.is_playing {
            return None;
        }
        self.state.is_playing = false;
        Some(PlaybackCommand::Pause)
    }

    /// Play a specific entry of the current playlist
    pub fn select(&mut self, index: usize) -> PlaybackResult<PlaybackCommand> {
        let len = self.playlist_len();
        if len == 0 {
            return Err(PlaybackError::EmptyPlaylist);
        }
        if index >= len {
            return Err(PlaybackError::IndexOutOfRange { index, len });
        }
        self.play_at(index).ok_or(PlaybackError::EmptyPlaylist)
    }

    /// Dispatch a UI control
    ///
    /// Selection errors are logged and treated as no-ops.
    pub fn apply(&mut self, control: PlaybackControl) -> Option<PlaybackCommand> {
        match control {
            PlaybackControl::Next => self.play_next(),
            PlaybackControl::Previous => self.play_previous(),
            PlaybackControl::TogglePlayPause => self.toggle_play_pause(),
            PlaybackControl::ToggleShuffle => {
                self.toggle_shuffle();
                None
            }
            PlaybackControl::ToggleRepeat => {
                self.toggle_repeat();
                None
            }
            PlaybackControl::TrackEnded => self.on_track_ended(),
            PlaybackControl::Select(index) => match self.select(index) {
                Ok(command) => Some(command),
                Err(e) => {
                    log::warn!("apply: Ignoring selection: {}", e);
                    None
                }
            },
        }
    }

    fn play_at(&mut self, index: usize) -> Option<PlaybackCommand> {
        let track = self.current_playlist().get(index).map(|t| (*t).clone())?;

        log::debug!("play_at: [{}] {}", index, track.display_name);
        self.state.cursor_index = index;
        self.state.is_playing = true;
        self.now_playing = Some(track.clone());
        Some(PlaybackCommand::Play(track))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::catalog::tests::track;

    fn engine() -> PlaybackEngine<StdRng> {
        PlaybackEngine::with_rng(StdRng::seed_from_u64(7))
    }

    fn played_id(command: Option<PlaybackCommand>) -> Option<String> {
        command.and_then(|c| c.track().map(|t| t.id.clone()))
    }

    fn happy_engine() -> PlaybackEngine<StdRng> {
        let mut engine = engine();
        for id in ["h0", "h1", "h2"] {
            engine.ingest(track(id, Mood::Happy));
        }
        engine
    }

    #[test]
    fn test_mood_change_starts_first_track() {
        let mut engine = happy_engine();
        let command = engine.on_mood_changed(Mood::Happy);

        assert_eq!(played_id(command), Some("h0".to_string()));
        assert_eq!(engine.state().cursor_index, 0);
        assert_eq!(engine.state().active_mood, Some(Mood::Happy));
        assert!(engine.state().is_playing);
    }

    #[test]
    fn test_play_next_wraps() {
        let mut engine = happy_engine();
        engine.on_mood_changed(Mood::Happy);

        let mut cursors = Vec::new();
        for _ in 0..3 {
            engine.play_next();
            cursors.push(engine.state().cursor_index);
        }
        assert_eq!(cursors, vec![1, 2, 0]);
        assert_eq!(engine.now_playing().map(|t| t.id.as_str()), Some("h0"));
    }

    #[test]
    fn test_play_previous_wraps() {
        let mut engine = happy_engine();
        engine.on_mood_changed(Mood::Happy);

        assert_eq!(played_id(engine.play_previous()), Some("h2".to_string()));
        assert_eq!(played_id(engine.play_previous()), Some("h1".to_string()));
    }

    #[test]
    fn test_same_mood_is_noop() {
        let mut engine = happy_engine();
        engine.on_mood_changed(Mood::Happy);
        engine.play_next();
        assert!(engine.on_mood_changed(Mood::Happy).is_none());
        assert_eq!(engine.state().cursor_index, 1);
    }

    #[test]
    fn test_empty_bucket_keeps_current_track() {
        let mut engine = happy_engine();
        engine.on_mood_changed(Mood::Happy);
        engine.play_next();

        assert!(engine.on_mood_changed(Mood::Sad).is_none());
        assert_eq!(engine.state().active_mood, Some(Mood::Sad));
        assert_eq!(engine.now_playing().map(|t| t.id.as_str()), Some("h1"));
        assert!(engine.state().is_playing);

        // Navigation on the empty playlist is a no-op
        assert!(engine.play_next().is_none());
        assert!(engine.play_previous().is_none());
        assert!(engine.on_track_ended().is_none());
    }

    #[test]
    fn test_no_active_mood_plays_everything() {
        let mut engine = engine();
        engine.ingest(track("s0", Mood::Sad));
        engine.ingest(track("h0", Mood::Happy));
        engine.ingest(track("s1", Mood::Sad));

        let ids: Vec<&str> = engine
            .current_playlist()
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["s0", "s1", "h0"]);

        assert_eq!(played_id(engine.play_next()), Some("s1".to_string()));
        assert_eq!(played_id(engine.play_next()), Some("h0".to_string()));
    }

    #[test]
    fn test_ingest_does_not_move_cursor() {
        let mut engine = happy_engine();
        engine.on_mood_changed(Mood::Happy);
        engine.play_next();
        engine.ingest(track("h3", Mood::Happy));
        engine.ingest(track("r0", Mood::Relaxed));

        assert_eq!(engine.state().cursor_index, 1);
        assert_eq!(engine.state().active_mood, Some(Mood::Happy));
        assert_eq!(engine.current_playlist().len(), 4);
    }

    #[test]
    fn test_repeat_one_replays_same_track() {
        let mut engine = happy_engine();
        engine.on_mood_changed(Mood::Happy);
        engine.play_next();
        engine.toggle_repeat();
        assert_eq!(engine.state().repeat_mode, RepeatMode::One);

        let command = engine.on_track_ended();
        assert!(matches!(command, Some(PlaybackCommand::Replay(ref t)) if t.id == "h1"));
        assert_eq!(engine.state().cursor_index, 1);
    }

    #[test]
    fn test_repeat_all_advances_one() {
        let mut engine = happy_engine().with_modes(false, RepeatMode::All);
        engine.on_mood_changed(Mood::Happy);

        assert_eq!(played_id(engine.on_track_ended()), Some("h1".to_string()));
        assert_eq!(engine.state().cursor_index, 1);
    }

    #[test]
    fn test_repeat_none_double_advances() {
        let mut engine = happy_engine();
        engine.on_mood_changed(Mood::Happy);

        // Cursor 0 -> 1 by the end-of-track step, then 2 by play_next
        assert_eq!(played_id(engine.on_track_ended()), Some("h2".to_string()));
        // Cursor 2 -> 3 wraps to 0, then play_next lands on 1
        assert_eq!(played_id(engine.on_track_ended()), Some("h1".to_string()));
    }

    #[test]
    fn test_repeat_none_single_advance_policy() {
        let mut engine = happy_engine().with_end_of_track(EndOfTrackPolicy::SingleAdvance);
        engine.on_mood_changed(Mood::Happy);

        assert_eq!(played_id(engine.on_track_ended()), Some("h1".to_string()));
        assert_eq!(played_id(engine.on_track_ended()), Some("h2".to_string()));
    }

    #[test]
    fn test_shuffle_stays_in_playlist() {
        let mut engine = happy_engine();
        engine.toggle_shuffle();
        engine.on_mood_changed(Mood::Happy);

        for _ in 0..50 {
            let id = played_id(engine.play_next()).unwrap();
            assert!(id.starts_with('h'));
            assert!(engine.state().cursor_index < 3);
        }
    }

    #[test]
    fn test_from_config() {
        let config = PlaybackConfig {
            end_of_track: EndOfTrackPolicy::SingleAdvance,
            shuffle: true,
            repeat: RepeatMode::One,
        };
        let engine = PlaybackEngine::from_config(&config);
        assert!(engine.state().is_shuffled);
        assert_eq!(engine.state().repeat_mode, RepeatMode::One);
        assert_eq!(engine.end_of_track_policy(), EndOfTrackPolicy::SingleAdvance);
        assert!(engine.state().active_mood.is_none());
    }

    #[test]
    fn test_toggles_are_idempotent() {
        let mut engine = engine();
        let shuffled = engine.state().is_shuffled;
        engine.toggle_shuffle();
        engine.toggle_shuffle();
        assert_eq!(engine.state().is_shuffled, shuffled);

        let repeat = engine.state().repeat_mode;
        for _ in 0..3 {
            engine.toggle_repeat();
        }
        assert_eq!(engine.state().repeat_mode, repeat);
    }

    #[test]
    fn test_toggle_play_pause() {
        let mut engine = happy_engine();
        assert_eq!(played_id(engine.toggle_play_pause()), Some("h0".to_string()));
        assert_eq!(engine.toggle_play_pause(), Some(PlaybackCommand::Pause));
        assert!(!engine.state().is_playing);
        assert_eq!(engine.toggle_play_pause(), Some(PlaybackCommand::Resume));
        assert!(engine.state().is_playing);
        assert!(engine.pause().is_some());
        assert!(engine.pause().is_none());
    }

    #[test]
    fn test_select_errors() {
        let mut engine = engine();
        assert_eq!(engine.select(0), Err(PlaybackError::EmptyPlaylist));

        engine.ingest(track("a", Mood::Focused));
        assert_eq!(
            engine.select(3),
            Err(PlaybackError::IndexOutOfRange { index: 3, len: 1 })
        );
        assert!(engine.select(0).is_ok());
        assert!(engine.apply(PlaybackControl::Select(9)).is_none());
    }

    #[test]
    fn test_stale_cursor_is_validated_against_current_playlist() {
        let mut engine = happy_engine();
        engine.on_mood_changed(Mood::Happy);
        engine.play_next();
        engine.play_next();
        assert_eq!(engine.state().cursor_index, 2);

        // Switch to a shorter bucket: cursor resets, navigation stays in range
        engine.ingest(track("f0", Mood::Focused));
        engine.on_mood_changed(Mood::Focused);
        assert_eq!(played_id(engine.play_previous()), Some("f0".to_string()));
        assert_eq!(engine.state().cursor_index, 0);
    }
}
