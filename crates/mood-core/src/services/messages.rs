//! Message types for service communication
//!
//! Commands are request-reply using oneshot channels; events are broadcast
//! on the [`EventBus`].

use crate::history::MoodHistoryEntry;
use crate::playback::{PlaybackCommand, PlaybackControl, PlaybackState, Track};
use crate::types::{Mood, MoodResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Detection Commands
// ============================================================================

/// Commands sent to the DetectionService
pub enum DetectionCommand {
    /// Add a track to the playback catalog
    Ingest(Track),

    /// Apply a user playback control
    Playback(PlaybackControl),

    /// Get the mood history, newest first
    GetHistory {
        reply: tokio::sync::oneshot::Sender<Vec<MoodHistoryEntry>>,
    },

    /// Get a snapshot of the playback state
    GetPlaybackState {
        reply: tokio::sync::oneshot::Sender<PlaybackState>,
    },

    /// Stop the detection loop
    Stop,
}

// ============================================================================
// Application Events (Broadcast)
// ============================================================================

/// Why a detection pass produced no mood
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// The detector saw no face
    NoFace,
    /// The landmark set was missing regions or points
    MalformedLandmarks(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoFace => write!(f, "no face"),
            Self::MalformedLandmarks(detail) => write!(f, "malformed landmarks: {}", detail),
        }
    }
}

/// Events broadcast to all subscribers
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    // --- Detection Events ---
    /// A pass classified the current frame
    MoodDetected(MoodResult),

    /// The detected mood differs from the playback engine's active mood
    MoodChanged { from: Option<Mood>, to: Mood },

    /// A pass produced no mood
    FrameSkipped { reason: SkipReason },

    /// A pass finished after stop was requested and was thrown away
    ResultDiscarded,

    // --- Detector Health ---
    /// The detector failed; the next pass runs after `delay`
    DetectorRetrying { attempt: u32, delay: Duration },

    /// Retries are exhausted; polling continues at the degraded interval
    DetectorFailing { consecutive_failures: u32 },

    /// The detector produced a frame after failing
    DetectorRecovered,

    /// The detector can no longer produce frames
    DetectorDisconnected,

    // --- Playback Events ---
    /// Instruction for the audio output
    Playback(PlaybackCommand),

    /// Playback state after a change
    PlaybackStateChanged(PlaybackState),

    // --- Service Events ---
    /// A service started
    ServiceStarted { service_name: String },

    /// A service stopped
    ServiceStopped { service_name: String },

    /// A service encountered an error
    ServiceError { service_name: String, error: String },
}

// ============================================================================
// Service Handle
// ============================================================================

/// Shared flag asking a service to stop
///
/// Raised before the stop command is queued, so a service that is busy in
/// the middle of a pass sees it as soon as the pass returns.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Handle for communicating with a background service
pub struct ServiceHandle<Cmd> {
    /// Channel for sending commands to the service
    pub command_tx: crossbeam::channel::Sender<Cmd>,
    /// Thread handle for the service
    pub thread_handle: Option<std::thread::JoinHandle<()>>,
    /// Stop flag shared with the service thread
    pub stop_signal: StopSignal,
}

impl<Cmd> ServiceHandle<Cmd> {
    /// Send a command to the service
    pub fn send(&self, cmd: Cmd) -> Result<(), crossbeam::channel::SendError<Cmd>> {
        self.command_tx.send(cmd)
    }

    /// Check if the service is still running
    pub fn is_running(&self) -> bool {
        self.thread_handle
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }

    /// Wait for the service thread to exit
    pub fn join(mut self) {
        if let Some(handle) = self.thread_handle.take() {
            if handle.join().is_err() {
                log::error!("Service thread panicked");
            }
        }
    }
}

/// Events queued before producers start dropping them
pub const EVENT_BUS_CAPACITY: usize = 1024;

/// Bounded event queue between services and the application
///
/// Each event is delivered once. Receivers returned by [`EventBus::subscribe`]
/// share the queue and compete for events, so the application runs a single
/// consumer.
pub struct EventBus {
    sender: crossbeam::channel::Sender<AppEvent>,
    receiver: crossbeam::channel::Receiver<AppEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = crossbeam::channel::bounded(capacity);
        Self { sender, receiver }
    }

    /// Sender handed to a service
    pub fn sender(&self) -> crossbeam::channel::Sender<AppEvent> {
        self.sender.clone()
    }

    /// Receiving end of the queue
    pub fn subscribe(&self) -> crossbeam::channel::Receiver<AppEvent> {
        self.receiver.clone()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(EVENT_BUS_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_bus_delivers_each_event_once() {
        let bus = EventBus::new(2);
        let first = bus.subscribe();
        let second = bus.subscribe();
        let tx = bus.sender();

        tx.send(AppEvent::MoodChanged {
            from: None,
            to: Mood::Happy,
        })
        .unwrap();

        assert_eq!(
            first.try_recv().unwrap(),
            AppEvent::MoodChanged {
                from: None,
                to: Mood::Happy
            }
        );
        assert!(second.try_recv().is_err());
    }

    #[test]
    fn test_event_bus_is_bounded() {
        let bus = EventBus::new(1);
        let tx = bus.sender();
        tx.try_send(AppEvent::ResultDiscarded).unwrap();
        assert!(tx.try_send(AppEvent::ResultDiscarded).unwrap_err().is_full());
    }

    #[test]
    fn test_stop_signal_is_shared() {
        let signal = StopSignal::new();
        let clone = signal.clone();
        assert!(!clone.is_raised());
        signal.raise();
        assert!(clone.is_raised());
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(SkipReason::NoFace.to_string(), "no face");
        assert_eq!(
            SkipReason::MalformedLandmarks("left_eye".into()).to_string(),
            "malformed landmarks: left_eye"
        );
    }
}
