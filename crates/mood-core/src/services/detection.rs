//! DetectionService - periodic mood detection driving playback
//!
//! Every pass pulls one frame from the [`LandmarkDetector`], reduces it to
//! features, classifies it, records the result and, when the mood differs
//! from the playback engine's active mood, switches playlists. The pass runs
//! inline on the service thread, so passes never overlap and the history log
//! and playback engine have a single owner.
//!
//! ```text
//!   commands ──► select! ─┬─ Ingest / Playback / Get* ──► engine, history
//!                         └─ default(next pass) ──► detect ─► extract ─► classify
//!                                                                  │
//!                                            history.record ◄──────┤
//!                                    engine.on_mood_changed ◄──────┘ (mood differs)
//! ```

use super::messages::{AppEvent, DetectionCommand, ServiceHandle, SkipReason, StopSignal};
use crate::classifier::MoodClassifier;
use crate::config::{DetectionConfig, MoodConfig};
use crate::detector::{Backoff, DetectorError, LandmarkDetector, RetryStep};
use crate::features::{extract_features, LandmarkSet};
use crate::history::{MoodHistory, MoodHistoryEntry};
use crate::playback::{PlaybackCommand, PlaybackControl, PlaybackEngine, PlaybackState, Track};
use crossbeam::channel::{Receiver, Sender, TrySendError};
use rand::rngs::StdRng;
use rand::Rng;
use std::thread;
use std::time::{Duration, Instant};

const SERVICE_NAME: &str = "DetectionService";

/// What the loop does after a pass
enum PassOutcome {
    /// Run the next pass after this delay
    Continue(Duration),
    Stop,
}

/// DetectionService owns the detector, history log and playback engine
pub struct DetectionService<D, R = StdRng> {
    command_rx: Receiver<DetectionCommand>,
    event_tx: Sender<AppEvent>,
    stop_signal: StopSignal,
    detector: D,
    engine: PlaybackEngine<R>,
    classifier: MoodClassifier,
    history: MoodHistory,
    backoff: Backoff,
    config: DetectionConfig,
}

impl<D, R> DetectionService<D, R>
where
    D: LandmarkDetector + 'static,
    R: Rng + Send + 'static,
{
    /// Spawn the detection loop in a background thread
    ///
    /// Fails when detection is disabled in `config`.
    pub fn spawn(
        detector: D,
        engine: PlaybackEngine<R>,
        config: &MoodConfig,
        event_tx: Sender<AppEvent>,
    ) -> Result<ServiceHandle<DetectionCommand>, String> {
        if !config.detection.enabled {
            return Err("Face detection is disabled in config".to_string());
        }

        let (command_tx, command_rx) = crossbeam::channel::unbounded();
        let stop_signal = StopSignal::new();

        let service = DetectionService {
            command_rx,
            event_tx,
            stop_signal: stop_signal.clone(),
            detector,
            engine,
            classifier: config.detection.classifier(),
            history: config.history.history(),
            backoff: Backoff::from_config(&config.detection),
            config: config.detection.clone(),
        };

        let handle = thread::Builder::new()
            .name("mood-detection-service".into())
            .spawn(move || {
                service.run();
            })
            .map_err(|e| format!("Failed to spawn detection service thread: {}", e))?;

        Ok(ServiceHandle {
            command_tx,
            thread_handle: Some(handle),
            stop_signal,
        })
    }

    /// Main service loop
    fn run(mut self) {
        log::info!(
            "DetectionService started (interval {:?}, threshold {})",
            self.config.interval(),
            self.classifier.threshold()
        );
        self.emit(AppEvent::ServiceStarted {
            service_name: SERVICE_NAME.to_string(),
        });

        let mut next_pass = Instant::now();

        while !self.stop_signal.is_raised() {
            let wait = next_pass.saturating_duration_since(Instant::now());

            crossbeam::select! {
                recv(self.command_rx) -> cmd => {
                    match cmd {
                        Ok(DetectionCommand::Stop) => {
                            log::info!("DetectionService shutting down");
                            break;
                        }
                        Ok(cmd) => self.handle_command(cmd),
                        Err(_) => {
                            log::info!("Command channel closed, shutting down");
                            break;
                        }
                    }
                }
                default(wait) => {
                    match self.run_pass() {
                        PassOutcome::Continue(delay) => next_pass = Instant::now() + delay,
                        PassOutcome::Stop => break,
                    }
                }
            }
        }

        self.emit(AppEvent::ServiceStopped {
            service_name: SERVICE_NAME.to_string(),
        });
        log::info!("DetectionService stopped");
    }

    /// Handle a command
    fn handle_command(&mut self, cmd: DetectionCommand) {
        match cmd {
            DetectionCommand::Ingest(track) => {
                self.engine.ingest(track);
            }

            DetectionCommand::Playback(control) => {
                log::debug!("DetectionService: Playback control {:?}", control);
                let command = self.engine.apply(control);
                self.forward(command);
                self.emit(AppEvent::PlaybackStateChanged(self.engine.state().clone()));
            }

            DetectionCommand::GetHistory { reply } => {
                let _ = reply.send(self.history.snapshot());
            }

            DetectionCommand::GetPlaybackState { reply } => {
                let _ = reply.send(self.engine.state().clone());
            }

            DetectionCommand::Stop => {
                // Handled in main loop
            }
        }
    }

    /// One detection pass
    fn run_pass(&mut self) -> PassOutcome {
        let detected = self.detector.detect();

        if self.stop_signal.is_raised() {
            log::debug!("DetectionService: Stop requested during pass, discarding result");
            self.emit(AppEvent::ResultDiscarded);
            return PassOutcome::Stop;
        }

        match detected {
            Ok(frame) => {
                if self.backoff.reset() {
                    log::info!("DetectionService: Detector recovered");
                    self.emit(AppEvent::DetectorRecovered);
                }

                match frame {
                    Some(landmarks) => self.process_landmarks(&landmarks),
                    None => {
                        log::debug!("DetectionService: No face in frame");
                        self.emit(AppEvent::FrameSkipped {
                            reason: SkipReason::NoFace,
                        });
                    }
                }
                PassOutcome::Continue(self.config.interval())
            }

            Err(DetectorError::Disconnected) => {
                log::warn!("DetectionService: Detector disconnected, stopping");
                self.emit(AppEvent::DetectorDisconnected);
                PassOutcome::Stop
            }

            Err(DetectorError::Unavailable(reason)) => match self.backoff.on_failure() {
                RetryStep::Retry { attempt, delay } => {
                    log::warn!(
                        "DetectionService: Detector unavailable ({}), retry {} in {:?}",
                        reason,
                        attempt,
                        delay
                    );
                    self.emit(AppEvent::DetectorRetrying { attempt, delay });
                    PassOutcome::Continue(delay)
                }
                RetryStep::Exhausted {
                    consecutive_failures,
                } => {
                    log::warn!(
                        "DetectionService: Detector unavailable ({}), {} consecutive failures",
                        reason,
                        consecutive_failures
                    );
                    self.emit(AppEvent::DetectorFailing {
                        consecutive_failures,
                    });
                    PassOutcome::Continue(self.config.degraded_interval())
                }
            },
        }
    }

    /// Extract, classify, record and react to one landmark set
    fn process_landmarks(&mut self, landmarks: &LandmarkSet) {
        let features = match extract_features(landmarks) {
            Ok(features) => features,
            Err(e) => {
                log::warn!("DetectionService: Skipping frame: {}", e);
                self.emit(AppEvent::FrameSkipped {
                    reason: SkipReason::MalformedLandmarks(e.to_string()),
                });
                return;
            }
        };

        let result = self.classifier.classify(&features);
        log::debug!(
            "DetectionService: {:?} -> {} ({}%)",
            features,
            result.mood,
            result.confidence_percent()
        );

        self.history.record(result);
        self.emit(AppEvent::MoodDetected(result));

        let active = self.engine.state().active_mood;
        if active == Some(result.mood) {
            return;
        }

        log::info!("DetectionService: Mood changed {:?} -> {}", active, result.mood);
        self.emit(AppEvent::MoodChanged {
            from: active,
            to: result.mood,
        });

        let command = self.engine.on_mood_changed(result.mood);
        self.forward(command);
        self.emit(AppEvent::PlaybackStateChanged(self.engine.state().clone()));
    }

    /// Publish a playback instruction for the audio output
    fn forward(&mut self, command: Option<PlaybackCommand>) {
        let Some(command) = command else {
            return;
        };

        if command.track().is_some() {
            self.history.note_track_played();
        }
        self.emit(AppEvent::Playback(command));
    }

    fn emit(&self, event: AppEvent) {
        match self.event_tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                log::warn!("DetectionService: Event bus full, dropping {:?}", event);
            }
            Err(TrySendError::Disconnected(_)) => {}
        }
    }
}

/// Client for interacting with the DetectionService
pub struct DetectionClient {
    command_tx: Sender<DetectionCommand>,
    stop_signal: StopSignal,
}

impl DetectionClient {
    /// Create a new client from a service handle
    pub fn new(handle: &ServiceHandle<DetectionCommand>) -> Self {
        Self {
            command_tx: handle.command_tx.clone(),
            stop_signal: handle.stop_signal.clone(),
        }
    }

    /// Stop the service
    ///
    /// A pass already in progress finishes but its result is discarded.
    pub fn stop(&self) -> Result<(), String> {
        self.stop_signal.raise();
        self.command_tx
            .send(DetectionCommand::Stop)
            .map_err(|e| e.to_string())
    }

    /// Add a track to the catalog
    pub fn ingest(&self, track: Track) -> Result<(), String> {
        self.command_tx
            .send(DetectionCommand::Ingest(track))
            .map_err(|e| e.to_string())
    }

    /// Apply a playback control
    pub fn control(&self, control: PlaybackControl) -> Result<(), String> {
        self.command_tx
            .send(DetectionCommand::Playback(control))
            .map_err(|e| e.to_string())
    }

    /// Get the mood history, newest first (blocking)
    pub fn history(&self) -> Result<Vec<MoodHistoryEntry>, String> {
        let (tx, rx) = tokio::sync::oneshot::channel();
        self.command_tx
            .send(DetectionCommand::GetHistory { reply: tx })
            .map_err(|e| e.to_string())?;

        rx.blocking_recv().map_err(|e| e.to_string())
    }

    /// Get the playback state (blocking)
    pub fn playback_state(&self) -> Result<PlaybackState, String> {
        let (tx, rx) = tokio::sync::oneshot::channel();
        self.command_tx
            .send(DetectionCommand::GetPlaybackState { reply: tx })
            .map_err(|e| e.to_string())?;

        rx.blocking_recv().map_err(|e| e.to_string())
    }
}
