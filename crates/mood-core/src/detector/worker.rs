//! Threaded frame analysis
//!
//! ```text
//!   FrameSubmitter::submit(frame) ──► [frame slot] ──► worker: analyzer.analyze(frame)
//!        │ dropped while a result is outstanding             │
//!        │ or faster than min_frame_interval                 ▼
//!   WorkerDetector::detect()  ◄────────────────────── [result slot]
//! ```
//!
//! A frame stays outstanding from the moment it is accepted until `detect()`
//! takes its result, so at most one frame or result exists at a time and a
//! slow consumer sheds frames instead of reading stale results.
//!
//! The detector itself is handed to the detection service; capture code keeps
//! a [`FrameSubmitter`] (cheap to clone) to feed it.

use super::{DetectorError, DetectorResult, LandmarkDetector};
use crate::config::DetectionConfig;
use crate::features::LandmarkSet;
use crossbeam::channel::{Receiver, Sender, TryRecvError};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Turns a captured frame into landmarks
pub trait FrameAnalyzer: Send + 'static {
    type Frame: Send + 'static;

    fn analyze(&mut self, frame: Self::Frame) -> DetectorResult<Option<LandmarkSet>>;
}

/// Producer side of a [`WorkerDetector`]
///
/// Clones share the outstanding-frame flag and the frame rate cap.
pub struct FrameSubmitter<F> {
    frame_tx: Sender<F>,
    in_flight: Arc<AtomicBool>,
    min_frame_interval: Duration,
    last_submit: Arc<Mutex<Option<Instant>>>,
}

impl<F> Clone for FrameSubmitter<F> {
    fn clone(&self) -> Self {
        Self {
            frame_tx: self.frame_tx.clone(),
            in_flight: Arc::clone(&self.in_flight),
            min_frame_interval: self.min_frame_interval,
            last_submit: Arc::clone(&self.last_submit),
        }
    }
}

impl<F> FrameSubmitter<F> {
    /// Offer a frame to the analyzer
    ///
    /// Returns false when the frame was dropped: a previous frame or its
    /// unread result is outstanding, the frame arrived sooner than the minimum
    /// interval, or the worker has stopped.
    pub fn submit(&self, frame: F) -> bool {
        let mut last_submit = self.last_submit.lock().unwrap_or_else(|e| e.into_inner());

        let now = Instant::now();
        if let Some(last) = *last_submit {
            if now.duration_since(last) < self.min_frame_interval {
                log::trace!("FrameSubmitter: Dropping frame, over frame rate cap");
                return false;
            }
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            log::trace!("FrameSubmitter: Dropping frame, previous result outstanding");
            return false;
        }

        if self.frame_tx.try_send(frame).is_err() {
            log::debug!("FrameSubmitter: Worker stopped, dropping frame");
            self.in_flight.store(false, Ordering::Release);
            return false;
        }

        *last_submit = Some(now);
        true
    }

    /// Whether a submitted frame has not been consumed by `detect()` yet
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Detector backed by a [`FrameAnalyzer`] on a background thread
pub struct WorkerDetector<A: FrameAnalyzer> {
    submitter: FrameSubmitter<A::Frame>,
    result_rx: Receiver<DetectorResult<Option<LandmarkSet>>>,
    shutdown_tx: Option<Sender<()>>,
    thread_handle: Option<JoinHandle<()>>,
    _analyzer: PhantomData<fn() -> A>,
}

impl<A: FrameAnalyzer> WorkerDetector<A> {
    /// Start the analyzer thread
    pub fn spawn(mut analyzer: A, min_frame_interval: Duration) -> DetectorResult<Self> {
        let (frame_tx, frame_rx) = crossbeam::channel::bounded::<A::Frame>(1);
        let (result_tx, result_rx) = crossbeam::channel::bounded(1);
        let (shutdown_tx, shutdown_rx) = crossbeam::channel::bounded::<()>(0);

        let handle = thread::Builder::new()
            .name("landmark-worker".into())
            .spawn(move || {
                log::debug!("WorkerDetector: Analyzer thread started");
                loop {
                    crossbeam::select! {
                        recv(frame_rx) -> frame => {
                            let Ok(frame) = frame else { break };
                            // Never blocks: the result slot is free while a frame is outstanding
                            if result_tx.send(analyzer.analyze(frame)).is_err() {
                                break;
                            }
                        }
                        recv(shutdown_rx) -> _ => break,
                    }
                }
                log::debug!("WorkerDetector: Analyzer thread stopped");
            })
            .map_err(|e| {
                DetectorError::Unavailable(format!("Failed to spawn analyzer thread: {}", e))
            })?;

        Ok(Self {
            submitter: FrameSubmitter {
                frame_tx,
                in_flight: Arc::new(AtomicBool::new(false)),
                min_frame_interval,
                last_submit: Arc::new(Mutex::new(None)),
            },
            result_rx,
            shutdown_tx: Some(shutdown_tx),
            thread_handle: Some(handle),
            _analyzer: PhantomData,
        })
    }

    /// Start the analyzer thread with the configured frame rate cap
    pub fn from_config(analyzer: A, config: &DetectionConfig) -> DetectorResult<Self> {
        Self::spawn(analyzer, config.min_frame_interval())
    }

    /// Handle for feeding frames once the detector is owned by the service
    pub fn submitter(&self) -> FrameSubmitter<A::Frame> {
        self.submitter.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.submitter.is_busy()
    }
}

impl<A: FrameAnalyzer> LandmarkDetector for WorkerDetector<A> {
    fn detect(&mut self) -> DetectorResult<Option<LandmarkSet>> {
        match self.result_rx.try_recv() {
            Ok(result) => {
                self.submitter.in_flight.store(false, Ordering::Release);
                result
            }
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(DetectorError::Disconnected),
        }
    }
}

impl<A: FrameAnalyzer> Drop for WorkerDetector<A> {
    fn drop(&mut self) {
        self.shutdown_tx.take();
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}
