//! Landmark detectors
//!
//! A [`LandmarkDetector`] is the face-tracking collaborator seen from the
//! detection loop: each call yields the landmarks of the current frame, or
//! nothing when no face is visible.
//!
//! - [`ReplayDetector`] replays a recorded session (headless runs, tests)
//! - [`WorkerDetector`] runs a [`FrameAnalyzer`] on its own thread, fed
//!   through a [`FrameSubmitter`] that drops frames while a result is
//!   outstanding
//! - [`Backoff`] is the retry schedule the loop applies to failures

mod backoff;
mod replay;
mod worker;

pub use backoff::{Backoff, RetryStep};
pub use replay::{ReplayDetector, ReplayFrame, ReplaySession};
pub use worker::{FrameAnalyzer, FrameSubmitter, WorkerDetector};

use crate::features::LandmarkSet;
use thiserror::Error;

/// Errors from a landmark detector
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectorError {
    /// Transient failure; the loop retries with backoff
    #[error("Landmark detector unavailable: {0}")]
    Unavailable(String),

    /// The detector will never produce another frame
    #[error("Landmark detector disconnected")]
    Disconnected,
}

/// Result type for detector operations
pub type DetectorResult<T> = Result<T, DetectorError>;

/// Source of per-frame facial landmarks
pub trait LandmarkDetector: Send {
    /// Landmarks for the current frame, `Ok(None)` when no face was found
    fn detect(&mut self) -> DetectorResult<Option<LandmarkSet>>;
}

impl<D: LandmarkDetector + ?Sized> LandmarkDetector for Box<D> {
    fn detect(&mut self) -> DetectorResult<Option<LandmarkSet>> {
        (**self).detect()
    }
}
