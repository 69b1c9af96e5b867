//! Recorded landmark sessions
//!
//! A session file is a YAML document:
//!
//! ```yaml
//! looping: false
//! frames:
//!   - landmarks:
//!       left_eye: [[0.30, 0.40], [0.31, 0.38], ...]
//!       ...
//!   - {}                        # no face this frame
//!   - error: camera busy        # scripted detector failure
//! ```

use super::{DetectorError, DetectorResult, LandmarkDetector};
use crate::features::LandmarkSet;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One recorded frame
///
/// An `error` takes precedence over `landmarks`; a frame with neither means
/// no face was visible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayFrame {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landmarks: Option<LandmarkSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReplayFrame {
    pub fn face(landmarks: LandmarkSet) -> Self {
        Self {
            landmarks: Some(landmarks),
            error: None,
        }
    }

    pub fn no_face() -> Self {
        Self::default()
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            landmarks: None,
            error: Some(message.into()),
        }
    }

    fn to_result(&self) -> DetectorResult<Option<LandmarkSet>> {
        match &self.error {
            Some(message) => Err(DetectorError::Unavailable(message.clone())),
            None => Ok(self.landmarks.clone()),
        }
    }
}

/// Serialized form of a replay
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplaySession {
    pub looping: bool,
    pub frames: Vec<ReplayFrame>,
}

/// Detector that plays back recorded frames in order
///
/// Once a non-looping replay runs out it reports
/// [`DetectorError::Disconnected`]; an empty replay is disconnected from the
/// start even when looping.
#[derive(Debug, Clone)]
pub struct ReplayDetector {
    frames: Vec<ReplayFrame>,
    looping: bool,
    position: usize,
}

impl ReplayDetector {
    pub fn new(frames: Vec<ReplayFrame>) -> Self {
        Self {
            frames,
            looping: false,
            position: 0,
        }
    }

    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn from_session(session: ReplaySession) -> Self {
        Self::new(session.frames).looping(session.looping)
    }

    /// Load a session file
    pub fn load(path: &Path) -> Result<Self> {
        log::info!("ReplayDetector: Loading session from {:?}", path);

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read session: {:?}", path))?;
        let session: ReplaySession = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse session: {:?}", path))?;

        log::info!(
            "ReplayDetector: {} frames (looping: {})",
            session.frames.len(),
            session.looping
        );
        Ok(Self::from_session(session))
    }

    /// Frames left before the replay ends or wraps
    pub fn remaining(&self) -> usize {
        self.frames.len().saturating_sub(self.position)
    }
}

impl LandmarkDetector for ReplayDetector {
    fn detect(&mut self) -> DetectorResult<Option<LandmarkSet>> {
        if self.position >= self.frames.len() {
            if !self.looping || self.frames.is_empty() {
                return Err(DetectorError::Disconnected);
            }
            self.position = 0;
        }

        let result = self.frames[self.position].to_result();
        self.position += 1;
        result
    }
}
