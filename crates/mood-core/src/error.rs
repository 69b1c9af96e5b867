//! Crate-wide error umbrella
//!
//! Each concern keeps its own error enum next to the code that raises it.
//! [`MoodError`] wraps them for callers that handle errors uniformly and
//! grades each one with a [`Severity`] for user-facing reporting.

use crate::detector::DetectorError;
use crate::features::FeatureError;
use crate::ingest::IngestError;
use crate::playback::PlaybackError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How seriously an error should be surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Expected condition, nothing to report
    Info,
    /// Recoverable; the current frame or upload is dropped
    Warning,
    /// A collaborator is failing; the system keeps running degraded
    Error,
    /// The system cannot continue
    Fatal,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        };
        f.write_str(name)
    }
}

/// Any error raised by the mood pipeline
#[derive(Error, Debug)]
pub enum MoodError {
    #[error(transparent)]
    Feature(#[from] FeatureError),

    #[error(transparent)]
    Detector(#[from] DetectorError),

    #[error(transparent)]
    Playback(#[from] PlaybackError),

    #[error(transparent)]
    Ingest(#[from] IngestError),
}

impl MoodError {
    pub fn severity(&self) -> Severity {
        match self {
            MoodError::Feature(_) => Severity::Warning,
            MoodError::Detector(_) => Severity::Error,
            MoodError::Playback(_) => Severity::Info,
            MoodError::Ingest(_) => Severity::Warning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FaceRegion;

    #[test]
    fn test_severity_grading() {
        let malformed: MoodError = FeatureError::MalformedLandmarks {
            region: FaceRegion::LeftEye,
            required: 8,
            found: 3,
        }
        .into();
        assert_eq!(malformed.severity(), Severity::Warning);

        let empty: MoodError = PlaybackError::EmptyPlaylist.into();
        assert_eq!(empty.severity(), Severity::Info);

        let unavailable: MoodError = DetectorError::Unavailable("camera busy".into()).into();
        assert_eq!(unavailable.severity(), Severity::Error);

        let oversize: MoodError = IngestError::FileTooLarge {
            file_name: "big.flac".into(),
            size_bytes: 60_000_000,
            max_bytes: 50_000_000,
        }
        .into();
        assert_eq!(oversize.severity(), Severity::Warning);
    }

    #[test]
    fn test_nothing_in_core_is_fatal() {
        let errors: Vec<MoodError> = vec![
            DetectorError::Disconnected.into(),
            IngestError::EmptyFileName.into(),
            PlaybackError::IndexOutOfRange { index: 4, len: 2 }.into(),
        ];
        assert!(errors.iter().all(|e| e.severity() < Severity::Fatal));
    }

    #[test]
    fn test_transparent_messages() {
        let err: MoodError = PlaybackError::EmptyPlaylist.into();
        assert_eq!(err.to_string(), "Current playlist is empty");
    }
}
