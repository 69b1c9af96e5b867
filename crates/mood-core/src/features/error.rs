//! Feature extraction error types

use super::landmarks::FaceRegion;
use thiserror::Error;

/// Errors that can occur while reducing landmarks to features
///
/// Either variant means the frame should be skipped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeatureError {
    /// A region the extractor needs was not supplied
    #[error("Landmark region missing: {region}")]
    MissingRegion { region: FaceRegion },

    /// A region has fewer points than the fixed landmark indices require
    #[error("Malformed landmarks: {region} has {found} points, need at least {required}")]
    MalformedLandmarks {
        region: FaceRegion,
        required: usize,
        found: usize,
    },
}

/// Result type for feature extraction
pub type FeatureResult<T> = Result<T, FeatureError>;
