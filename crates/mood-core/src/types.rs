//! Common types for Mood Player
//!
//! This module contains the mood vocabulary and the per-frame values that flow
//! from the feature extractor through the classifier to the history log and
//! the playback engine.

use serde::{Deserialize, Serialize};

/// Number of mood hypotheses evaluated by the classifier (every mood but Neutral)
pub const NUM_HYPOTHESES: usize = 5;

/// Confidence a hypothesis must exceed to be reported
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.7;

/// Maximum number of entries kept by the mood history log
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Mood labels
///
/// Declaration order is the classifier's tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Energetic,
    Relaxed,
    Focused,
    Neutral,
}

impl Mood {
    /// All moods in declaration order
    pub const ALL: [Mood; 6] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Energetic,
        Mood::Relaxed,
        Mood::Focused,
        Mood::Neutral,
    ];

    /// Moods that have a classifier hypothesis, in tie-break order
    pub const DETECTABLE: [Mood; NUM_HYPOTHESES] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Energetic,
        Mood::Relaxed,
        Mood::Focused,
    ];

    /// Get the display name of this mood
    pub fn name(&self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Sad => "Sad",
            Mood::Energetic => "Energetic",
            Mood::Relaxed => "Relaxed",
            Mood::Focused => "Focused",
            Mood::Neutral => "Neutral",
        }
    }

    /// Parse a mood name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|mood| mood.name().eq_ignore_ascii_case(s))
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The three geometric features scored by the classifier
///
/// Values coming out of the extractor are raw geometry and may fall outside
/// `[0, 1]`; use [`FeatureVector::clamped`] before scoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub eye_openness: f32,
    pub mouth_curvature: f32,
    pub brow_position: f32,
}

impl FeatureVector {
    /// Create a new feature vector
    pub fn new(eye_openness: f32, mouth_curvature: f32, brow_position: f32) -> Self {
        Self {
            eye_openness,
            mouth_curvature,
            brow_position,
        }
    }

    /// Clamp every feature to `[0, 1]`
    ///
    /// NaN features clamp to 0.
    pub fn clamped(&self) -> Self {
        Self {
            eye_openness: clamp_unit(self.eye_openness),
            mouth_curvature: clamp_unit(self.mouth_curvature),
            brow_position: clamp_unit(self.brow_position),
        }
    }
}

/// Clamp a value to `[0, 1]`, mapping NaN to 0
#[inline]
pub fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Outcome of one classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoodResult {
    pub mood: Mood,
    /// Confidence in `[0, 1]`; 0 for Neutral
    pub confidence: f32,
}

impl MoodResult {
    /// Result reported when no hypothesis clears the threshold
    pub const NEUTRAL: MoodResult = MoodResult {
        mood: Mood::Neutral,
        confidence: 0.0,
    };

    pub fn new(mood: Mood, confidence: f32) -> Self {
        Self {
            mood,
            confidence: clamp_unit(confidence),
        }
    }

    /// Confidence as a whole percentage for display
    pub fn confidence_percent(&self) -> u8 {
        (self.confidence * 100.0).round() as u8
    }
}
