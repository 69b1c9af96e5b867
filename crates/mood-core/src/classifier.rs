//! Rule-based mood classifier
//!
//! Each detectable mood is a hypothesis: a boolean condition over the clamped
//! features plus a feature weighting. A hypothesis scores the weighted sum of
//! the features, at full value when its condition holds and at half value
//! otherwise. The best score above the threshold wins; ties go to the
//! hypothesis declared first in [`HYPOTHESES`].

use crate::types::{FeatureVector, Mood, MoodResult, DEFAULT_CONFIDENCE_THRESHOLD, NUM_HYPOTHESES};

/// Score multiplier applied when a hypothesis' condition does not hold
pub const PARTIAL_CREDIT: f32 = 0.5;

/// Per-feature weights of a hypothesis score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureWeights {
    pub eye_openness: f32,
    pub mouth_curvature: f32,
    pub brow_position: f32,
}

impl FeatureWeights {
    /// Weighting shared by every hypothesis
    pub const STANDARD: FeatureWeights = FeatureWeights {
        eye_openness: 0.3,
        mouth_curvature: 0.4,
        brow_position: 0.3,
    };

    /// Weighted sum of (already clamped) features
    pub fn apply(&self, features: &FeatureVector) -> f32 {
        features.eye_openness * self.eye_openness
            + features.mouth_curvature * self.mouth_curvature
            + features.brow_position * self.brow_position
    }
}

/// One row of the decision table
#[derive(Clone, Copy)]
pub struct Hypothesis {
    pub mood: Mood,
    pub condition: fn(&FeatureVector) -> bool,
    pub weights: FeatureWeights,
}

impl std::fmt::Debug for Hypothesis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hypothesis")
            .field("mood", &self.mood)
            .field("weights", &self.weights)
            .finish_non_exhaustive()
    }
}

impl Hypothesis {
    /// Confidence of this hypothesis for clamped features
    pub fn score(&self, features: &FeatureVector) -> HypothesisScore {
        let holds = (self.condition)(features);
        let factor = if holds { 1.0 } else { PARTIAL_CREDIT };
        HypothesisScore {
            mood: self.mood,
            condition_met: holds,
            confidence: (self.weights.apply(features) * factor).clamp(0.0, 1.0),
        }
    }
}

/// Evaluation of a single hypothesis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HypothesisScore {
    pub mood: Mood,
    pub condition_met: bool,
    pub confidence: f32,
}

fn happy(f: &FeatureVector) -> bool {
    f.mouth_curvature > 0.6 && f.brow_position > 0.5
}

fn sad(f: &FeatureVector) -> bool {
    f.mouth_curvature < 0.4 && f.brow_position < 0.4
}

fn energetic(f: &FeatureVector) -> bool {
    f.eye_openness > 0.7 && f.mouth_curvature > 0.5
}

fn relaxed(f: &FeatureVector) -> bool {
    f.eye_openness < 0.5 && f.mouth_curvature > 0.4
}

fn focused(f: &FeatureVector) -> bool {
    f.eye_openness > 0.6 && (f.brow_position - 0.5).abs() < 0.1
}

/// The decision table, in tie-break order
pub const HYPOTHESES: [Hypothesis; NUM_HYPOTHESES] = [
    Hypothesis {
        mood: Mood::Happy,
        condition: happy,
        weights: FeatureWeights::STANDARD,
    },
    Hypothesis {
        mood: Mood::Sad,
        condition: sad,
        weights: FeatureWeights::STANDARD,
    },
    Hypothesis {
        mood: Mood::Energetic,
        condition: energetic,
        weights: FeatureWeights::STANDARD,
    },
    Hypothesis {
        mood: Mood::Relaxed,
        condition: relaxed,
        weights: FeatureWeights::STANDARD,
    },
    Hypothesis {
        mood: Mood::Focused,
        condition: focused,
        weights: FeatureWeights::STANDARD,
    },
];

/// Mood classifier with a configurable acceptance threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoodClassifier {
    threshold: f32,
}

impl Default for MoodClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIDENCE_THRESHOLD)
    }
}

impl MoodClassifier {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Score every hypothesis against the clamped features
    pub fn score_all(&self, features: &FeatureVector) -> [HypothesisScore; NUM_HYPOTHESES] {
        let clamped = features.clamped();
        HYPOTHESES.map(|hypothesis| hypothesis.score(&clamped))
    }

    /// Classify a feature vector
    ///
    /// Returns [`MoodResult::NEUTRAL`] when no hypothesis exceeds the threshold.
    pub fn classify(&self, features: &FeatureVector) -> MoodResult {
        let mut best = MoodResult::NEUTRAL;

        for score in self.score_all(features) {
            if score.confidence > best.confidence && score.confidence > self.threshold {
                best = MoodResult::new(score.mood, score.confidence);
            }
        }

        best
    }
}

/// Classify with the default threshold
pub fn classify(features: &FeatureVector) -> MoodResult {
    MoodClassifier::default().classify(features)
}
