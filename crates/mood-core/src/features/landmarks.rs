//! Landmark sets grouped by facial region
//!
//! Regions follow the face-mesh annotation groups the detector exposes. Points
//! are expected in normalized image coordinates (`0.0..=1.0`, `y` grows
//! downwards).

use super::error::{FeatureError, FeatureResult};
use crate::geometry::Point2D;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Upper eyelid point within an eye region
pub const EYELID_UPPER: usize = 1;
/// Lower eyelid point within an eye region
pub const EYELID_LOWER: usize = 7;

/// Left mouth corner within the upper-lip outline
pub const MOUTH_CORNER_LEFT: usize = 0;
/// Upper-lip midpoint within the upper-lip outline
pub const MOUTH_MIDPOINT: usize = 5;
/// Right mouth corner within the upper-lip outline
pub const MOUTH_CORNER_RIGHT: usize = 10;

/// Anatomical regions used for mood features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaceRegion {
    LeftEye,
    RightEye,
    LipsUpperOuter,
    LeftEyebrowUpper,
    RightEyebrowUpper,
}

impl FaceRegion {
    pub const ALL: [FaceRegion; 5] = [
        FaceRegion::LeftEye,
        FaceRegion::RightEye,
        FaceRegion::LipsUpperOuter,
        FaceRegion::LeftEyebrowUpper,
        FaceRegion::RightEyebrowUpper,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FaceRegion::LeftEye => "left_eye",
            FaceRegion::RightEye => "right_eye",
            FaceRegion::LipsUpperOuter => "lips_upper_outer",
            FaceRegion::LeftEyebrowUpper => "left_eyebrow_upper",
            FaceRegion::RightEyebrowUpper => "right_eyebrow_upper",
        }
    }

    /// Minimum number of points the extractor reads from this region
    pub fn required_points(&self) -> usize {
        match self {
            FaceRegion::LeftEye | FaceRegion::RightEye => EYELID_LOWER + 1,
            FaceRegion::LipsUpperOuter => MOUTH_CORNER_RIGHT + 1,
            FaceRegion::LeftEyebrowUpper | FaceRegion::RightEyebrowUpper => 1,
        }
    }
}

impl std::fmt::Display for FaceRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Facial keypoints for one detection frame, keyed by region
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkSet {
    regions: BTreeMap<FaceRegion, Vec<Point2D>>,
}

impl LandmarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style region insertion
    pub fn with_region(mut self, region: FaceRegion, points: Vec<Point2D>) -> Self {
        self.regions.insert(region, points);
        self
    }

    pub fn insert(&mut self, region: FaceRegion, points: Vec<Point2D>) {
        self.regions.insert(region, points);
    }

    /// Points of a region, if supplied
    pub fn region(&self, region: FaceRegion) -> Option<&[Point2D]> {
        self.regions.get(&region).map(Vec::as_slice)
    }

    /// Points of a region, validated against the extractor's fixed indices
    pub fn require(&self, region: FaceRegion) -> FeatureResult<&[Point2D]> {
        let points = self
            .region(region)
            .ok_or(FeatureError::MissingRegion { region })?;

        let required = region.required_points();
        if points.len() < required {
            return Err(FeatureError::MalformedLandmarks {
                region,
                required,
                found: points.len(),
            });
        }
        Ok(points)
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
