//! Facial feature extraction
//!
//! Reduces a detector's [`LandmarkSet`] to the three scalars the mood
//! classifier scores:
//!
//! - **eye openness**: mean upper/lower eyelid distance over both eyes
//! - **mouth curvature**: curvature of the lip-corner / upper-lip-midpoint triangle
//! - **brow position**: mean vertical coordinate over both upper brow outlines

mod error;
mod extraction;
mod landmarks;

pub use error::{FeatureError, FeatureResult};
pub use extraction::{brow_position, extract_features, eye_openness, mouth_curvature};
pub use landmarks::{FaceRegion, LandmarkSet};

#[cfg(test)]
pub(crate) use extraction::tests::face as test_face;
