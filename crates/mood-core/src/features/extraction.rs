//! Geometric feature extraction

use super::error::FeatureResult;
use super::landmarks::{
    FaceRegion, LandmarkSet, EYELID_LOWER, EYELID_UPPER, MOUTH_CORNER_LEFT, MOUTH_CORNER_RIGHT,
    MOUTH_MIDPOINT,
};
use crate::geometry::{mean, triangle_curvature};
use crate::types::FeatureVector;

/// Reduce a landmark set to the classifier's feature vector
///
/// Returns raw (unclamped) geometry. Fails without side effects when a
/// required region is absent or too short.
pub fn extract_features(landmarks: &LandmarkSet) -> FeatureResult<FeatureVector> {
    Ok(FeatureVector {
        eye_openness: eye_openness(landmarks)?,
        mouth_curvature: mouth_curvature(landmarks)?,
        brow_position: brow_position(landmarks)?,
    })
}

/// Mean eyelid gap over both eyes
pub fn eye_openness(landmarks: &LandmarkSet) -> FeatureResult<f32> {
    let left = landmarks.require(FaceRegion::LeftEye)?;
    let right = landmarks.require(FaceRegion::RightEye)?;

    let left_height = left[EYELID_UPPER].distance(&left[EYELID_LOWER]);
    let right_height = right[EYELID_UPPER].distance(&right[EYELID_LOWER]);

    Ok((left_height + right_height) / 2.0)
}

/// Curvature of the mouth corners / upper-lip midpoint triangle
pub fn mouth_curvature(landmarks: &LandmarkSet) -> FeatureResult<f32> {
    let lips = landmarks.require(FaceRegion::LipsUpperOuter)?;

    Ok(triangle_curvature(
        &lips[MOUTH_CORNER_LEFT],
        &lips[MOUTH_MIDPOINT],
        &lips[MOUTH_CORNER_RIGHT],
    ))
}

/// Mean vertical brow coordinate, averaged left/right
pub fn brow_position(landmarks: &LandmarkSet) -> FeatureResult<f32> {
    let left = landmarks.require(FaceRegion::LeftEyebrowUpper)?;
    let right = landmarks.require(FaceRegion::RightEyebrowUpper)?;

    // require() guarantees at least one point per brow
    let left_height = mean(left.iter().map(|p| p.y)).unwrap_or_default();
    let right_height = mean(right.iter().map(|p| p.y)).unwrap_or_default();

    Ok((left_height + right_height) / 2.0)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::features::FeatureError;
    use crate::geometry::Point2D;

    /// Eye region with the given eyelid gap
    fn eye(center_x: f32, gap: f32) -> Vec<Point2D> {
        let mut points = vec![Point2D::new(center_x, 0.4); 16];
        points[EYELID_UPPER] = Point2D::new(center_x, 0.4 - gap / 2.0);
        points[EYELID_LOWER] = Point2D::new(center_x, 0.4 + gap / 2.0);
        points
    }

    /// Upper-lip outline with corners at `y = 0.7` and the midpoint lifted by `lift`
    fn lips(lift: f32) -> Vec<Point2D> {
        let mut points: Vec<Point2D> = (0..11)
            .map(|i| Point2D::new(0.4 + i as f32 * 0.02, 0.7))
            .collect();
        points[MOUTH_MIDPOINT].y -= lift;
        points
    }

    /// A complete synthetic face
    pub(crate) fn face(gap: f32, lift: f32, brow_y: f32) -> LandmarkSet {
        LandmarkSet::new()
            .with_region(FaceRegion::LeftEye, eye(0.35, gap))
            .with_region(FaceRegion::RightEye, eye(0.65, gap))
            .with_region(FaceRegion::LipsUpperOuter, lips(lift))
            .with_region(
                FaceRegion::LeftEyebrowUpper,
                vec![Point2D::new(0.3, brow_y - 0.01), Point2D::new(0.4, brow_y + 0.01)],
            )
            .with_region(
                FaceRegion::RightEyebrowUpper,
                vec![Point2D::new(0.6, brow_y), Point2D::new(0.7, brow_y)],
            )
    }

    #[test]
    fn test_eye_openness_averages_both_eyes() {
        let set = face(0.06, 0.0, 0.3)
            .with_region(FaceRegion::RightEye, eye(0.65, 0.02));
        let openness = eye_openness(&set).unwrap();
        assert!((openness - 0.04).abs() < 1e-5);
    }

    #[test]
    fn test_flat_mouth_has_zero_curvature() {
        let set = face(0.05, 0.0, 0.3);
        assert!(mouth_curvature(&set).unwrap().abs() < 0.01);
    }

    #[test]
    fn test_degenerate_mouth_is_zero_not_nan() {
        let mut set = face(0.05, 0.0, 0.3);
        set.insert(FaceRegion::LipsUpperOuter, vec![Point2D::new(0.5, 0.7); 11]);
        let curvature = mouth_curvature(&set).unwrap();
        assert_eq!(curvature, 0.0);
    }

    #[test]
    fn test_lifted_midpoint_curves() {
        let flat = mouth_curvature(&face(0.05, 0.0, 0.3)).unwrap();
        let curved = mouth_curvature(&face(0.05, 0.05, 0.3)).unwrap();
        assert!(curved > flat);
    }

    #[test]
    fn test_brow_position_mean_y() {
        let set = face(0.05, 0.0, 0.3);
        assert!((brow_position(&set).unwrap() - 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_extract_features_missing_region() {
        let mut set = face(0.05, 0.0, 0.3);
        set.insert(FaceRegion::RightEyebrowUpper, Vec::new());
        assert_eq!(
            extract_features(&set),
            Err(FeatureError::MalformedLandmarks {
                region: FaceRegion::RightEyebrowUpper,
                required: 1,
                found: 0,
            })
        );
    }
}
