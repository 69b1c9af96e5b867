//! 2D geometry helpers for landmark analysis

use serde::{Deserialize, Serialize};

/// A landmark point in image coordinates
///
/// Serialized as a `[x, y]` pair to match the detector's annotation format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 2]", into = "[f32; 2]")]
pub struct Point2D {
    pub x: f32,
    pub y: f32,
}

impl Point2D {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point2D) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<[f32; 2]> for Point2D {
    fn from([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point2D> for [f32; 2] {
    fn from(p: Point2D) -> Self {
        [p.x, p.y]
    }
}

/// Arithmetic mean, `None` for an empty input
pub fn mean<I>(values: I) -> Option<f32>
where
    I: IntoIterator<Item = f32>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0f32, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f32)
    }
}

/// Curvature of the triangle `p1 p2 p3`
///
/// With side lengths `a = |p1 p2|`, `b = |p2 p3|`, `c = |p3 p1|` and
/// semi-perimeter `s`, returns `4·√(s(s-a)(s-b)(s-c)) / (a·c)`.
///
/// Degenerate triangles (any zero-length side) yield 0. Collinear points whose
/// Heron radicand rounds below zero also yield 0.
pub fn triangle_curvature(p1: &Point2D, p2: &Point2D, p3: &Point2D) -> f32 {
    let a = p1.distance(p2);
    let b = p2.distance(p3);
    let c = p3.distance(p1);

    if a == 0.0 || b == 0.0 || c == 0.0 {
        return 0.0;
    }

    let s = (a + b + c) / 2.0;
    let radicand = (s * (s - a) * (s - b) * (s - c)).max(0.0);
    let curvature = 4.0 * radicand.sqrt() / (a * c);

    if curvature.is_finite() {
        curvature
    } else {
        0.0
    }
}
