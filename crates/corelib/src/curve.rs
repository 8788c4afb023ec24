//! Piecewise cubic Bezier curve sampled into a closed loop of points.

use crate::{Mat4, Vec3, Vec4};

/// Sampled curve through consecutive cubic segments sharing end points
/// (control points 0..=3, 3..=6, ...).
#[derive(Clone, Debug, Default)]
pub struct BezierCurve {
    control_points: Vec<Vec3>,
    points: Vec<Vec3>,
}

impl BezierCurve {
    pub fn new(control_points: Vec<Vec3>) -> Self {
        Self {
            control_points,
            points: Vec::new(),
        }
    }

    pub fn from_arrays(control_points: &[[f32; 3]]) -> Self {
        Self::new(control_points.iter().copied().map(Vec3::from).collect())
    }

    pub fn control_points(&self) -> &[Vec3] {
        &self.control_points
    }

    /// Resamples the curve with `points_per_segment` samples per cubic
    /// segment at `t = j / points_per_segment`. Trailing control points that
    /// do not complete a segment are ignored.
    pub fn generate(&mut self, points_per_segment: usize) {
        self.points.clear();
        if points_per_segment == 0 {
            return;
        }
        let step = 1.0 / points_per_segment as f32;
        let mut start = 0;
        while start + 3 < self.control_points.len() {
            let g = Mat4::from_cols(
                self.control_points[start].extend(0.0),
                self.control_points[start + 1].extend(0.0),
                self.control_points[start + 2].extend(0.0),
                self.control_points[start + 3].extend(0.0),
            );
            let gm = g * bernstein();
            for j in 0..points_per_segment {
                let t = j as f32 * step;
                self.points.push((gm * Vec4::new(t * t * t, t * t, t, 1.0)).truncate());
            }
            start += 3;
        }
        log::debug!(
            "Generated {} curve points from {} control points",
            self.points.len(),
            self.control_points.len()
        );
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point(&self, i: usize) -> Option<Vec3> {
        self.points.get(i).copied()
    }
}

/// Cubic Bezier basis; columns multiply `(t^3, t^2, t, 1)`.
fn bernstein() -> Mat4 {
    Mat4::from_cols_array_2d(&[
        [-1.0, 3.0, -3.0, 1.0],
        [3.0, -6.0, 3.0, 0.0],
        [-3.0, 3.0, 0.0, 0.0],
        [1.0, 0.0, 0.0, 0.0],
    ])
    .transpose()
}

/// Walks the samples of a curve, one per frame, looping at the end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CurveCursor {
    index: usize,
}

impl CurveCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Current point, then moves to the next one.
    pub fn advance(&mut self, curve: &BezierCurve) -> Option<Vec3> {
        let point = curve.point(self.index)?;
        self.index = (self.index + 1) % curve.len();
        Some(point)
    }
}
