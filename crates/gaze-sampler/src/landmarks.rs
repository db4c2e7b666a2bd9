//! Face-mesh landmark types.
//!
//! Coordinates are normalized to the frame: `x` and `y` in `[0, 1]`, origin at
//! the top-left corner. A refined face mesh yields 478 points; the iris
//! centers sit at indices 468-477.

use serde::{Deserialize, Serialize};

/// Iris center used as the left-eye gaze proxy.
pub const LEFT_IRIS_CENTER: usize = 474;
/// Iris center used as the right-eye gaze proxy.
pub const RIGHT_IRIS_CENTER: usize = 469;

/// Point count of a refined face mesh.
pub const REFINED_MESH_POINTS: usize = 478;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Landmarks of a single detected face.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FaceLandmarks {
    points: Vec<Landmark>,
}

impl FaceLandmarks {
    pub fn new(points: Vec<Landmark>) -> Self {
        Self { points }
    }

    pub fn get(&self, index: usize) -> Option<Landmark> {
        self.points.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Landmark] {
        &self.points
    }

    /// Normalized horizontal gaze estimate: midpoint of the two iris centers.
    ///
    /// `None` when the mesh was produced without iris refinement.
    pub fn gaze_x(&self) -> Option<f64> {
        let left = self.get(LEFT_IRIS_CENTER)?;
        let right = self.get(RIGHT_IRIS_CENTER)?;
        Some((left.x + right.x) / 2.0)
    }

    /// Builds a refined mesh with every point at the frame center except the two
    /// iris centers.
    pub fn with_iris_centers(left_x: f64, right_x: f64) -> Self {
        let mut points = vec![Landmark::new(0.5, 0.5); REFINED_MESH_POINTS];
        points[LEFT_IRIS_CENTER] = Landmark::new(left_x, 0.45);
        points[RIGHT_IRIS_CENTER] = Landmark::new(right_x, 0.45);
        Self { points }
    }
}

impl From<Vec<Landmark>> for FaceLandmarks {
    fn from(points: Vec<Landmark>) -> Self {
        Self::new(points)
    }
}
