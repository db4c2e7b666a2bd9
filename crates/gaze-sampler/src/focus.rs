//! Per-frame focus classification.
//!
//! A frame counts as focused when the estimated gaze point falls within a
//! centered band of the frame: `|gaze_px - width/2| < margin_ratio * width`.

use crate::landmarks::FaceLandmarks;

pub const DEFAULT_MARGIN_RATIO: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusClassifier {
    margin_ratio: f64,
}

impl Default for FocusClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_MARGIN_RATIO)
    }
}

impl FocusClassifier {
    pub fn new(margin_ratio: f64) -> Self {
        Self {
            margin_ratio: margin_ratio.max(0.0),
        }
    }

    pub fn margin_ratio(&self) -> f64 {
        self.margin_ratio
    }

    /// Gaze position in pixels along the frame width.
    pub fn gaze_px(face: &FaceLandmarks, width: u32) -> Option<f64> {
        face.gaze_x().map(|x| x * f64::from(width))
    }

    pub fn is_focused_px(&self, gaze_px: f64, width: u32) -> bool {
        let width = f64::from(width);
        let center = width / 2.0;
        let margin = width * self.margin_ratio;
        (gaze_px - center).abs() < margin
    }

    /// Faces without iris landmarks are never focused.
    pub fn is_looking_forward(&self, face: &FaceLandmarks, width: u32) -> bool {
        Self::gaze_px(face, width).is_some_and(|px| self.is_focused_px(px, width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::Landmark;

    #[test]
    fn centered_band_on_640_wide_frame() {
        let classifier = FocusClassifier::default();
        // center 320, margin 96
        assert!(classifier.is_focused_px(300.0, 640));
        assert!(classifier.is_focused_px(320.0, 640));
        assert!(!classifier.is_focused_px(450.0, 640));
        assert!(!classifier.is_focused_px(100.0, 640));
    }

    #[test]
    fn band_edges_are_exclusive() {
        let classifier = FocusClassifier::default();
        assert!(!classifier.is_focused_px(416.0, 640));
        assert!(!classifier.is_focused_px(224.0, 640));
        assert!(classifier.is_focused_px(415.5, 640));
    }

    #[test]
    fn classifies_from_landmarks() {
        let classifier = FocusClassifier::default();
        // gaze_x = 0.46875 -> 300px
        let forward = FaceLandmarks::with_iris_centers(0.45, 0.4875);
        assert!(classifier.is_looking_forward(&forward, 640));

        // gaze_x = 0.703125 -> 450px
        let aside = FaceLandmarks::with_iris_centers(0.70, 0.70625);
        assert!(!classifier.is_looking_forward(&aside, 640));
    }

    #[test]
    fn missing_iris_points_are_not_focused() {
        let classifier = FocusClassifier::default();
        let face = FaceLandmarks::new(vec![Landmark::new(0.5, 0.5); 10]);
        assert!(!classifier.is_looking_forward(&face, 640));
    }

    #[test]
    fn zero_margin_never_focuses() {
        let classifier = FocusClassifier::new(0.0);
        assert!(!classifier.is_focused_px(320.0, 640));
    }
}
