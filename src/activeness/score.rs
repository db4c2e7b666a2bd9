use serde::{Deserialize, Serialize};

/// Blink rates at or above this value contribute nothing.
pub const BLINK_RATE_CEILING: f64 = 30.0;

pub const FIXATION_WEIGHT: f64 = 0.5;
pub const INVERSE_BLINK_WEIGHT: f64 = 0.3;
pub const PUPIL_WEIGHT: f64 = 0.2;

pub const MAX_SCORE: u8 = 100;

/// One generation's worth of eye readings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EyeReadings {
    /// Share of time the gaze is steady, 0-100.
    pub fixation_percentage: f64,
    /// Blinks per minute.
    pub blink_rate: f64,
    /// Normalized pupil dilation, 0-1.
    pub pupil_dilation: f64,
}

/// Lower blink rate yields a higher contribution, scaled to 100.
pub fn inverse_blink(blink_rate: f64) -> f64 {
    (BLINK_RATE_CEILING - blink_rate).max(0.0) / BLINK_RATE_CEILING * 100.0
}

/// `floor(0.5·fixation + 0.3·inverse_blink + 0.2·(dilation·100))`, clamped to `[0, 100]`.
pub fn compute_score(readings: &EyeReadings) -> u8 {
    let raw = readings.fixation_percentage * FIXATION_WEIGHT
        + inverse_blink(readings.blink_rate) * INVERSE_BLINK_WEIGHT
        + readings.pupil_dilation * 100.0 * PUPIL_WEIGHT;

    if !raw.is_finite() {
        return 0;
    }
    raw.floor().clamp(0.0, f64::from(MAX_SCORE)) as u8
}
