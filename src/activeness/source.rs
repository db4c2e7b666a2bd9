use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::score::EyeReadings;

pub const FIXATION_RANGE: RangeInclusive<f64> = 60.0..=95.0;
pub const BLINK_RATE_RANGE: RangeInclusive<f64> = 10.0..=25.0;
pub const PUPIL_DILATION_RANGE: RangeInclusive<f64> = 0.2..=0.8;

/// Supplies the eye readings consumed by each score generation.
///
/// The only shipped implementation is synthetic; a real eye tracker plugs in here.
pub trait ReadingSource: Send {
    fn next_readings(&mut self) -> EyeReadings;
}

/// Independent uniform draws over the synthetic ranges.
pub struct SyntheticSource {
    rng: StdRng,
}

impl SyntheticSource {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for SyntheticSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadingSource for SyntheticSource {
    fn next_readings(&mut self) -> EyeReadings {
        EyeReadings {
            fixation_percentage: self.rng.gen_range(FIXATION_RANGE),
            blink_rate: self.rng.gen_range(BLINK_RATE_RANGE),
            pupil_dilation: self.rng.gen_range(PUPIL_DILATION_RANGE),
        }
    }
}
