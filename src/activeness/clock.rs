use std::sync::atomic::{AtomicI64, Ordering};

/// Wall-clock source whose readings never go backwards.
///
/// A backwards step of the system clock is absorbed by repeating the last
/// issued value until real time catches up.
#[derive(Default)]
pub struct MonotonicClock {
    last_issued_us: AtomicI64,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current epoch time in fractional seconds.
    pub fn now_epoch_secs(&self) -> f64 {
        let micros = self.issue(chrono::Utc::now().timestamp_micros());
        micros as f64 / 1_000_000.0
    }

    fn issue(&self, now_us: i64) -> i64 {
        let prev = self.last_issued_us.fetch_max(now_us, Ordering::AcqRel);
        prev.max(now_us)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backwards_step_repeats_last_value() {
        let clock = MonotonicClock::new();
        assert_eq!(clock.issue(2_000), 2_000);
        assert_eq!(clock.issue(1_500), 2_000);
        assert_eq!(clock.issue(2_500), 2_500);
    }

    #[test]
    fn successive_readings_are_non_decreasing() {
        let clock = MonotonicClock::new();
        let mut prev = clock.now_epoch_secs();
        for _ in 0..100 {
            let next = clock.now_epoch_secs();
            assert!(next >= prev);
            prev = next;
        }
        assert!(prev > 1_600_000_000.0);
    }
}
