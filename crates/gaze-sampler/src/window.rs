//! Interval aggregation of per-frame focus samples.

use serde::Serialize;

pub const DEFAULT_ACTIVENESS_THRESHOLD: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusStatus {
    Ok,
    Alert,
}

impl FocusStatus {
    pub fn message(self) -> &'static str {
        match self {
            Self::Ok => "You're staying attentive! Good job!",
            Self::Alert => "You are less focused! Try paying more attention.",
        }
    }
}

/// Outcome of one closed interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusReport {
    pub focused_frames: u64,
    pub total_frames: u64,
    /// Percentage in `[0, 100]`; 0 for an interval without frames.
    pub activeness: f64,
    pub status: FocusStatus,
}

impl FocusReport {
    /// `Activeness: 30.00%`
    pub fn headline(&self) -> String {
        format!("Activeness: {:.2}%", self.activeness)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusWindow {
    focused_frames: u64,
    total_frames: u64,
}

impl FocusWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, focused: bool) {
        self.total_frames += 1;
        if focused {
            self.focused_frames += 1;
        }
    }

    pub fn counts(&self) -> (u64, u64) {
        (self.focused_frames, self.total_frames)
    }

    pub fn activeness(&self) -> f64 {
        if self.total_frames == 0 {
            return 0.0;
        }
        self.focused_frames as f64 / self.total_frames as f64 * 100.0
    }

    pub fn report(&self, threshold: f64) -> FocusReport {
        let activeness = self.activeness();
        let status = if activeness < threshold {
            FocusStatus::Alert
        } else {
            FocusStatus::Ok
        };
        FocusReport {
            focused_frames: self.focused_frames,
            total_frames: self.total_frames,
            activeness,
            status,
        }
    }

    /// Closes the interval: reports and resets the counters to `(0, 0)`.
    pub fn take_report(&mut self, threshold: f64) -> FocusReport {
        let report = self.report(threshold);
        *self = Self::default();
        report
    }
}
