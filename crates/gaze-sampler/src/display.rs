//! Headless display writing everything through `tracing`.

use crate::frame::Frame;
use crate::landmarks::FaceLandmarks;
use crate::monitor::{Display, MessageLevel};
use crate::window::{FocusReport, FocusStatus};

#[derive(Debug, Default)]
pub struct LogDisplay {
    frames_shown: u64,
    last_report: Option<FocusReport>,
}

impl LogDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_shown(&self) -> u64 {
        self.frames_shown
    }

    pub fn last_report(&self) -> Option<&FocusReport> {
        self.last_report.as_ref()
    }
}

impl Display for LogDisplay {
    fn show_message(&mut self, level: MessageLevel, text: &str) {
        match level {
            MessageLevel::Info | MessageLevel::Success => tracing::info!("{text}"),
            MessageLevel::Warning => tracing::warn!("{text}"),
            MessageLevel::Error => tracing::error!("{text}"),
        }
    }

    fn show_frame(&mut self, frame: &Frame, face: Option<&FaceLandmarks>) {
        self.frames_shown += 1;
        tracing::trace!(
            width = frame.width,
            height = frame.height,
            face = face.is_some(),
            "frame"
        );
    }

    fn show_report(&mut self, report: &FocusReport) {
        match report.status {
            FocusStatus::Ok => tracing::info!(
                focused = report.focused_frames,
                total = report.total_frames,
                "{} - {}",
                report.headline(),
                report.status.message()
            ),
            FocusStatus::Alert => tracing::warn!(
                focused = report.focused_frames,
                total = report.total_frames,
                "{} - {}",
                report.headline(),
                report.status.message()
            ),
        }
        self.last_report = Some(*report);
    }

    fn clear(&mut self) {
        self.last_report = None;
    }
}
