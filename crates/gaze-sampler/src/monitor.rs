//! Frame loop driving focus sampling.
//!
//! Idle → Capturing → (every interval) Reporting → Capturing → … → Stopped.
//! The loop stops on a quit request or the first failed frame read; there are
//! no retries.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::CaptureError;
use crate::focus::FocusClassifier;
use crate::frame::Frame;
use crate::landmarks::FaceLandmarks;
use crate::window::{FocusReport, FocusWindow, DEFAULT_ACTIVENESS_THRESHOLD};

/// Source of camera frames.
pub trait FrameSource {
    fn open(&mut self, device: u32) -> Result<(), CaptureError>;
    fn read(&mut self) -> Result<Frame, CaptureError>;
    fn release(&mut self) {}
}

/// Face-landmark inference; returns at most one face.
pub trait LandmarkDetector {
    fn detect(&mut self, frame: &Frame) -> Option<FaceLandmarks>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// UI surface consuming frames, status strings and interval reports.
pub trait Display {
    fn show_message(&mut self, level: MessageLevel, text: &str);
    fn show_frame(&mut self, frame: &Frame, face: Option<&FaceLandmarks>);
    fn show_report(&mut self, report: &FocusReport);
    /// Removes the frame and report placeholders at session end.
    fn clear(&mut self) {}
    /// Polled once per frame, after the frame is shown.
    fn quit_requested(&mut self) -> bool {
        false
    }
}

/// Monotonic time since an arbitrary origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Shared quit flag, raisable from another thread (e.g. a Ctrl-C handler).
#[derive(Debug, Clone, Default)]
pub struct QuitSignal(Arc<AtomicBool>);

impl QuitSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonitorConfig {
    pub camera_index: u32,
    pub check_interval: Duration,
    pub threshold: f64,
    pub margin_ratio: f64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            camera_index: 0,
            check_interval: Duration::from_secs(5),
            threshold: DEFAULT_ACTIVENESS_THRESHOLD,
            margin_ratio: crate::focus::DEFAULT_MARGIN_RATIO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    QuitRequested,
    CaptureFailed(CaptureError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorState {
    Idle,
    Capturing,
    Reporting,
    Stopped(StopReason),
}

impl MonitorState {
    pub fn is_stopped(&self) -> bool {
        matches!(self, Self::Stopped(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub stop_reason: StopReason,
    pub frames_processed: u64,
    pub reports_emitted: u64,
}

pub struct GazeMonitor<S, D, V, C = SystemClock> {
    source: S,
    detector: D,
    display: V,
    clock: C,
    quit: QuitSignal,
    config: MonitorConfig,
    classifier: FocusClassifier,
    window: FocusWindow,
    state: MonitorState,
    interval_start: Duration,
    frames_processed: u64,
    reports_emitted: u64,
}

impl<S, D, V, C> GazeMonitor<S, D, V, C>
where
    S: FrameSource,
    D: LandmarkDetector,
    V: Display,
    C: Clock,
{
    pub fn new(
        source: S,
        detector: D,
        display: V,
        clock: C,
        quit: QuitSignal,
        config: MonitorConfig,
    ) -> Self {
        Self {
            source,
            detector,
            display,
            clock,
            quit,
            classifier: FocusClassifier::new(config.margin_ratio),
            config,
            window: FocusWindow::new(),
            state: MonitorState::Idle,
            interval_start: Duration::ZERO,
            frames_processed: 0,
            reports_emitted: 0,
        }
    }

    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    pub fn window(&self) -> &FocusWindow {
        &self.window
    }

    pub fn display(&self) -> &V {
        &self.display
    }

    /// Opens the camera. Idle → Capturing, or Idle → Stopped on failure.
    pub fn start(&mut self) -> &MonitorState {
        if self.state != MonitorState::Idle {
            return &self.state;
        }

        match self.source.open(self.config.camera_index) {
            Ok(()) => {
                tracing::info!(device = self.config.camera_index, "camera opened");
                self.display
                    .show_message(MessageLevel::Success, "Webcam is now active.");
                self.interval_start = self.clock.now();
                self.state = MonitorState::Capturing;
            }
            Err(err) => {
                tracing::error!(error = %err, "camera open failed");
                self.display.show_message(
                    MessageLevel::Error,
                    "Webcam not detected. Please enable webcam access.",
                );
                self.state = MonitorState::Stopped(StopReason::CaptureFailed(err));
            }
        }
        &self.state
    }

    /// Processes one frame and closes the interval when it has elapsed.
    pub fn step(&mut self) -> &MonitorState {
        if self.state != MonitorState::Capturing {
            return &self.state;
        }

        if self.quit.is_raised() {
            return self.stop(StopReason::QuitRequested);
        }

        let mut frame = match self.source.read() {
            Ok(frame) => frame,
            Err(err) => {
                tracing::warn!(error = %err, "frame read failed, stopping");
                self.display
                    .show_message(MessageLevel::Warning, "Couldn't access webcam feed.");
                return self.stop(StopReason::CaptureFailed(err));
            }
        };

        frame.mirror_horizontal();
        let face = self.detector.detect(&frame);
        let focused = face
            .as_ref()
            .is_some_and(|f| self.classifier.is_looking_forward(f, frame.width));
        self.window.record(focused);
        self.frames_processed += 1;

        self.display.show_frame(&frame, face.as_ref());

        let now = self.clock.now();
        if now.saturating_sub(self.interval_start) >= self.config.check_interval {
            self.state = MonitorState::Reporting;
            let report = self.window.take_report(self.config.threshold);
            tracing::debug!(
                focused = report.focused_frames,
                total = report.total_frames,
                activeness = report.activeness,
                status = ?report.status,
                "focus interval closed"
            );
            self.display.show_report(&report);
            self.reports_emitted += 1;
            self.interval_start = now;
            self.state = MonitorState::Capturing;
        }

        if self.display.quit_requested() {
            return self.stop(StopReason::QuitRequested);
        }
        &self.state
    }

    /// Runs until Stopped and returns what happened.
    pub fn run(&mut self) -> RunSummary {
        self.start();
        while !self.state.is_stopped() {
            self.step();
        }

        let stop_reason = match &self.state {
            MonitorState::Stopped(reason) => reason.clone(),
            _ => StopReason::QuitRequested,
        };
        RunSummary {
            stop_reason,
            frames_processed: self.frames_processed,
            reports_emitted: self.reports_emitted,
        }
    }

    fn stop(&mut self, reason: StopReason) -> &MonitorState {
        self.source.release();
        self.display.clear();
        self.display
            .show_message(MessageLevel::Success, "Webcam session ended.");
        tracing::info!(
            reason = ?reason,
            frames = self.frames_processed,
            reports = self.reports_emitted,
            "monitor stopped"
        );
        self.state = MonitorState::Stopped(reason);
        &self.state
    }
}
