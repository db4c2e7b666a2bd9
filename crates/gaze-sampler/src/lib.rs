//! Webcam focus sampler.
//!
//! Classifies each frame as focused or not from two iris landmarks, then
//! aggregates per interval into an activeness percentage compared against a
//! threshold.
//!
//! ## Modules
//! - `landmarks`: face-mesh landmark types and the iris indices consumed
//! - `focus`: per-frame gaze classification
//! - `window`: interval counters and reports
//! - `frame`: captured frames
//! - `monitor`: the capture loop, its state machine and collaborator traits
//! - `replay`: trace-driven frame source and detector
//! - `display`: headless display over `tracing`

pub mod config;
pub mod display;
pub mod error;
pub mod focus;
pub mod frame;
pub mod landmarks;
pub mod monitor;
pub mod replay;
pub mod window;

pub use display::LogDisplay;
pub use error::CaptureError;
pub use focus::FocusClassifier;
pub use frame::Frame;
pub use landmarks::{FaceLandmarks, Landmark};
pub use monitor::{
    Clock, Display, FrameSource, GazeMonitor, LandmarkDetector, MonitorConfig, MonitorState,
    QuitSignal, RunSummary, StopReason, SystemClock,
};
pub use window::{FocusReport, FocusStatus, FocusWindow};
