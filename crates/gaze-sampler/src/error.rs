use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("camera {device} unavailable: {reason}")]
    CameraUnavailable { device: u32, reason: String },
    #[error("frame read failed: {0}")]
    ReadFailed(String),
}
