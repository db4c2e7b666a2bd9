//! Replay of recorded face-mesh output.
//!
//! A trace is JSON lines, one frame per line:
//!
//! ```text
//! {"width":640,"height":480,"landmarks":[[0.51,0.42],[0.49,0.44], ...]}
//! {"width":640,"height":480,"landmarks":null}
//! ```
//!
//! `landmarks` is the detector output for the mirrored frame, or `null` when
//! no face was found. The frame source and the detector share a one-frame
//! slot: each read deposits that frame's face, the next detect takes it.

use std::cell::RefCell;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::CaptureError;
use crate::frame::Frame;
use crate::landmarks::{FaceLandmarks, Landmark};
use crate::monitor::{FrameSource, LandmarkDetector};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceRecord {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub landmarks: Option<Vec<[f64; 2]>>,
}

impl TraceRecord {
    pub fn new(width: u32, height: u32, face: Option<&FaceLandmarks>) -> Self {
        Self {
            width,
            height,
            landmarks: face.map(|f| f.points().iter().map(|p| [p.x, p.y]).collect()),
        }
    }

    pub fn to_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    fn face(&self) -> Option<FaceLandmarks> {
        let points = self.landmarks.as_ref()?;
        Some(
            points
                .iter()
                .map(|[x, y]| Landmark::new(*x, *y))
                .collect::<Vec<_>>()
                .into(),
        )
    }
}

type FaceSlot = Rc<RefCell<Option<FaceLandmarks>>>;

pub struct ReplayFrames {
    path: PathBuf,
    reader: Option<BufReader<File>>,
    slot: FaceSlot,
    pace: Option<Duration>,
    line_no: usize,
}

pub struct ReplayDetector {
    slot: FaceSlot,
}

/// Frame source and detector replaying the trace at `path`.
///
/// With `pace` set, each read sleeps that long to mimic the capture rate.
pub fn trace_replay(path: impl Into<PathBuf>, pace: Option<Duration>) -> (ReplayFrames, ReplayDetector) {
    let slot = FaceSlot::default();
    (
        ReplayFrames {
            path: path.into(),
            reader: None,
            slot: slot.clone(),
            pace,
            line_no: 0,
        },
        ReplayDetector { slot },
    )
}

impl FrameSource for ReplayFrames {
    fn open(&mut self, device: u32) -> Result<(), CaptureError> {
        let file = File::open(&self.path).map_err(|e| CaptureError::CameraUnavailable {
            device,
            reason: format!("{}: {e}", self.path.display()),
        })?;
        tracing::info!(device, path = %self.path.display(), "replaying gaze trace");
        self.reader = Some(BufReader::new(file));
        self.line_no = 0;
        Ok(())
    }

    fn read(&mut self) -> Result<Frame, CaptureError> {
        let reader = self
            .reader
            .as_mut()
            .ok_or_else(|| CaptureError::ReadFailed("trace not opened".to_string()))?;

        let mut line = String::new();
        loop {
            line.clear();
            let n = reader
                .read_line(&mut line)
                .map_err(|e| CaptureError::ReadFailed(e.to_string()))?;
            if n == 0 {
                return Err(CaptureError::ReadFailed("trace exhausted".to_string()));
            }
            self.line_no += 1;
            if !line.trim().is_empty() {
                break;
            }
        }

        let record: TraceRecord = serde_json::from_str(line.trim())
            .map_err(|e| CaptureError::ReadFailed(format!("line {}: {e}", self.line_no)))?;

        if let Some(pace) = self.pace {
            std::thread::sleep(pace);
        }

        *self.slot.borrow_mut() = record.face();
        Ok(Frame::geometry_only(record.width, record.height))
    }

    fn release(&mut self) {
        self.reader = None;
        self.slot.borrow_mut().take();
    }
}

impl LandmarkDetector for ReplayDetector {
    fn detect(&mut self, _frame: &Frame) -> Option<FaceLandmarks> {
        self.slot.borrow_mut().take()
    }
}
