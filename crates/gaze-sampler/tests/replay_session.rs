use std::cell::Cell;
use std::io::Write;
use std::time::Duration;

use gaze_sampler::monitor::MessageLevel;
use gaze_sampler::replay::{trace_replay, TraceRecord};
use gaze_sampler::{
    CaptureError, Clock, Display, FaceLandmarks, FocusReport, FocusStatus, Frame, GazeMonitor,
    MonitorConfig, QuitSignal, StopReason,
};

/// Advances half a second on every reading.
#[derive(Default)]
struct StepClock(Cell<Duration>);

impl Clock for StepClock {
    fn now(&self) -> Duration {
        let now = self.0.get();
        self.0.set(now + Duration::from_millis(500));
        now
    }
}

#[derive(Default)]
struct RecordingDisplay {
    messages: Vec<(MessageLevel, String)>,
    faces_seen: usize,
    reports: Vec<FocusReport>,
}

impl Display for RecordingDisplay {
    fn show_message(&mut self, level: MessageLevel, text: &str) {
        self.messages.push((level, text.to_string()));
    }

    fn show_frame(&mut self, _frame: &Frame, face: Option<&FaceLandmarks>) {
        if face.is_some() {
            self.faces_seen += 1;
        }
    }

    fn show_report(&mut self, report: &FocusReport) {
        self.reports.push(*report);
    }
}

fn trace_line(face: Option<FaceLandmarks>) -> String {
    TraceRecord::new(640, 480, face.as_ref())
        .to_line()
        .expect("serialize trace record")
}

fn forward() -> Option<FaceLandmarks> {
    Some(FaceLandmarks::with_iris_centers(0.46, 0.48))
}

fn aside() -> Option<FaceLandmarks> {
    Some(FaceLandmarks::with_iris_centers(0.12, 0.16))
}

fn write_session(faces: &[Option<FaceLandmarks>]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp trace");
    for face in faces {
        writeln!(file, "{}", trace_line(face.clone())).expect("write trace");
    }
    file
}

#[test]
fn replayed_session_reports_each_interval() {
    let mut faces = Vec::new();
    // interval 1: 3 of 10 focused
    faces.extend(std::iter::repeat_with(forward).take(3));
    faces.extend(std::iter::repeat_with(aside).take(4));
    faces.extend([None, None, None]);
    // interval 2: 8 of 10 focused
    faces.extend(std::iter::repeat_with(forward).take(8));
    faces.extend([aside(), None]);
    let trace = write_session(&faces);

    let (frames, detector) = trace_replay(trace.path(), None);
    let mut monitor = GazeMonitor::new(
        frames,
        detector,
        RecordingDisplay::default(),
        StepClock::default(),
        QuitSignal::new(),
        MonitorConfig::default(),
    );

    let summary = monitor.run();
    assert_eq!(summary.frames_processed, 20);
    assert_eq!(summary.reports_emitted, 2);
    assert_eq!(
        summary.stop_reason,
        StopReason::CaptureFailed(CaptureError::ReadFailed("trace exhausted".to_string()))
    );

    let display = monitor.display();
    assert_eq!(display.faces_seen, 16);

    let first = display.reports[0];
    assert_eq!((first.focused_frames, first.total_frames), (3, 10));
    assert_eq!(first.status, FocusStatus::Alert);

    let second = display.reports[1];
    assert_eq!((second.focused_frames, second.total_frames), (8, 10));
    assert_eq!(second.status, FocusStatus::Ok);
    assert_eq!(second.headline(), "Activeness: 80.00%");

    let levels: Vec<_> = display.messages.iter().map(|(l, _)| *l).collect();
    assert_eq!(
        levels,
        vec![MessageLevel::Success, MessageLevel::Warning, MessageLevel::Success]
    );
}

#[test]
fn raised_quit_signal_ends_session_without_reports() {
    let faces: Vec<_> = std::iter::repeat_with(forward).take(30).collect();
    let trace = write_session(&faces);

    let quit = QuitSignal::new();
    quit.raise();
    let (frames, detector) = trace_replay(trace.path(), None);
    let mut monitor = GazeMonitor::new(
        frames,
        detector,
        RecordingDisplay::default(),
        StepClock::default(),
        quit,
        MonitorConfig::default(),
    );

    let summary = monitor.run();
    assert_eq!(summary.stop_reason, StopReason::QuitRequested);
    assert_eq!(summary.frames_processed, 0);
    assert!(monitor.display().reports.is_empty());
}

#[test]
fn missing_camera_never_captures() {
    let (frames, detector) = trace_replay("/definitely/not/here.jsonl", None);
    let mut monitor = GazeMonitor::new(
        frames,
        detector,
        RecordingDisplay::default(),
        StepClock::default(),
        QuitSignal::new(),
        MonitorConfig {
            camera_index: 1,
            ..MonitorConfig::default()
        },
    );

    let summary = monitor.run();
    assert!(matches!(
        summary.stop_reason,
        StopReason::CaptureFailed(CaptureError::CameraUnavailable { device: 1, .. })
    ));
    assert_eq!(monitor.display().messages.len(), 1);
    assert_eq!(monitor.display().messages[0].0, MessageLevel::Error);
}
