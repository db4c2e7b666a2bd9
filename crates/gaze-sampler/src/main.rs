use std::process::ExitCode;

use gaze_sampler::config::SamplerConfig;
use gaze_sampler::replay::trace_replay;
use gaze_sampler::{
    CaptureError, GazeMonitor, LogDisplay, QuitSignal, StopReason, SystemClock,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let config = SamplerConfig::from_env();
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .init();

    tracing::info!(
        interval_secs = config.check_interval_secs,
        threshold = config.threshold,
        "Starting gaze-sampler"
    );

    let quit = QuitSignal::new();
    {
        let quit = quit.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Quit requested");
                quit.raise();
            }
        });
    }

    let run_config = config.clone();
    let summary = tokio::task::spawn_blocking(move || {
        let (frames, detector) = trace_replay(&run_config.trace_path, run_config.replay_pace());
        let mut monitor = GazeMonitor::new(
            frames,
            detector,
            LogDisplay::new(),
            SystemClock::new(),
            quit,
            run_config.monitor(),
        );
        monitor.run()
    })
    .await;

    match summary {
        Ok(summary) => {
            tracing::info!(
                frames = summary.frames_processed,
                reports = summary.reports_emitted,
                reason = ?summary.stop_reason,
                "Session finished"
            );
            match summary.stop_reason {
                StopReason::CaptureFailed(CaptureError::CameraUnavailable { .. }) => {
                    ExitCode::FAILURE
                }
                _ => ExitCode::SUCCESS,
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Monitor task panicked");
            ExitCode::FAILURE
        }
    }
}
