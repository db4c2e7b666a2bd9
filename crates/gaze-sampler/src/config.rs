use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::focus::DEFAULT_MARGIN_RATIO;
use crate::monitor::MonitorConfig;
use crate::window::DEFAULT_ACTIVENESS_THRESHOLD;

#[derive(Debug, Clone)]
pub struct SamplerConfig {
    pub log_level: String,
    pub camera_index: u32,
    pub trace_path: String,
    /// Replay pacing; 0 replays as fast as the trace can be read.
    pub replay_fps: f64,
    pub check_interval_secs: u64,
    pub threshold: f64,
    pub margin_ratio: f64,
}

impl SamplerConfig {
    pub fn from_env() -> Self {
        Self {
            log_level: env_or("RUST_LOG", "info"),
            camera_index: env_or_parse("CAMERA_INDEX", 0_u32),
            trace_path: env_or("GAZE_TRACE_PATH", "./data/gaze-trace.jsonl"),
            replay_fps: env_or_parse("GAZE_REPLAY_FPS", 30.0_f64),
            check_interval_secs: env_or_parse("FOCUS_CHECK_INTERVAL_SECS", 5_u64),
            threshold: env_or_parse("FOCUS_THRESHOLD", DEFAULT_ACTIVENESS_THRESHOLD),
            margin_ratio: env_or_parse("FOCUS_MARGIN_RATIO", DEFAULT_MARGIN_RATIO),
        }
    }

    pub fn monitor(&self) -> MonitorConfig {
        MonitorConfig {
            camera_index: self.camera_index,
            check_interval: Duration::from_secs(self.check_interval_secs.max(1)),
            threshold: self.threshold,
            margin_ratio: self.margin_ratio,
        }
    }

    pub fn replay_pace(&self) -> Option<Duration> {
        if self.replay_fps.is_finite() && self.replay_fps > 0.0 {
            Some(Duration::from_secs_f64(1.0 / self.replay_fps))
        } else {
            None
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_or_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    match env::var(key) {
        Ok(raw) => match raw.parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(key, value = %raw, "Failed to parse env var, using default");
                default
            }
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Mutex, OnceLock};

    use super::*;

    fn env_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    const KEYS: &[&str] = &[
        "CAMERA_INDEX",
        "GAZE_REPLAY_FPS",
        "FOCUS_CHECK_INTERVAL_SECS",
        "FOCUS_THRESHOLD",
        "FOCUS_MARGIN_RATIO",
    ];

    fn clear_keys() {
        for key in KEYS {
            env::remove_var(key);
        }
    }

    #[test]
    fn defaults_match_the_monitor() {
        let _guard = env_lock().lock().expect("env lock");
        clear_keys();

        let cfg = SamplerConfig::from_env();
        assert_eq!(cfg.monitor(), MonitorConfig::default());
        assert!(cfg.replay_pace().is_some());
    }

    #[test]
    fn overrides_and_fallbacks() {
        let _guard = env_lock().lock().expect("env lock");
        clear_keys();

        env::set_var("CAMERA_INDEX", "2");
        env::set_var("FOCUS_THRESHOLD", "55.5");
        env::set_var("FOCUS_CHECK_INTERVAL_SECS", "soon");
        env::set_var("GAZE_REPLAY_FPS", "0");

        let cfg = SamplerConfig::from_env();
        let monitor = cfg.monitor();
        assert_eq!(monitor.camera_index, 2);
        assert_eq!(monitor.threshold, 55.5);
        assert_eq!(monitor.check_interval, Duration::from_secs(5));
        assert_eq!(cfg.replay_pace(), None);

        clear_keys();
    }
}
