use std::sync::Arc;

use axum::Router;
use tokio::sync::broadcast;

use activeness_monitor::activeness::ScoreCell;
use activeness_monitor::config::{Config, WorkerConfig, DEFAULT_SCORE_CRON};
use activeness_monitor::routes::build_router;
use activeness_monitor::state::AppState;

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub score: Arc<ScoreCell>,
    pub shutdown_tx: broadcast::Sender<()>,
}

/// Built directly rather than through `Config::from_env` to avoid env races between tests.
pub fn test_config(cors_origin: &str, is_leader: bool) -> Config {
    Config {
        host: std::net::IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
        port: 5001,
        log_level: "info".to_string(),
        enable_file_logs: false,
        log_dir: "./logs".to_string(),
        cors_origin: cors_origin.to_string(),
        worker: WorkerConfig {
            is_leader,
            score_cron: DEFAULT_SCORE_CRON.to_string(),
        },
    }
}

pub fn spawn_with_config(config: Config) -> TestApp {
    let score = Arc::new(ScoreCell::new());
    let (shutdown_tx, _) = broadcast::channel::<()>(8);
    let state = AppState::new(score.clone(), &config, shutdown_tx.clone());
    let app = build_router(state.clone());

    TestApp {
        app,
        state,
        score,
        shutdown_tx,
    }
}

pub fn spawn_test_app() -> TestApp {
    spawn_with_config(test_config("*", true))
}
