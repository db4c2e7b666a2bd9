use std::sync::Arc;
use std::time::Instant;

use tokio::sync::broadcast;

use crate::activeness::{MonotonicClock, ScoreCell};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    score: Arc<ScoreCell>,
    clock: Arc<MonotonicClock>,
    config: Arc<Config>,
    shutdown_tx: broadcast::Sender<()>,
    started_at: Instant,
}

impl AppState {
    pub fn new(score: Arc<ScoreCell>, config: &Config, shutdown_tx: broadcast::Sender<()>) -> Self {
        Self {
            score,
            clock: Arc::new(MonotonicClock::new()),
            config: Arc::new(config.clone()),
            shutdown_tx,
            started_at: Instant::now(),
        }
    }

    pub fn score(&self) -> &ScoreCell {
        &self.score
    }

    pub fn score_handle(&self) -> Arc<ScoreCell> {
        self.score.clone()
    }

    pub fn clock(&self) -> &MonotonicClock {
        &self.clock
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn shutdown_rx(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    pub fn shutdown_tx(&self) -> &broadcast::Sender<()> {
        &self.shutdown_tx
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
