use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(health_check))
        .route("/live", get(liveness))
        .route("/ready", get(readiness))
}

pub async fn health_check(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    let snapshot = state.score().snapshot();
    let last_score_age_ms = if snapshot.generation == 0 {
        None
    } else {
        Some((chrono::Utc::now().timestamp_millis() - snapshot.updated_at_ms).max(0))
    };

    Json(serde_json::json!({
        "status": "ok",
        "uptimeSecs": state.uptime_secs(),
        "generator": {
            "leader": state.config().worker.is_leader,
            "cron": state.config().worker.score_cron,
            "generation": snapshot.generation,
            "score": snapshot.score,
            "lastScoreAgeMs": last_score_age_ms,
        }
    }))
}

pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// Ready once the generator has published at least once, or when this
/// instance does not run the generator at all.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    if !state.config().worker.is_leader || state.score().snapshot().generation > 0 {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
