use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Wire shape of `GET /activeness`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivenessResponse {
    pub activeness: u8,
    /// Epoch seconds, non-decreasing across calls.
    pub timestamp: f64,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_activeness))
}

pub async fn get_activeness(State(state): State<AppState>) -> Json<ActivenessResponse> {
    Json(ActivenessResponse {
        activeness: state.score().score(),
        timestamp: state.clock().now_epoch_secs(),
    })
}
