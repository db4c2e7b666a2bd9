use std::sync::Mutex;

use crate::activeness::{compute_score, ReadingSource, ScoreCell};

pub type SharedSource = Mutex<Box<dyn ReadingSource>>;

/// Draws one set of readings, scores it and publishes the result.
pub async fn run(source: &SharedSource, cell: &ScoreCell) -> u8 {
    let readings = {
        let mut guard = match source.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("score_generation: reading source lock poisoned, recovering");
                poisoned.into_inner()
            }
        };
        guard.next_readings()
    };

    let score = compute_score(&readings);
    let generation = cell.publish(score);
    tracing::debug!(
        score,
        generation,
        fixation = readings.fixation_percentage,
        blink_rate = readings.blink_rate,
        pupil_dilation = readings.pupil_dilation,
        "score_generation: published"
    );
    score
}
