use std::sync::atomic::{AtomicI64, AtomicU64, AtomicU8, Ordering};

use serde::Serialize;

/// Shared holder of the latest activeness score.
///
/// Single writer (the generator job), any number of readers. Readers never
/// block; the three fields are updated independently, so a snapshot taken
/// mid-publish may pair a new score with the previous timestamp.
pub struct ScoreCell {
    score: AtomicU8,
    generation: AtomicU64,
    updated_at_ms: AtomicI64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSnapshot {
    pub score: u8,
    /// Completed generations since process start; 0 means the initial value.
    pub generation: u64,
    /// Epoch millis of the last publish, 0 before the first one.
    pub updated_at_ms: i64,
}

impl Default for ScoreCell {
    fn default() -> Self {
        Self {
            score: AtomicU8::new(0),
            generation: AtomicU64::new(0),
            updated_at_ms: AtomicI64::new(0),
        }
    }
}

impl ScoreCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, score: u8) -> u64 {
        self.score.store(score, Ordering::Release);
        self.updated_at_ms
            .store(chrono::Utc::now().timestamp_millis(), Ordering::Relaxed);
        self.generation.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub fn score(&self) -> u8 {
        self.score.load(Ordering::Acquire)
    }

    pub fn snapshot(&self) -> ScoreSnapshot {
        ScoreSnapshot {
            score: self.score.load(Ordering::Acquire),
            generation: self.generation.load(Ordering::Acquire),
            updated_at_ms: self.updated_at_ms.load(Ordering::Relaxed),
        }
    }
}
