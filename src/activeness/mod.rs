//! Synthetic activeness scoring.
//!
//! The generator draws three eye readings per tick, folds them into a single
//! score in `[0, 100]` and publishes it into a [`ScoreCell`]. Readers take
//! lock-free snapshots of the cell.

pub mod cell;
pub mod clock;
pub mod score;
pub mod source;

pub use cell::{ScoreCell, ScoreSnapshot};
pub use clock::MonotonicClock;
pub use score::{compute_score, inverse_blink, EyeReadings};
pub use source::{ReadingSource, SyntheticSource};
