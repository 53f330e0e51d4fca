//! Ranking comparison core: score normalization, rankings, dissonances, and distance.

mod dissonance;
mod distance;
mod error;
mod evaluator;
mod ranking;
mod score;

pub use dissonance::{ChoiceDissonance, Dissonances, WinnerDissonance, detect};
pub use distance::{distance, max_distance};
pub use error::{MissingScore, RankingError, ScoreError};
pub use evaluator::{Evaluator, ScoreTable};
pub use ranking::{RankedItem, Ranking, build_ranking, validate_items};
pub use score::{MATE_OFFSET, NativeScore, Score, normalize};
