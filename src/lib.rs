//! Validate a position evaluator against a reference by comparing the
//! rankings the two induce over a fixed set of test positions.

mod config;
mod error;
mod harness;
mod report;

pub use config::{Detectors, ItemSet};
pub use error::HarnessError;
pub use harness::Harness;
pub use report::Report;

pub use rankcheck_core::{
    ChoiceDissonance, Dissonances, Evaluator, MATE_OFFSET, MissingScore, NativeScore, RankedItem,
    Ranking, RankingError, Score, ScoreError, ScoreTable, WinnerDissonance, build_ranking, detect,
    distance, max_distance, normalize, validate_items,
};
