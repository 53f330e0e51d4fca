//! The evaluator capability consumed by the ranking builder.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::MissingScore;
use crate::score::NativeScore;

/// Something that can score an item, e.g. an engine adapter.
///
/// Calls may be slow. A failure must come back as an error, never as a
/// made-up score; the ranking builder propagates it unchanged.
pub trait Evaluator<I: ?Sized> {
    /// The evaluator's own failure type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Score `item` relative to the side to move.
    fn evaluate(&mut self, item: &I) -> Result<NativeScore, Self::Error>;
}

impl<I, F, E> Evaluator<I> for F
where
    I: ?Sized,
    F: FnMut(&I) -> Result<NativeScore, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    type Error = E;

    #[inline]
    fn evaluate(&mut self, item: &I) -> Result<NativeScore, E> {
        self(item)
    }
}

/// Evaluator backed by previously recorded scores.
///
/// Useful for replaying a reference engine's results without running it
/// again. Unknown items fail with [`MissingScore`].
#[derive(Debug, Clone)]
pub struct ScoreTable<I> {
    scores: HashMap<I, NativeScore>,
}

impl<I: Eq + Hash> ScoreTable<I> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            scores: HashMap::new(),
        }
    }

    /// Record the score for `item`, returning the one it replaces.
    pub fn insert(&mut self, item: I, score: NativeScore) -> Option<NativeScore> {
        self.scores.insert(item, score)
    }

    /// Look up the recorded score for `item`.
    pub fn get(&self, item: &I) -> Option<NativeScore> {
        self.scores.get(item).copied()
    }

    /// Number of recorded scores.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl<I: Eq + Hash> Default for ScoreTable<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Eq + Hash> FromIterator<(I, NativeScore)> for ScoreTable<I> {
    fn from_iter<T: IntoIterator<Item = (I, NativeScore)>>(iter: T) -> Self {
        Self {
            scores: iter.into_iter().collect(),
        }
    }
}

impl<I: Eq + Hash + Debug> Evaluator<I> for ScoreTable<I> {
    type Error = MissingScore;

    fn evaluate(&mut self, item: &I) -> Result<NativeScore, MissingScore> {
        self.get(item).ok_or_else(|| MissingScore {
            item: format!("{item:?}"),
        })
    }
}
