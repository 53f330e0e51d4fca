//! Ascending-by-score rankings of a fixed item set.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt::Debug;
use std::hash::Hash;

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::error::RankingError;
use crate::evaluator::Evaluator;
use crate::score::{Score, normalize};

/// One item of a ranking together with its normalized score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedItem<I> {
    /// The ranked item.
    pub item: I,
    /// Its normalized score.
    pub score: Score,
    /// Where the item appeared in the input list.
    pub input_index: usize,
}

/// Items sorted ascending by normalized score, ties in input order.
///
/// Each item appears exactly once. Position lookups go through a map built
/// once at construction, so comparisons never rescan the entries.
#[derive(Debug, Clone)]
pub struct Ranking<I> {
    entries: Vec<RankedItem<I>>,
    /// Item -> position in `entries`.
    positions: HashMap<I, usize>,
    /// Input index -> position in `entries`.
    by_input: Vec<usize>,
}

impl<I: Clone + Eq + Hash> Ranking<I> {
    /// Build a ranking from already-normalized scores, listed in input order.
    ///
    /// The sort is stable: items with equal scores keep their input order.
    pub fn from_scores<T>(scores: T) -> Result<Self, RankingError>
    where
        T: IntoIterator<Item = (I, Score)>,
    {
        let mut entries: Vec<RankedItem<I>> = scores
            .into_iter()
            .enumerate()
            .map(|(input_index, (item, score))| RankedItem {
                item,
                score,
                input_index,
            })
            .collect();
        if entries.is_empty() {
            return Err(RankingError::EmptyItemSet);
        }

        entries.sort_by_key(|entry| entry.score);

        let mut positions: HashMap<I, usize> = HashMap::with_capacity(entries.len());
        let mut by_input = vec![0; entries.len()];
        for (position, entry) in entries.iter().enumerate() {
            match positions.entry(entry.item.clone()) {
                Entry::Occupied(seen) => {
                    let other = entries[*seen.get()].input_index;
                    return Err(RankingError::DuplicateItem {
                        first: other.min(entry.input_index),
                        second: other.max(entry.input_index),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(position);
                }
            }
            by_input[entry.input_index] = position;
        }

        Ok(Self {
            entries,
            positions,
            by_input,
        })
    }
}

impl<I> Ranking<I> {
    /// Number of ranked items.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: a ranking covers a non-empty item set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries from lowest to highest score.
    pub fn iter(&self) -> std::slice::Iter<'_, RankedItem<I>> {
        self.entries.iter()
    }

    /// Entries from lowest to highest score, as a slice.
    pub fn entries(&self) -> &[RankedItem<I>] {
        &self.entries
    }

    /// Items from lowest to highest score.
    pub fn items(&self) -> impl Iterator<Item = &I> {
        self.entries.iter().map(|entry| &entry.item)
    }

    /// Entries in the order the items were originally supplied.
    pub fn input_order(&self) -> impl Iterator<Item = &RankedItem<I>> {
        self.by_input.iter().map(|&position| &self.entries[position])
    }
}

impl<I: Eq + Hash> Ranking<I> {
    /// Zero-based position of `item` in the ranking.
    #[inline]
    pub fn position_of(&self, item: &I) -> Option<usize> {
        self.positions.get(item).copied()
    }

    /// Normalized score of `item`.
    pub fn score_of(&self, item: &I) -> Option<Score> {
        self.position_of(item)
            .map(|position| self.entries[position].score)
    }
}

/// Serializes as the list of entries, lowest score first.
impl<I: Serialize> Serialize for Ranking<I> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'a, I> IntoIterator for &'a Ranking<I> {
    type Item = &'a RankedItem<I>;
    type IntoIter = std::slice::Iter<'a, RankedItem<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Check that `items` is non-empty and free of duplicates.
pub fn validate_items<I: Eq + Hash>(items: &[I]) -> Result<(), RankingError> {
    if items.is_empty() {
        return Err(RankingError::EmptyItemSet);
    }
    let mut seen = HashMap::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        if let Some(first) = seen.insert(item, index) {
            return Err(RankingError::DuplicateItem {
                first,
                second: index,
            });
        }
    }
    Ok(())
}

/// Evaluate every item in input order and rank the results.
///
/// The item list is validated before the evaluator is called. The first
/// evaluator failure aborts the build and is returned unchanged inside
/// [`RankingError::Evaluator`]; no partial ranking is produced.
pub fn build_ranking<I, E>(items: &[I], evaluator: &mut E) -> Result<Ranking<I>, RankingError>
where
    I: Clone + Eq + Hash + Debug,
    E: Evaluator<I> + ?Sized,
{
    validate_items(items)?;

    let mut scores = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let native = evaluator
            .evaluate(item)
            .map_err(|source| RankingError::Evaluator {
                index,
                source: Box::new(source),
            })?;
        let score = normalize(native);
        debug!(index, ?item, %native, %score, "evaluated item");
        scores.push((item.clone(), score));
    }

    Ranking::from_scores(scores)
}

/// Scores and positions of one item in two rankings.
#[derive(Debug)]
pub(crate) struct Aligned<'a, I> {
    pub item: &'a I,
    pub reference_position: usize,
    pub reference_score: Score,
    pub candidate_position: usize,
    pub candidate_score: Score,
}

/// Pair up every item of `reference` with its entry in `candidate`.
///
/// Fails unless both rankings cover exactly the same items. The result
/// follows the reference ranking's input order.
pub(crate) fn align<'a, I: Eq + Hash>(
    reference: &'a Ranking<I>,
    candidate: &'a Ranking<I>,
) -> Result<Vec<Aligned<'a, I>>, RankingError> {
    if reference.len() != candidate.len() {
        return Err(RankingError::ItemSetMismatch {
            reference: reference.len(),
            candidate: candidate.len(),
        });
    }

    // Equal sizes and no missing items means equal sets: both sides are
    // duplicate-free by construction.
    reference
        .by_input
        .iter()
        .map(|&reference_position| -> Result<Aligned<'a, I>, RankingError> {
            let entry = &reference.entries[reference_position];
            let candidate_position = candidate.position_of(&entry.item).ok_or(
                RankingError::MissingItem {
                    index: entry.input_index,
                },
            )?;
            Ok(Aligned {
                item: &entry.item,
                reference_position,
                reference_score: entry.score,
                candidate_position,
                candidate_score: candidate.entries[candidate_position].score,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fmt;

    use super::*;
    use crate::evaluator::ScoreTable;
    use crate::score::NativeScore;

    fn table(scores: &[(&'static str, i32)]) -> ScoreTable<&'static str> {
        scores
            .iter()
            .map(|&(item, cp)| (item, NativeScore::Centipawns(cp)))
            .collect()
    }

    fn ranked_items(ranking: &Ranking<&'static str>) -> Vec<&'static str> {
        ranking.items().copied().collect()
    }

    #[derive(Debug)]
    struct EngineCrashed;

    impl fmt::Display for EngineCrashed {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "engine crashed")
        }
    }

    impl std::error::Error for EngineCrashed {}

    /// Scores items by length, crashing on a chosen item.
    struct Flaky {
        crash_on: &'static str,
        calls: usize,
    }

    impl Evaluator<&'static str> for Flaky {
        type Error = EngineCrashed;

        fn evaluate(&mut self, item: &&'static str) -> Result<NativeScore, EngineCrashed> {
            self.calls += 1;
            if *item == self.crash_on {
                return Err(EngineCrashed);
            }
            Ok(NativeScore::Centipawns(item.len() as i32))
        }
    }

    // --- Building ---

    #[test]
    fn sorts_ascending_by_score() {
        let items = vec!["p1", "p2", "p3"];
        let mut scores = table(&[("p1", 200), ("p2", -50), ("p3", 0)]);
        let ranking = build_ranking(&items, &mut scores).unwrap();
        assert_eq!(ranked_items(&ranking), vec!["p2", "p3", "p1"]);
        assert_eq!(ranking.len(), 3);
    }

    #[test]
    fn ties_keep_input_order() {
        let items = vec!["d", "a", "c", "b"];
        let mut scores = table(&[("a", 10), ("b", 10), ("c", -5), ("d", 10)]);
        let ranking = build_ranking(&items, &mut scores).unwrap();
        assert_eq!(ranked_items(&ranking), vec!["c", "d", "a", "b"]);
    }

    #[test]
    fn mate_scores_rank_beyond_centipawns() {
        let items = vec!["mated", "winning", "mating", "losing"];
        let mut scores: ScoreTable<&str> = [
            ("mated", NativeScore::MatedIn(2)),
            ("winning", NativeScore::Centipawns(900)),
            ("mating", NativeScore::MateIn(3)),
            ("losing", NativeScore::Centipawns(-900)),
        ]
        .into_iter()
        .collect();
        let ranking = build_ranking(&items, &mut scores).unwrap();
        assert_eq!(
            ranked_items(&ranking),
            vec!["mated", "losing", "winning", "mating"]
        );
    }

    #[test]
    fn lookups_match_positions() {
        let items = vec!["p1", "p2", "p3"];
        let mut scores = table(&[("p1", 3), ("p2", 1), ("p3", 2)]);
        let ranking = build_ranking(&items, &mut scores).unwrap();
        assert_eq!(ranking.position_of(&"p2"), Some(0));
        assert_eq!(ranking.position_of(&"p1"), Some(2));
        assert_eq!(ranking.position_of(&"p4"), None);
        assert_eq!(ranking.score_of(&"p3").map(Score::value), Some(2));
    }

    #[test]
    fn input_order_is_recoverable() {
        let items = vec!["p1", "p2", "p3"];
        let mut scores = table(&[("p1", 3), ("p2", 1), ("p3", 2)]);
        let ranking = build_ranking(&items, &mut scores).unwrap();
        let original: Vec<_> = ranking.input_order().map(|entry| entry.item).collect();
        assert_eq!(original, items);
        let indices: Vec<_> = ranking.input_order().map(|entry| entry.input_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    // --- Invalid input ---

    #[test]
    fn empty_item_set_is_rejected() {
        let items: Vec<&str> = Vec::new();
        let err = build_ranking(&items, &mut table(&[])).unwrap_err();
        assert!(matches!(err, RankingError::EmptyItemSet));
    }

    #[test]
    fn duplicates_are_rejected_before_evaluating() {
        let items = vec!["p1", "p2", "p1"];
        let mut flaky = Flaky {
            crash_on: "none",
            calls: 0,
        };
        let err = build_ranking(&items, &mut flaky).unwrap_err();
        assert!(matches!(
            err,
            RankingError::DuplicateItem {
                first: 0,
                second: 2
            }
        ));
        assert_eq!(flaky.calls, 0, "evaluator must not run on invalid input");
    }

    #[test]
    fn from_scores_reports_duplicates_by_input_index() {
        let scores = vec![("a", Score::ZERO), ("b", Score::MIN), ("a", Score::MAX)];
        let err = Ranking::from_scores(scores).unwrap_err();
        assert!(matches!(
            err,
            RankingError::DuplicateItem {
                first: 0,
                second: 2
            }
        ));
    }

    // --- Failures ---

    #[test]
    fn evaluator_failure_propagates_unchanged() {
        let items = vec!["a", "bb", "ccc"];
        let mut flaky = Flaky {
            crash_on: "bb",
            calls: 0,
        };
        let err = build_ranking(&items, &mut flaky).unwrap_err();
        match err {
            RankingError::Evaluator { index, source } => {
                assert_eq!(index, 1);
                assert!(source.downcast_ref::<EngineCrashed>().is_some());
            }
            other => panic!("expected evaluator failure, got {other:?}"),
        }
        assert_eq!(flaky.calls, 2, "evaluation stops at the first failure");
    }

    #[test]
    fn extreme_native_scores_rank_without_error() {
        let items = vec!["p1", "p2", "p3", "p4"];
        let mut scores: ScoreTable<&str> = [
            ("p1", NativeScore::MateIn(u32::MAX)),
            ("p2", NativeScore::Centipawns(i32::MAX)),
            ("p3", NativeScore::MatedIn(u32::MAX)),
            ("p4", NativeScore::Centipawns(i32::MIN)),
        ]
        .into_iter()
        .collect();
        let ranking = build_ranking(&items, &mut scores).unwrap();
        let order: Vec<_> = ranking.items().copied().collect();
        assert_eq!(order, vec!["p3", "p4", "p2", "p1"]);
    }

    // --- Alignment ---

    #[test]
    fn align_rejects_different_sizes() {
        let small = Ranking::from_scores(vec![("a", Score::ZERO)]).unwrap();
        let large = Ranking::from_scores(vec![("a", Score::ZERO), ("b", Score::ZERO)]).unwrap();
        assert!(matches!(
            align(&small, &large),
            Err(RankingError::ItemSetMismatch {
                reference: 1,
                candidate: 2
            })
        ));
    }

    #[test]
    fn align_rejects_different_items() {
        let left = Ranking::from_scores(vec![("a", Score::ZERO), ("b", Score::ZERO)]).unwrap();
        let right = Ranking::from_scores(vec![("a", Score::ZERO), ("c", Score::ZERO)]).unwrap();
        assert!(matches!(
            align(&left, &right),
            Err(RankingError::MissingItem { index: 1 })
        ));
    }

    #[test]
    fn align_follows_reference_input_order() {
        let reference = Ranking::from_scores(vec![("x", Score::MAX), ("y", Score::MIN)]).unwrap();
        let candidate = Ranking::from_scores(vec![("y", Score::ZERO), ("x", Score::MIN)]).unwrap();
        let aligned = align(&reference, &candidate).unwrap();
        let items: Vec<_> = aligned.iter().map(|a| *a.item).collect();
        assert_eq!(items, vec!["x", "y"]);
        assert_eq!(aligned[0].reference_position, 1);
        assert_eq!(aligned[0].candidate_position, 0);
        assert_eq!(aligned[1].candidate_score, Score::ZERO);
    }
}
