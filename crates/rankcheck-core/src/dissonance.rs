//! Structural disagreements between a reference ranking and a candidate ranking.
//!
//! Two kinds are reported:
//!
//! * **Winner dissonance**: for one item, the two evaluators disagree on
//!   whether the side to move stands at least level (`score >= 0`).
//! * **Choice dissonance**: for a pair of items, the two rankings order them
//!   differently. Equal scores in either ranking agree with any order.

use std::fmt::Debug;
use std::hash::Hash;

use serde::Serialize;
use tracing::debug;

use crate::error::RankingError;
use crate::ranking::{Aligned, Ranking, align};
use crate::score::Score;

/// An item whose evaluations disagree on sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WinnerDissonance<I> {
    /// The item in question.
    pub item: I,
    /// Its score in the reference ranking.
    pub reference: Score,
    /// Its score in the candidate ranking.
    pub candidate: Score,
}

/// A pair of items the two rankings order differently.
///
/// `first` precedes `second` in the input item order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceDissonance<I> {
    /// Earlier item of the pair.
    pub first: I,
    /// Later item of the pair.
    pub second: I,
    /// Reference score of `first`.
    pub first_reference: Score,
    /// Candidate score of `first`.
    pub first_candidate: Score,
    /// Reference score of `second`.
    pub second_reference: Score,
    /// Candidate score of `second`.
    pub second_candidate: Score,
}

/// All dissonances found between two rankings.
///
/// Winner dissonances follow the input item order; choice dissonances follow
/// pair order `(0, 1), (0, 2), ..., (1, 2), ...` over the input items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dissonances<I> {
    /// Per-item sign disagreements.
    pub winner: Vec<WinnerDissonance<I>>,
    /// Per-pair order disagreements.
    pub choice: Vec<ChoiceDissonance<I>>,
}

impl<I> Dissonances<I> {
    /// Returns `true` if neither kind of dissonance was found.
    pub fn is_empty(&self) -> bool {
        self.winner.is_empty() && self.choice.is_empty()
    }
}

/// Compare `reference` and `candidate` item by item and pair by pair.
///
/// Both rankings must cover exactly the same items; otherwise an
/// [`RankingError::ItemSetMismatch`] or [`RankingError::MissingItem`] is
/// returned. Runs in O(n²) over the item pairs with O(1) position lookups.
pub fn detect<I>(
    reference: &Ranking<I>,
    candidate: &Ranking<I>,
) -> Result<Dissonances<I>, RankingError>
where
    I: Clone + Eq + Hash + Debug,
{
    let aligned = align(reference, candidate)?;

    let winner: Vec<_> = aligned
        .iter()
        .filter(|a| a.reference_score.is_non_negative() != a.candidate_score.is_non_negative())
        .map(|a| {
            debug!(
                item = ?a.item,
                reference = %a.reference_score,
                candidate = %a.candidate_score,
                "winner dissonance"
            );
            WinnerDissonance {
                item: a.item.clone(),
                reference: a.reference_score,
                candidate: a.candidate_score,
            }
        })
        .collect();

    let mut choice = Vec::new();
    for (i, a) in aligned.iter().enumerate() {
        for b in &aligned[i + 1..] {
            if consonant(a, b) {
                continue;
            }
            debug!(first = ?a.item, second = ?b.item, "choice dissonance");
            choice.push(ChoiceDissonance {
                first: a.item.clone(),
                second: b.item.clone(),
                first_reference: a.reference_score,
                first_candidate: a.candidate_score,
                second_reference: b.reference_score,
                second_candidate: b.candidate_score,
            });
        }
    }

    Ok(Dissonances { winner, choice })
}

/// Both rankings agree that `a` is at-or-below `b`, or that `b` is at-or-below `a`.
///
/// Scores rather than positions are compared so that a tie in either
/// ranking never counts against the pair.
fn consonant<I>(a: &Aligned<'_, I>, b: &Aligned<'_, I>) -> bool {
    (a.reference_score <= b.reference_score && a.candidate_score <= b.candidate_score)
        || (b.reference_score <= a.reference_score && b.candidate_score <= a.candidate_score)
}
