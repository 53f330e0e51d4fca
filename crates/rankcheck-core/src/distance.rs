//! Squared footrule distance between two rankings of the same items.

use std::hash::Hash;

use crate::error::RankingError;
use crate::ranking::{Ranking, align};

/// Sum over all items of the squared difference between their positions.
///
/// Zero means identical order. Squaring makes one badly misplaced item
/// weigh more than many neighbouring swaps. The value is not normalized by
/// the item count, so only distances over equally sized item sets compare.
///
/// Fails with [`RankingError::DistanceOverflow`] when the sum does not fit in
/// a `u64`, which needs several million items.
pub fn distance<I: Eq + Hash>(a: &Ranking<I>, b: &Ranking<I>) -> Result<u64, RankingError> {
    let aligned = align(a, b)?;
    let overflow = || RankingError::DistanceOverflow {
        items: aligned.len(),
    };
    aligned.iter().try_fold(0u64, |total, x| {
        let shift = x.reference_position.abs_diff(x.candidate_position) as u64;
        shift
            .checked_mul(shift)
            .and_then(|square| total.checked_add(square))
            .ok_or_else(overflow)
    })
}

/// Largest possible [`distance`] over `n` items, reached by a full reversal.
///
/// Equals `n(n² - 1) / 3`, or `None` once that no longer fits in a `u64`.
pub fn max_distance(n: usize) -> Option<u64> {
    let n = u64::try_from(n).ok()?;
    if n == 0 {
        return Some(0);
    }
    // One of three consecutive integers is a multiple of three; divide it
    // out first so the product only overflows when the result does.
    let mut factors = [n - 1, n, n.checked_add(1)?];
    if let Some(factor) = factors.iter_mut().find(|f| **f % 3 == 0) {
        *factor /= 3;
    }
    factors
        .into_iter()
        .try_fold(1u64, |product, factor| product.checked_mul(factor))
}
