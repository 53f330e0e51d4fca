//! The comparison report returned by a harness run.

use serde::Serialize;

use rankcheck_core::{Dissonances, Ranking};

/// Everything one run found. Only produced when the whole run succeeded.
#[derive(Debug, Clone, Serialize)]
pub struct Report<I> {
    /// Items ranked by the reference evaluator.
    pub reference: Ranking<I>,
    /// Items ranked by the candidate evaluator.
    pub candidate: Ranking<I>,
    /// Winner and choice dissonances, if that detector ran.
    pub dissonances: Option<Dissonances<I>>,
    /// Squared footrule distance, if that detector ran.
    pub distance: Option<u64>,
}

impl<I> Report<I> {
    /// Number of ranked items.
    pub fn len(&self) -> usize {
        self.reference.len()
    }

    /// Always `false`; runs cover a non-empty item set.
    pub fn is_empty(&self) -> bool {
        self.reference.is_empty()
    }

    /// True when every detector that ran found full agreement.
    pub fn is_consonant(&self) -> bool {
        self.dissonances.as_ref().is_none_or(Dissonances::is_empty)
            && self.distance.is_none_or(|distance| distance == 0)
    }
}
