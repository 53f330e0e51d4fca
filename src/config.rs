//! Run-scoped configuration: the fixed item set and the detectors to run.

use std::hash::Hash;

use serde::{Deserialize, Serialize};

use rankcheck_core::{RankingError, validate_items};

/// Which comparisons a run computes once both rankings are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detectors {
    /// Report winner and choice dissonances.
    pub dissonance: bool,
    /// Compute the squared footrule distance.
    pub distance: bool,
}

impl Detectors {
    /// Run every detector.
    pub const ALL: Detectors = Detectors {
        dissonance: true,
        distance: true,
    };

    /// Only build the rankings.
    pub const NONE: Detectors = Detectors {
        dissonance: false,
        distance: false,
    };
}

impl Default for Detectors {
    fn default() -> Self {
        Self::ALL
    }
}

/// A non-empty, duplicate-free list of items in a fixed order.
///
/// Both evaluators see the items in exactly this order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ItemSet<I> {
    items: Vec<I>,
}

impl<I: Eq + Hash> ItemSet<I> {
    /// Validate `items` and fix their order.
    pub fn new(items: Vec<I>) -> Result<Self, RankingError> {
        validate_items(&items)?;
        Ok(Self { items })
    }
}

impl<I> ItemSet<I> {
    /// The items in their fixed order.
    pub fn as_slice(&self) -> &[I] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always `false`; an item set is never empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the items in order.
    pub fn iter(&self) -> std::slice::Iter<'_, I> {
        self.items.iter()
    }

    /// Give back the underlying list.
    pub fn into_inner(self) -> Vec<I> {
        self.items
    }
}

impl<I: Eq + Hash> TryFrom<Vec<I>> for ItemSet<I> {
    type Error = RankingError;

    fn try_from(items: Vec<I>) -> Result<Self, RankingError> {
        Self::new(items)
    }
}
