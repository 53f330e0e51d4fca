//! Wires a fixed item set and two evaluators into a comparison report.

use std::fmt::Debug;
use std::hash::Hash;

use tracing::{info, warn};

use rankcheck_core::{Evaluator, build_ranking, detect, distance};

use crate::config::{Detectors, ItemSet};
use crate::error::HarnessError;
use crate::report::Report;

/// Compares a candidate evaluator against a reference over one item set.
///
/// The harness holds no state between runs; the same harness may run
/// several evaluator pairs, and independent harnesses may run concurrently.
#[derive(Debug, Clone)]
pub struct Harness<I> {
    items: ItemSet<I>,
    detectors: Detectors,
}

impl<I> Harness<I>
where
    I: Clone + Eq + Hash + Debug,
{
    /// Create a harness running every detector over `items`.
    pub fn new(items: ItemSet<I>) -> Self {
        Self {
            items,
            detectors: Detectors::default(),
        }
    }

    /// Choose which detectors run.
    pub fn with_detectors(mut self, detectors: Detectors) -> Self {
        self.detectors = detectors;
        self
    }

    /// The fixed item set.
    pub fn items(&self) -> &ItemSet<I> {
        &self.items
    }

    /// The detectors each run computes.
    pub fn detectors(&self) -> Detectors {
        self.detectors
    }

    /// Rank the items with both evaluators, then compare the rankings.
    ///
    /// The reference ranking is built first, then the candidate ranking; both
    /// are complete before any comparison starts. The first evaluator
    /// failure aborts the run.
    pub fn run<R, C>(&self, reference: &mut R, candidate: &mut C) -> Result<Report<I>, HarnessError>
    where
        R: Evaluator<I> + ?Sized,
        C: Evaluator<I> + ?Sized,
    {
        let items = self.items.as_slice();

        let reference = build_ranking(items, reference).map_err(|source| {
            warn!(error = %source, "reference evaluation failed, aborting run");
            HarnessError::Reference { source }
        })?;
        let candidate = build_ranking(items, candidate).map_err(|source| {
            warn!(error = %source, "candidate evaluation failed, aborting run");
            HarnessError::Candidate { source }
        })?;

        let dissonances = if self.detectors.dissonance {
            Some(detect(&reference, &candidate)?)
        } else {
            None
        };
        let distance = if self.detectors.distance {
            Some(distance(&reference, &candidate)?)
        } else {
            None
        };

        info!(
            items = items.len(),
            winner_dissonances = dissonances.as_ref().map(|d| d.winner.len()),
            choice_dissonances = dissonances.as_ref().map(|d| d.choice.len()),
            distance,
            "comparison complete"
        );

        Ok(Report {
            reference,
            candidate,
            dissonances,
            distance,
        })
    }
}
