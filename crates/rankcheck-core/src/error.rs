//! Error types for score normalization and ranking comparison.

/// Errors raised while turning an engine-native score into a [`Score`](crate::Score).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoreError {
    /// A pawn evaluation converts to a centipawn value outside the `i32` range.
    #[error("centipawn score {centipawns} exceeds the representable bound")]
    CentipawnsOutOfRange {
        /// The offending centipawn value.
        centipawns: i64,
    },
    /// A floating-point evaluation was NaN or infinite.
    #[error("evaluation is not a finite number")]
    NonFinite,
    /// Text did not match the `cp <n>` / `mate <n>` score form.
    #[error("malformed score: \"{text}\"")]
    MalformedScore {
        /// The text that failed to parse.
        text: String,
    },
}

/// Errors raised while building or comparing rankings.
#[derive(Debug, thiserror::Error)]
pub enum RankingError {
    /// No items were supplied.
    #[error("item set is empty")]
    EmptyItemSet,
    /// The same item appears twice in the input.
    #[error("item at index {second} duplicates the item at index {first}")]
    DuplicateItem {
        /// Input index of the first occurrence.
        first: usize,
        /// Input index of the repeated occurrence.
        second: usize,
    },
    /// The two rankings cover a different number of items.
    #[error("rankings differ in size: reference has {reference} items, candidate has {candidate}")]
    ItemSetMismatch {
        /// Number of items in the reference ranking.
        reference: usize,
        /// Number of items in the candidate ranking.
        candidate: usize,
    },
    /// An item of the reference ranking is absent from the candidate ranking.
    #[error("item at input index {index} is missing from the candidate ranking")]
    MissingItem {
        /// Input index of the item within the reference ranking.
        index: usize,
    },
    /// The evaluator failed on an item. The original error is kept as the source.
    #[error("evaluator failed on item at index {index}: {source}")]
    Evaluator {
        /// Input index of the item being evaluated.
        index: usize,
        /// The evaluator's own error.
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The rank distance over this many items does not fit in a `u64`.
    #[error("rank distance over {items} items exceeds the representable bound")]
    DistanceOverflow {
        /// Number of items in each ranking.
        items: usize,
    },
}

/// Returned by a [`ScoreTable`](crate::ScoreTable) asked about an item it has no score for.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no recorded score for {item}")]
pub struct MissingScore {
    /// Debug rendering of the unknown item.
    pub item: String,
}
