//! Harness errors.

use rankcheck_core::RankingError;

/// Errors that abort a comparison run. No report accompanies them.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// The reference ranking could not be built.
    #[error("reference evaluation failed: {source}")]
    Reference {
        /// Why the build failed.
        source: RankingError,
    },

    /// The candidate ranking could not be built.
    #[error("candidate evaluation failed: {source}")]
    Candidate {
        /// Why the build failed.
        source: RankingError,
    },

    /// The rankings could not be compared.
    #[error("comparison failed: {source}")]
    Comparison {
        /// The underlying ranking error.
        #[from]
        source: RankingError,
    },
}

impl HarnessError {
    /// The evaluator's own error, if an evaluator call caused the failure.
    pub fn evaluator_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            HarnessError::Reference { source } | HarnessError::Candidate { source } => {
                match source {
                    RankingError::Evaluator { source, .. } => Some(&**source),
                    _ => None,
                }
            }
            HarnessError::Comparison { .. } => None,
        }
    }
}
