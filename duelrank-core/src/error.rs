use thiserror::Error;

use crate::types::VariantKey;

/// Errors surfaced while scheduling or folding a tournament.
///
/// All of these are fatal to the evaluation run: a partial rating table is
/// not meaningful, so callers abort without writing anything back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A variant produced more than one output within the same case group.
    #[error("variant {variant} appears more than once in case group {group}")]
    DuplicateVariant { group: usize, variant: VariantKey },

    /// A matchup references a variant missing from the rating table.
    #[error("matchup references unknown variant {0}")]
    UnknownVariant(VariantKey),

    /// The judge returned a different number of verdicts than requested.
    #[error("judge returned {got} verdicts for {expected} matchups")]
    VerdictCountMismatch { expected: usize, got: usize },

    /// A verdict's request id disagrees with the matchup at its position.
    #[error("verdict at position {index} carries id {got}, expected {expected}")]
    VerdictIdMismatch {
        index: usize,
        expected: usize,
        got: usize,
    },
}
