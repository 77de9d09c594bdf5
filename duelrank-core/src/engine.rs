/// Tournament fold: replay judged matchups into the rating table.
///
/// The caller performs the judging externally (one dispatcher call over the
/// whole schedule, a single join point), then feeds the verdicts back here.
/// The fold itself is strictly sequential: each update reads the ratings
/// left behind by every earlier match, so replay order is part of the
/// result and must equal emission order. The table is exclusively owned by
/// this step; no locking, nothing else reads it mid-fold.
use crate::elo::RatingTable;
use crate::error::EvalError;
use crate::types::{JudgeVerdict, Matchup};
use crate::verdict::outcome_score;

/// What a completed fold processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TournamentSummary {
    /// Matches folded into the table.
    pub matches: usize,
    /// Matches whose verdict was neither "A" nor "B" and scored as a draw.
    pub indeterminate: usize,
}

/// Fold an id-aligned verdict batch into the table, one match at a time in
/// emission order.
///
/// The batch must line up with the schedule exactly: same length, same ids
/// in the same positions. Anything else means the dispatcher lost or
/// reordered a response, and guessing which verdict belongs to which match
/// would corrupt every rating after the gap, so misalignment is fatal.
pub fn fold_verdicts(
    schedule: &[Matchup],
    verdicts: &[JudgeVerdict],
    table: &mut RatingTable,
) -> Result<TournamentSummary, EvalError> {
    if schedule.len() != verdicts.len() {
        return Err(EvalError::VerdictCountMismatch {
            expected: schedule.len(),
            got: verdicts.len(),
        });
    }

    let mut summary = TournamentSummary::default();
    for (index, (matchup, verdict)) in schedule.iter().zip(verdicts).enumerate() {
        if matchup.id != verdict.id {
            return Err(EvalError::VerdictIdMismatch {
                index,
                expected: matchup.id,
                got: verdict.id,
            });
        }

        let score = outcome_score(&verdict.token);
        if score == 0.5 {
            summary.indeterminate += 1;
        }
        table.apply_match(&matchup.first, &matchup.second, score)?;
        summary.matches += 1;
    }

    Ok(summary)
}
