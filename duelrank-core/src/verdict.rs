/// Verdict interpretation: raw judge token → numeric outcome.

/// Map a raw verdict token to the first-rendered candidate's score.
///
/// "A" means Generation A (the matchup's `first` variant) won, "B" means
/// it lost. Every other response (empty, truncated, a refusal, or the
/// dispatcher's placeholder for a substituted failure) counts as a draw,
/// so the rating fold never sees an undefined outcome.
pub fn outcome_score(token: &str) -> f64 {
    match token.trim() {
        "A" => 1.0,
        "B" => 0.0,
        _ => 0.5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_verdicts() {
        assert_eq!(outcome_score("A"), 1.0);
        assert_eq!(outcome_score("B"), 0.0);
    }

    #[test]
    fn test_single_token_with_leading_space() {
        assert_eq!(outcome_score(" A"), 1.0);
        assert_eq!(outcome_score("B\n"), 0.0);
    }

    #[test]
    fn test_everything_else_is_a_draw() {
        assert_eq!(outcome_score(""), 0.5);
        assert_eq!(outcome_score("a"), 0.5);
        assert_eq!(outcome_score("AB"), 0.5);
        assert_eq!(outcome_score("C"), 0.5);
        assert_eq!(outcome_score("I cannot decide."), 0.5);
    }
}
