/// duelrank-core: Pure-computation Elo tournament engine.
///
/// Pairwise match scheduling → LLM judge verdicts (brought by the caller)
/// → sequential Elo fold → per-variant ratings attached to the experiment's
/// report records. No IO, no HTTP, no filesystem — just the tournament.
///
/// The caller builds the full schedule up front, dispatches every rendered
/// prompt to its judge however it likes (the `duelrank` CLI does this
/// concurrently against an OpenAI-compatible endpoint), then feeds the
/// id-aligned verdicts back for a single sequential fold.
///
/// # Quick start
///
/// ```rust
/// use duelrank_core::{
///     attach_ratings, build_schedule, fold_verdicts, CaseGroup, JudgeVerdict,
///     RatingTable, VariantKey, VariantOutput, VariantReport,
/// };
///
/// let groups = vec![CaseGroup {
///     input: "Hello world!".to_string(),
///     outputs: vec![
///         VariantOutput::new(VariantKey::new("formal"), "Bonjour le monde!"),
///         VariantOutput::new(VariantKey::new("casual"), "Salut monde!"),
///     ],
/// }];
/// let mut reports = vec![
///     VariantReport::new(VariantKey::new("formal")),
///     VariantReport::new(VariantKey::new("casual")),
/// ];
///
/// let schedule = build_schedule("Translate English to French", &groups)?;
///
/// // Judge each matchup's prompt externally. Here a stand-in judge always
/// // prefers whichever candidate was rendered as Generation A.
/// let verdicts: Vec<JudgeVerdict> = schedule
///     .iter()
///     .map(|m| JudgeVerdict { id: m.id, token: "A".to_string() })
///     .collect();
///
/// let mut table = RatingTable::from_reports(&reports);
/// fold_verdicts(&schedule, &verdicts, &mut table)?;
/// attach_ratings(&mut reports, &table);
///
/// for report in &reports {
///     let scores = report.scores.as_ref().unwrap();
///     println!("{}: {:.1}", report.variant, scores[0].value);
/// }
/// # Ok::<(), duelrank_core::EvalError>(())
/// ```

pub mod aggregate;
pub mod constants;
pub mod elo;
pub mod engine;
pub mod error;
pub mod pairing;
pub mod prompt;
pub mod types;
pub mod verdict;

// Re-export primary public API at crate root.
pub use aggregate::attach_ratings;
pub use constants::{BASELINE_RATING, K_FACTOR, RATING_METRIC};
pub use elo::{expected_score, RatingTable, VariantRating};
pub use engine::{fold_verdicts, TournamentSummary};
pub use error::EvalError;
pub use pairing::{build_schedule, total_matchups};
pub use prompt::{render_matchup, JudgePrompt, JUDGE_SYSTEM_PROMPT};
pub use types::{
    CaseGroup, JudgeVerdict, Matchup, MetricValue, VariantKey, VariantOutput, VariantReport,
};
pub use verdict::outcome_score;
