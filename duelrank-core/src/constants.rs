/// K-factor for the Elo update. 32 keeps ratings responsive over the small
/// match counts a single experiment produces.
pub const K_FACTOR: f64 = 32.0;

/// Rating assigned to every variant before any match is folded in.
/// Variants that never get compared keep exactly this value, which is the
/// "insufficient data to rank" signal.
pub const BASELINE_RATING: f64 = 1200.0;

/// Name under which the final rating is attached to each variant report.
pub const RATING_METRIC: &str = "elo_rating";
