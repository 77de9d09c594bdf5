/// Incremental Elo rating over variant keys.
///
/// One table per evaluation run, owned and mutated exclusively by the
/// sequential fold. Never a shared global, so parallel test runs and
/// concurrent evaluations cannot interfere.
use std::collections::HashMap;

use crate::constants::{BASELINE_RATING, K_FACTOR};
use crate::error::EvalError;
use crate::types::{VariantKey, VariantReport};

/// Logistic expected score of a player rated `r1` against one rated `r2`.
pub fn expected_score(r1: f64, r2: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((r2 - r1) / 400.0))
}

/// A variant's current standing: rating plus how many matches produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariantRating {
    pub rating: f64,
    pub games: usize,
}

/// Mapping from variant key to current rating, seeded at the baseline for
/// every variant in the experiment's report listing.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingTable {
    entries: HashMap<VariantKey, VariantRating>,
}

impl RatingTable {
    /// Seed a table at the baseline rating for the given keys.
    pub fn new(keys: impl IntoIterator<Item = VariantKey>) -> Self {
        let entries = keys
            .into_iter()
            .map(|key| {
                (
                    key,
                    VariantRating {
                        rating: BASELINE_RATING,
                        games: 0,
                    },
                )
            })
            .collect();
        RatingTable { entries }
    }

    /// Seed a table from the experiment's report listing: the set of
    /// variants that receive a rating, whether or not any group compares
    /// them.
    pub fn from_reports(reports: &[VariantReport]) -> Self {
        Self::new(reports.iter().map(|r| r.variant.clone()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn rating(&self, key: &VariantKey) -> Option<f64> {
        self.entries.get(key).map(|e| e.rating)
    }

    pub fn games(&self, key: &VariantKey) -> Option<usize> {
        self.entries.get(key).map(|e| e.games)
    }

    /// Fold one resolved match into the table. `score_first` is the
    /// first-rendered variant's outcome (1.0 win, 0.0 loss, 0.5 draw).
    ///
    /// Both expectations are computed from the pre-update ratings, then
    /// both new ratings are written. The update is symmetric and preserves
    /// total rating mass when the two scores sum to one.
    pub fn apply_match(
        &mut self,
        first: &VariantKey,
        second: &VariantKey,
        score_first: f64,
    ) -> Result<(), EvalError> {
        let r1 = self
            .rating(first)
            .ok_or_else(|| EvalError::UnknownVariant(first.clone()))?;
        let r2 = self
            .rating(second)
            .ok_or_else(|| EvalError::UnknownVariant(second.clone()))?;

        let e1 = expected_score(r1, r2);
        let e2 = expected_score(r2, r1);

        self.set(first, r1 + K_FACTOR * (score_first - e1));
        self.set(second, r2 + K_FACTOR * ((1.0 - score_first) - e2));
        Ok(())
    }

    fn set(&mut self, key: &VariantKey, rating: f64) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.rating = rating;
            entry.games += 1;
        }
    }

    /// Final standings, best rating first. Ties break on the key so the
    /// ordering is deterministic.
    pub fn standings(&self) -> Vec<(VariantKey, VariantRating)> {
        let mut rows: Vec<(VariantKey, VariantRating)> = self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        rows.sort_by(|(ka, va), (kb, vb)| {
            vb.rating
                .partial_cmp(&va.rating)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| ka.cmp(kb))
        });
        rows
    }
}
