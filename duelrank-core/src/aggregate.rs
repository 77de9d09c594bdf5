/// Write final ratings back onto the experiment's variant reports.
use crate::constants::RATING_METRIC;
use crate::elo::RatingTable;
use crate::types::{MetricValue, VariantReport};

/// Append each variant's final rating to its report as an `elo_rating`
/// metric, creating the metric list where a report has none yet.
///
/// Every call appends: running an evaluation twice over the same reports
/// leaves two `elo_rating` entries. Callers that want a single value clear
/// prior entries before re-evaluating.
pub fn attach_ratings(reports: &mut [VariantReport], table: &RatingTable) {
    for report in reports.iter_mut() {
        if let Some(rating) = table.rating(&report.variant) {
            report
                .scores
                .get_or_insert_with(Vec::new)
                .push(MetricValue {
                    name: RATING_METRIC.to_string(),
                    value: rating,
                });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::BASELINE_RATING;
    use crate::types::VariantKey;

    #[test]
    fn test_attach_initializes_missing_metric_list() {
        let mut reports = vec![VariantReport::new(VariantKey::new("a"))];
        let table = RatingTable::from_reports(&reports);

        attach_ratings(&mut reports, &table);

        let scores = reports[0].scores.as_ref().unwrap();
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].name, RATING_METRIC);
        assert_eq!(scores[0].value, BASELINE_RATING);
    }

    #[test]
    fn test_attach_preserves_existing_metrics() {
        let mut report = VariantReport::new(VariantKey::new("a"));
        report.scores = Some(vec![MetricValue {
            name: "accuracy".to_string(),
            value: 0.95,
        }]);
        let mut reports = vec![report];
        let table = RatingTable::from_reports(&reports);

        attach_ratings(&mut reports, &table);

        let scores = reports[0].scores.as_ref().unwrap();
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].name, "accuracy");
        assert_eq!(scores[1].name, RATING_METRIC);
    }

    #[test]
    fn test_reattach_appends_a_second_entry() {
        let mut reports = vec![VariantReport::new(VariantKey::new("a"))];
        let table = RatingTable::from_reports(&reports);

        attach_ratings(&mut reports, &table);
        attach_ratings(&mut reports, &table);

        let ratings: Vec<&MetricValue> = reports[0]
            .scores
            .as_ref()
            .unwrap()
            .iter()
            .filter(|m| m.name == RATING_METRIC)
            .collect();
        assert_eq!(ratings.len(), 2);
    }
}
