/// Experiment file loading and write-back.
///
/// The experiment file is the result repository: grouped per-variant
/// outputs plus the report records that receive the final ratings. It is
/// read once at startup and written back in place only after a successful
/// run; an aborted tournament leaves it untouched.
use duelrank_core::{CaseGroup, VariantReport};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::bail;

#[derive(Serialize, Deserialize)]
pub struct Experiment {
    /// Description of the task the variants were asked to perform; shown
    /// to the judge in every matchup.
    pub task: String,
    #[serde(default)]
    pub groups: Vec<CaseGroup>,
    #[serde(default)]
    pub reports: Vec<VariantReport>,
}

pub fn load_experiment(path: &Path) -> Experiment {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| bail(format!("Failed to read experiment file {}: {e}", path.display())));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| bail(format!("Failed to parse experiment file {}: {e}", path.display())))
}

pub fn save_experiment(path: &Path, experiment: &Experiment) {
    let content = serde_json::to_string_pretty(experiment)
        .unwrap_or_else(|e| bail(format!("Failed to serialize experiment: {e}")));
    std::fs::write(path, content)
        .unwrap_or_else(|e| bail(format!("Failed to write experiment file {}: {e}", path.display())));
}

#[cfg(test)]
mod tests {
    use super::*;
    use duelrank_core::{RatingTable, VariantKey, attach_ratings};

    const SAMPLE: &str = r#"{
        "task": "Translate the given English sentence to French",
        "groups": [
            {
                "input": "Hello world!",
                "outputs": [
                    {"variant": "formal", "text": "Bonjour le monde!", "latency_ms": 100.0, "token_usage": 5},
                    {"variant": "casual", "text": "Salut monde!"}
                ]
            }
        ],
        "reports": [
            {"variant": "formal", "scores": [{"name": "accuracy", "value": 0.95}]},
            {"variant": "casual"}
        ]
    }"#;

    #[test]
    fn test_parse_sample_experiment() {
        let experiment: Experiment = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(experiment.groups.len(), 1);
        assert_eq!(experiment.groups[0].outputs.len(), 2);
        assert_eq!(experiment.groups[0].outputs[0].latency_ms, Some(100.0));
        assert_eq!(experiment.groups[0].outputs[0].token_usage, Some(5));
        assert_eq!(experiment.groups[0].outputs[1].latency_ms, None);
        assert_eq!(experiment.reports.len(), 2);
        assert!(experiment.reports[1].scores.is_none());
    }

    #[test]
    fn test_round_trip_preserves_augmented_reports() {
        let mut experiment: Experiment = serde_json::from_str(SAMPLE).unwrap();
        let table = RatingTable::from_reports(&experiment.reports);
        attach_ratings(&mut experiment.reports, &table);

        let json = serde_json::to_string(&experiment).unwrap();
        let reloaded: Experiment = serde_json::from_str(&json).unwrap();

        let formal = &reloaded.reports[0];
        assert_eq!(formal.variant, VariantKey::new("formal"));
        let scores = formal.scores.as_ref().unwrap();
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[1].name, "elo_rating");
        assert_eq!(scores[1].value, 1200.0);
    }
}
