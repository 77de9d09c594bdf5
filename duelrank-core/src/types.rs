use std::fmt;

use crate::prompt::JudgePrompt;

/// Separator between `key=value` pairs in a canonical variant key.
/// A control character keeps formatting variations in config values from
/// colliding with the separator itself.
const CONFIG_KEY_SEPARATOR: char = '\u{1f}';

/// Stable string identity for one variant (one prompt/model configuration
/// under evaluation).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct VariantKey(String);

impl VariantKey {
    pub fn new(key: impl Into<String>) -> Self {
        VariantKey(key.into())
    }

    /// Canonical key for a configuration map: pairs sorted by name and
    /// joined as `key=value`. Two configurations with the same entries get
    /// the same key regardless of the order the caller lists them in, and
    /// the key never depends on any `Debug`/`format!` rendering of the
    /// configuration object.
    pub fn from_config<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut sorted: Vec<(&str, &str)> = pairs.into_iter().collect();
        sorted.sort_unstable();

        let mut key = String::new();
        for (i, (name, value)) in sorted.iter().enumerate() {
            if i > 0 {
                key.push(CONFIG_KEY_SEPARATOR);
            }
            key.push_str(name);
            key.push('=');
            key.push_str(value);
        }
        VariantKey(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One variant's output for one shared input. Read-only to the tournament;
/// the metadata rides along from whatever produced the output.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariantOutput {
    pub variant: VariantKey,
    pub text: String,
    /// Generation latency in milliseconds, if recorded.
    #[cfg_attr(feature = "serde", serde(default))]
    pub latency_ms: Option<f64>,
    /// Tokens spent producing the output, if recorded.
    #[cfg_attr(feature = "serde", serde(default))]
    pub token_usage: Option<u64>,
}

impl VariantOutput {
    pub fn new(variant: VariantKey, text: impl Into<String>) -> Self {
        VariantOutput {
            variant,
            text: text.into(),
            latency_ms: None,
            token_usage: None,
        }
    }
}

/// The per-variant outputs produced for one shared input. The input text is
/// the group's identity and is also what the judge sees.
///
/// Invariant: a variant appears at most once per group. `build_schedule`
/// rejects groups that violate this.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CaseGroup {
    pub input: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub outputs: Vec<VariantOutput>,
}

/// A named float metric on a variant report.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricValue {
    pub name: String,
    pub value: f64,
}

/// A variant's record in the experiment results. The listing of reports
/// defines which variants enter the tournament; `attach_ratings` appends
/// the final rating to `scores`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariantReport {
    pub variant: VariantKey,
    #[cfg_attr(feature = "serde", serde(default))]
    pub scores: Option<Vec<MetricValue>>,
}

impl VariantReport {
    pub fn new(variant: VariantKey) -> Self {
        VariantReport {
            variant,
            scores: None,
        }
    }
}

/// One ordered rendering of a pair: `first` is shown to the judge as
/// Generation A, `second` as Generation B. Ids are sequential in emission
/// order and correlate verdicts back to their matchup.
///
/// Consumed once by the dispatcher; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Matchup {
    pub id: usize,
    pub first: VariantKey,
    pub second: VariantKey,
    pub prompt: JudgePrompt,
}

/// The judge's raw response for one matchup, tagged with the matchup id it
/// answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JudgeVerdict {
    pub id: usize,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_key_is_order_independent() {
        let a = VariantKey::from_config([("style", "formal"), ("model", "gpt-4")]);
        let b = VariantKey::from_config([("model", "gpt-4"), ("style", "formal")]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_config_key_distinguishes_values() {
        let a = VariantKey::from_config([("style", "formal")]);
        let b = VariantKey::from_config([("style", "casual")]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_config_key_no_separator_collision() {
        // "a=b" as a value must not collide with a second pair
        let a = VariantKey::from_config([("x", "a=b")]);
        let b = VariantKey::from_config([("x", "a"), ("b", "")]);
        assert_ne!(a, b);
    }
}
