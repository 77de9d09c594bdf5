/// Match scheduling for the pairwise tournament.
///
/// Every unordered pair of outputs within a case group yields two matchups,
/// one per ordering, so each variant takes a turn in the A slot. The judge
/// prefers position A more often than not; running both orderings amortizes
/// that bias across the pair instead of eliminating it per match.
///
/// Enumeration is deterministic: groups in listed order, outputs in listed
/// order, pairs `(i, j)` with `i < j`, the `(i, j)` rendering immediately
/// followed by `(j, i)`. Ids are sequential in emission order.
use std::collections::HashSet;

use crate::error::EvalError;
use crate::prompt::render_matchup;
use crate::types::{CaseGroup, Matchup, VariantKey};

/// Build the complete match schedule for an experiment, all groups up
/// front. Groups with fewer than two outputs contribute nothing; that is
/// not an error. A variant appearing twice in one group is.
pub fn build_schedule(task: &str, groups: &[CaseGroup]) -> Result<Vec<Matchup>, EvalError> {
    let mut schedule = Vec::with_capacity(total_matchups(groups));

    for (group_index, group) in groups.iter().enumerate() {
        let mut seen: HashSet<&VariantKey> = HashSet::with_capacity(group.outputs.len());
        for output in &group.outputs {
            if !seen.insert(&output.variant) {
                return Err(EvalError::DuplicateVariant {
                    group: group_index,
                    variant: output.variant.clone(),
                });
            }
        }

        for i in 0..group.outputs.len() {
            for j in (i + 1)..group.outputs.len() {
                let (a, b) = (&group.outputs[i], &group.outputs[j]);
                schedule.push(Matchup {
                    id: schedule.len(),
                    first: a.variant.clone(),
                    second: b.variant.clone(),
                    prompt: render_matchup(task, &group.input, &a.text, &b.text),
                });
                schedule.push(Matchup {
                    id: schedule.len(),
                    first: b.variant.clone(),
                    second: a.variant.clone(),
                    prompt: render_matchup(task, &group.input, &b.text, &a.text),
                });
            }
        }
    }

    Ok(schedule)
}

/// Number of matchups the schedule will contain: n*(n-1) per group of n
/// outputs (every unordered pair, both orderings).
pub fn total_matchups(groups: &[CaseGroup]) -> usize {
    groups
        .iter()
        .map(|g| {
            let n = g.outputs.len();
            n * n.saturating_sub(1)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VariantOutput;

    fn group(input: &str, variants: &[&str]) -> CaseGroup {
        CaseGroup {
            input: input.to_string(),
            outputs: variants
                .iter()
                .map(|v| VariantOutput::new(VariantKey::new(*v), format!("text by {v}")))
                .collect(),
        }
    }

    #[test]
    fn test_matchup_count_per_group() {
        for n in 0..6usize {
            let variants: Vec<String> = (0..n).map(|i| format!("v{i}")).collect();
            let refs: Vec<&str> = variants.iter().map(|s| s.as_str()).collect();
            let groups = [group("in", &refs)];
            let schedule = build_schedule("task", &groups).unwrap();
            assert_eq!(schedule.len(), n * n.saturating_sub(1), "n = {n}");
            assert_eq!(schedule.len(), total_matchups(&groups));
        }
    }

    #[test]
    fn test_small_groups_yield_nothing() {
        let groups = [group("a", &[]), group("b", &["only"])];
        let schedule = build_schedule("task", &groups).unwrap();
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_orderings_are_adjacent_and_mirrored() {
        let groups = [group("in", &["x", "y", "z"])];
        let schedule = build_schedule("task", &groups).unwrap();
        assert_eq!(schedule.len(), 6);
        for pair in schedule.chunks(2) {
            assert_eq!(pair[0].first, pair[1].second);
            assert_eq!(pair[0].second, pair[1].first);
        }
        // lexicographic over the listing: (x,y), (x,z), (y,z)
        assert_eq!(schedule[0].first, VariantKey::new("x"));
        assert_eq!(schedule[0].second, VariantKey::new("y"));
        assert_eq!(schedule[2].first, VariantKey::new("x"));
        assert_eq!(schedule[2].second, VariantKey::new("z"));
        assert_eq!(schedule[4].first, VariantKey::new("y"));
        assert_eq!(schedule[4].second, VariantKey::new("z"));
    }

    #[test]
    fn test_ids_are_sequential() {
        let groups = [group("one", &["x", "y"]), group("two", &["x", "y", "z"])];
        let schedule = build_schedule("task", &groups).unwrap();
        for (i, matchup) in schedule.iter().enumerate() {
            assert_eq!(matchup.id, i);
        }
    }

    #[test]
    fn test_schedule_is_reproducible() {
        let groups = [group("one", &["x", "y", "z"]), group("two", &["x", "y"])];
        let a = build_schedule("task", &groups).unwrap();
        let b = build_schedule("task", &groups).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_duplicate_variant_in_group_is_rejected() {
        let groups = [group("in", &["x", "y", "x"])];
        let err = build_schedule("task", &groups).unwrap_err();
        assert_eq!(
            err,
            EvalError::DuplicateVariant {
                group: 0,
                variant: VariantKey::new("x"),
            }
        );
    }

    #[test]
    fn test_prompts_swap_candidate_slots() {
        let groups = [group("in", &["x", "y"])];
        let schedule = build_schedule("task", &groups).unwrap();
        assert!(schedule[0].prompt.user.contains("Generation A: text by x"));
        assert!(schedule[0].prompt.user.contains("Generation B: text by y"));
        assert!(schedule[1].prompt.user.contains("Generation A: text by y"));
        assert!(schedule[1].prompt.user.contains("Generation B: text by x"));
    }
}
