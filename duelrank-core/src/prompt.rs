/// Judge prompt rendering for pairwise matchups.
///
/// Pure templating: identical inputs always render identical text. The
/// dispatcher sends the result verbatim; nothing here touches the network.

/// The fixed judging rubric. Demands a decisive single-token answer; the
/// dispatcher additionally pins the completion to the "A"/"B" tokens.
pub const JUDGE_SYSTEM_PROMPT: &str = "\
Your job is to rank the quality of two outputs generated by different
prompts. The prompts are used to generate a response for a given task and
its associated input data. You will be provided with the task description,
the input data, and two generations - one for each prompt.
Rank the generations in order of quality. If Generation A is better,
respond with 'A'. If Generation B is better, respond with 'B'.
Remember, to be considered 'better', a generation must not just be good,
it must be noticeably superior to the other. Also, keep in mind that you
are a very harsh critic. Only rank a generation as better if it truly
impresses you more than the other. Respond with your ranking, and nothing
else. Be fair and unbiased in your judgement.";

/// A fully rendered judge message: fixed rubric plus the task-specific
/// user content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JudgePrompt {
    pub system: &'static str,
    pub user: String,
}

/// Render the user message for one ordered pair of candidates.
pub fn render_matchup(task: &str, input: &str, candidate_a: &str, candidate_b: &str) -> JudgePrompt {
    JudgePrompt {
        system: JUDGE_SYSTEM_PROMPT,
        user: format!(
            "Task: {}\n\
             Input: {}\n\
             Generation A: {}\n\
             Generation B: {}",
            task.trim(),
            input,
            candidate_a,
            candidate_b,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_contains_all_parts() {
        let prompt = render_matchup(
            "Translate to French",
            "Hello world!",
            "Bonjour le monde!",
            "Salut monde!",
        );
        assert_eq!(prompt.system, JUDGE_SYSTEM_PROMPT);
        assert!(prompt.user.starts_with("Task: Translate to French"));
        assert!(prompt.user.contains("Input: Hello world!"));
        assert!(prompt.user.contains("Generation A: Bonjour le monde!"));
        assert!(prompt.user.contains("Generation B: Salut monde!"));
    }

    #[test]
    fn test_render_is_pure() {
        let a = render_matchup("t", "i", "x", "y");
        let b = render_matchup("t", "i", "x", "y");
        assert_eq!(a, b);
    }

    #[test]
    fn test_render_trims_task() {
        let prompt = render_matchup("  Translate  \n", "i", "x", "y");
        assert!(prompt.user.starts_with("Task: Translate\n"));
    }
}
