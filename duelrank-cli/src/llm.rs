/// OpenAI-compatible judge client for pairwise matchups.
///
/// One chat-completions call per matchup, all issued through a
/// semaphore-bounded set of tokio tasks and joined in schedule order, so
/// the returned verdicts are aligned with the schedule by both index and
/// matchup id. A transport failure that survives its retries fails the
/// whole batch; a successful HTTP response always yields a verdict, even
/// an empty one (the interpreter scores those as draws).
use duelrank_core::{JudgeVerdict, Matchup};
use indicatif::ProgressBar;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Configuration for the judge endpoint.
pub struct JudgeConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub temperature: f64,
}

/// Token ids for 'A' and 'B' in the judge's vocabulary, biased hard so the
/// single-token completion lands on one of them.
const VERDICT_LOGIT_BIAS: [(&str, i32); 2] = [("32", 100), ("33", 100)];

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
    logit_bias: HashMap<String, i32>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Debug, Deserialize)]
struct MessageContent {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    total_tokens: u64,
}

/// Result of judging a full schedule.
pub struct BatchOutcome {
    /// One verdict per matchup, id-aligned with the schedule.
    pub verdicts: Vec<JudgeVerdict>,
    /// Judge tokens consumed, as reported by the API.
    pub total_tokens: u64,
    /// HTTP retries spent across the batch.
    pub retries_used: usize,
}

/// Send one judging request. Returns Ok on any successful HTTP response,
/// Err only on HTTP/network failures.
async fn send_judge_request(
    client: &Client,
    config: &JudgeConfig,
    system: &str,
    user: &str,
) -> Result<(String, u64), String> {
    let request = ChatCompletionRequest {
        model: config.model.clone(),
        messages: vec![
            ChatMessage {
                role: "system",
                content: system.to_string(),
            },
            ChatMessage {
                role: "user",
                content: user.to_string(),
            },
        ],
        temperature: config.temperature,
        max_tokens: 1,
        logit_bias: VERDICT_LOGIT_BIAS
            .iter()
            .map(|(token, bias)| (token.to_string(), *bias))
            .collect(),
    };

    let url = format!("{}/v1/chat/completions", config.endpoint.trim_end_matches('/'));

    let mut req_builder = client.post(&url).json(&request);
    if let Some(ref key) = config.api_key {
        req_builder = req_builder.bearer_auth(key);
    }

    let resp = req_builder.send().await.map_err(|e| format!("HTTP request failed: {e}"))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(format!("Judge API returned {status}: {}", &body[..body.len().min(200)]));
    }

    let data: ChatCompletionResponse = resp
        .json()
        .await
        .map_err(|e| format!("Failed to parse judge response JSON: {e}"))?;

    let tokens = data.usage.map(|u| u.total_tokens).unwrap_or(0);
    let choice = data
        .choices
        .into_iter()
        .next()
        .ok_or("No choices in judge response")?;

    // A missing or empty content field becomes an empty verdict token,
    // which the interpreter scores as a draw.
    Ok((choice.message.content.unwrap_or_default(), tokens))
}

/// Call the judge with retries on HTTP errors. A 1-second pause between
/// attempts; unparseable verdicts never retry, only transport failures do.
async fn judge_with_retries(
    client: &Client,
    config: &JudgeConfig,
    system: &str,
    user: &str,
    max_retries: usize,
) -> Result<(String, u64, usize), String> {
    let mut last_err = String::new();
    for attempt in 0..=max_retries {
        match send_judge_request(client, config, system, user).await {
            Ok((token, tokens_used)) => return Ok((token, tokens_used, attempt)),
            Err(e) => {
                last_err = e;
                if attempt < max_retries {
                    tokio::time::sleep(std::time::Duration::from_secs(1)).await;
                }
            }
        }
    }
    Err(last_err)
}

/// Judge every matchup in the schedule with bounded concurrency.
///
/// Tasks are spawned in schedule order and their handles awaited in the
/// same order, so the verdict list is index-aligned with the input. The
/// progress bar ticks once per completed call regardless of outcome. Any
/// request that exhausts its retries fails the whole batch.
pub async fn judge_batch(
    client: &Client,
    config: &Arc<JudgeConfig>,
    schedule: &[Matchup],
    concurrency: usize,
    max_retries: usize,
    progress: Option<ProgressBar>,
) -> Result<BatchOutcome, String> {
    let semaphore = Arc::new(tokio::sync::Semaphore::new(concurrency.max(1)));
    let mut handles = Vec::with_capacity(schedule.len());

    for matchup in schedule {
        let sem = semaphore.clone();
        let client = client.clone();
        let config = config.clone();
        let system = matchup.prompt.system;
        let user = matchup.prompt.user.clone();
        let id = matchup.id;
        let progress = progress.clone();

        let handle = tokio::spawn(async move {
            let _permit = sem.acquire().await.expect("semaphore closed");
            let result = judge_with_retries(&client, &config, system, &user, max_retries).await;
            if let Some(ref pb) = progress {
                pb.inc(1);
            }
            result.map(|(token, tokens_used, retries)| (id, token, tokens_used, retries))
        });

        handles.push(handle);
    }

    let mut verdicts = Vec::with_capacity(schedule.len());
    let mut total_tokens = 0u64;
    let mut retries_used = 0usize;

    for handle in handles {
        match handle.await {
            Ok(Ok((id, token, tokens_used, retries))) => {
                total_tokens += tokens_used;
                retries_used += retries;
                verdicts.push(JudgeVerdict { id, token });
            }
            Ok(Err(e)) => return Err(format!("Judge call failed after {max_retries} retries: {e}")),
            Err(e) => return Err(format!("Judge task panicked: {e}")),
        }
    }

    Ok(BatchOutcome {
        verdicts,
        total_tokens,
        retries_used,
    })
}
