//! Text-generation collaborator boundary
//!
//! One logical blocking call per run: the prompt goes out, a block of
//! free-form changelog text comes back. Retry and timeout policy lives
//! here, at the boundary, never in the core pipeline.

use std::time::Duration;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use tokio_retry::Retry;
use tokio_retry::strategy::ExponentialBackoff;

use crate::config::Config;
use crate::log_debug;

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const MAX_OUTPUT_TOKENS: u32 = 2000;
const TEMPERATURE: f32 = 0.3;

#[derive(Serialize)]
struct MessageRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessageResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

/// Resolves the provider API key from config or the environment.
pub fn resolve_api_key(config: &Config) -> Result<String> {
    if !config.api_key.is_empty() {
        return Ok(config.api_key.clone());
    }
    std::env::var("ANTHROPIC_API_KEY")
        .or_else(|_| std::env::var("CLAUDE_API_KEY"))
        .map_err(|_| {
            anyhow!(
                "no API key available; set ANTHROPIC_API_KEY or run 'git-chronicle config --api-key <key>'"
            )
        })
}

/// Generates text with the configured model.
///
/// A single logical call from the caller's point of view: transient
/// failures are retried once with backoff, and every attempt is bounded
/// by a hard timeout.
pub async fn generate_text(config: &Config, system_prompt: &str, user_prompt: &str) -> Result<String> {
    let api_key = resolve_api_key(config)?;
    let client = reqwest::Client::new();

    log_debug!("Requesting completion from model {}", config.ai_model);

    // 2 attempts total: initial + 1 retry
    let retry_strategy = ExponentialBackoff::from_millis(10).factor(2).take(2);

    Retry::spawn(retry_strategy, || async {
        request_completion(&client, config, &api_key, system_prompt, user_prompt).await
    })
    .await
}

async fn request_completion(
    client: &reqwest::Client,
    config: &Config,
    api_key: &str,
    system_prompt: &str,
    user_prompt: &str,
) -> Result<String> {
    let request = MessageRequest {
        model: &config.ai_model,
        max_tokens: MAX_OUTPUT_TOKENS,
        temperature: TEMPERATURE,
        system: system_prompt,
        messages: vec![Message {
            role: "user",
            content: user_prompt,
        }],
    };

    let response = tokio::time::timeout(
        REQUEST_TIMEOUT,
        client
            .post(API_URL)
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send(),
    )
    .await
    .map_err(|_| anyhow!("provider request timed out"))??;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        log_debug!("Provider error response ({}): {}", status, body);
        return Err(anyhow!("provider returned {status}"));
    }

    let message: MessageResponse = response.json().await?;
    let text: String = message
        .content
        .iter()
        .filter(|block| block.kind == "text")
        .map(|block| block.text.as_str())
        .collect();

    if text.trim().is_empty() {
        return Err(anyhow!("provider returned an empty completion"));
    }
    Ok(text)
}
