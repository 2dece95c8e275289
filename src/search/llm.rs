//! LLM-backed query expansion
//!
//! Calls an OpenAI-compatible chat completion endpoint and uses the reply
//! as the expanded query. Any failure (missing key, transport error,
//! timeout, unexpected response) falls back to the original query.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use super::expansion::TermExpander;

pub const DEFAULT_LLM_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_LLM_MODEL: &str = "openai/gpt-3.5-turbo";

/// Queries longer than this are truncated before being sent
pub const MAX_QUERY_CHARS: usize = 256;

const SYSTEM_PROMPT: &str = "You are a helpful assistant that expands search queries to improve search results. Given a simple search term, expand it to include related terms and synonyms. Return only the expanded query without additional text.";

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

/// Expander backed by a chat completion API
#[derive(Debug, Clone)]
pub struct LlmExpander {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl LlmExpander {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            timeout,
        }
    }

    async fn request_expansion(&self, api_key: &str, query: &str) -> Result<String, String> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                {
                    "role": "user",
                    "content": format!("Expand this search query for better search results: \"{}\"", query)
                }
            ],
            "temperature": 0.3
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .header("X-Title", "Blog Search Query Expansion")
            .json(&body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("status {}", status));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| e.to_string())?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .ok_or_else(|| "response has no choices".to_string())?;

        if content.is_empty() {
            return Err("empty expansion".to_string());
        }
        Ok(content)
    }
}

/// Truncate to at most `MAX_QUERY_CHARS` characters
fn bounded(query: &str) -> &str {
    match query.char_indices().nth(MAX_QUERY_CHARS) {
        Some((idx, _)) => &query[..idx],
        None => query,
    }
}

#[async_trait]
impl TermExpander for LlmExpander {
    fn name(&self) -> &'static str {
        "llm"
    }

    async fn expand(&self, query: &str) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("LLM API key not configured, using unexpanded query");
            return query.to_string();
        };

        let request = self.request_expansion(api_key, bounded(query));
        match tokio::time::timeout(self.timeout, request).await {
            Ok(Ok(expanded)) => {
                debug!(original = query, expanded = %expanded, "Expanded query");
                expanded
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Query expansion failed, using unexpanded query");
                query.to_string()
            }
            Err(_) => {
                warn!(timeout_ms = self.timeout.as_millis() as u64, "Query expansion timed out");
                query.to_string()
            }
        }
    }
}
