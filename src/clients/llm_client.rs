//! LLM (`OpenAI`) API client module
//!
//! Backs the summarization [`Agent`] with a single call to the Responses API.
//! The call is blocking; it runs on a worker-pool thread, never on the
//! request dispatch threads.

use openai_api_rs::v1::chat_completion::{ChatCompletionMessage, Content, MessageRole};
use reqwest::blocking::Client;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::info;

use crate::agent::Agent;
use crate::core::config::AgentConfig;
use crate::core::models::{AgentState, HOST_DATA_KEY, SUMMARY_KEY};
use crate::errors::AgentError;
use crate::prompt::{build_prompt, estimate_tokens};

const MAX_CONTEXT_TOKENS: usize = 128_000;
const MAX_OUTPUT_TOKENS: usize = 16_384;
const TOKEN_BUFFER: usize = 250;

/// LLM API client that summarises host datasets.
pub struct LlmClient {
    api_key: String,
    org_id: Option<String>,
    model_name: String,
    base_url: String,
    timeout: Duration,
}

impl LlmClient {
    #[must_use]
    pub fn new(api_key: String, org_id: Option<String>, model_name: String) -> Self {
        Self {
            api_key,
            org_id,
            model_name,
            base_url: crate::core::config::DEFAULT_OPENAI_BASE_URL.to_string(),
            timeout: Duration::from_secs(crate::core::config::DEFAULT_AGENT_TIMEOUT_SECS),
        }
    }

    #[must_use]
    pub fn from_config(config: &AgentConfig) -> Self {
        Self::new(
            config.openai_api_key.clone(),
            config.openai_org_id.clone(),
            config.openai_model.clone(),
        )
        .with_base_url(&config.openai_base_url)
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Bounds each upstream request. Keep it no longer than the worker pool
    /// timeout so an abandoned call frees its worker slot.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Endpoint the summary request is posted to.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/responses", self.base_url)
    }

    /// Builds the Responses API request body for `prompt`.
    #[must_use]
    pub fn request_body(&self, prompt: &[ChatCompletionMessage]) -> Value {
        let estimated_input_tokens = prompt
            .iter()
            .map(|msg| estimate_tokens(&format!("{:?}", msg.content)))
            .sum::<usize>();

        let max_output_tokens = MAX_CONTEXT_TOKENS
            .saturating_sub(estimated_input_tokens)
            .saturating_sub(TOKEN_BUFFER)
            .min(MAX_OUTPUT_TOKENS);

        info!(
            estimated_input_tokens,
            max_output_tokens, "Calculated token budget"
        );

        let input_messages: Vec<Value> = prompt
            .iter()
            .map(|msg| {
                let role_str = match msg.role {
                    MessageRole::system => "system",
                    MessageRole::user => "user",
                    MessageRole::assistant => "assistant",
                    MessageRole::function => "function",
                    MessageRole::tool => "tool",
                };

                let content_val = match &msg.content {
                    Content::Text(text) => json!(text),
                    Content::ImageUrl(_) => json!([]),
                };

                json!({
                    "role": role_str,
                    "content": content_val
                })
            })
            .collect();

        json!({
            "model": self.model_name,
            "input": input_messages,
            "max_output_tokens": max_output_tokens
        })
    }

    pub fn generate_summary(&self, prompt: &[ChatCompletionMessage]) -> Result<String, AgentError> {
        #[cfg(feature = "debug-logs")]
        info!("Using host summary prompt:\n{:?}", prompt);

        #[cfg(not(feature = "debug-logs"))]
        info!(
            model = %self.model_name,
            "Generating host summary with {} messages in prompt",
            prompt.len()
        );

        let request_body = self.request_body(prompt);

        // Blocking clients must be built on the worker thread, not the runtime.
        let client = Client::builder().timeout(self.timeout).build()?;

        let mut request = client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request_body);
        if let Some(org) = &self.org_id {
            request = request.header("OpenAI-Organization", org);
        }

        let response = request
            .send()
            .map_err(|e| AgentError::Http(format!("OpenAI API request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AgentError::Upstream(format!(
                "OpenAI API error {status}: {error_text}"
            )));
        }

        let response_json: Value = response
            .json()
            .map_err(|e| AgentError::Upstream(format!("Failed to parse OpenAI response: {e}")))?;

        extract_output_text(&response_json).ok_or(AgentError::EmptyOutput)
    }
}

impl Agent for LlmClient {
    fn invoke(&self, mut state: AgentState) -> Result<AgentState, AgentError> {
        let host_data = state
            .get(HOST_DATA_KEY)
            .ok_or(AgentError::MissingInput(HOST_DATA_KEY))?;

        let prompt = build_prompt(host_data);
        let summary = self.generate_summary(&prompt)?;

        state.insert(SUMMARY_KEY.to_string(), Value::String(summary));
        Ok(state)
    }
}

/// Pulls the generated text out of a Responses API payload: `output_text`
/// first, otherwise every `output_text` part under `output[].content[]`.
#[must_use]
pub fn extract_output_text(response_json: &Value) -> Option<String> {
    if let Some(text) = response_json.get("output_text").and_then(Value::as_str) {
        return Some(text.to_string());
    }

    let mut collected: Vec<String> = Vec::new();
    let items = response_json
        .get("output")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for item in items {
        let Some(parts) = item.get("content").and_then(Value::as_array) else {
            continue;
        };
        for part in parts {
            let is_output_text = part.get("type").and_then(Value::as_str) == Some("output_text");
            if !is_output_text {
                continue;
            }
            if let Some(s) = part.get("text").and_then(Value::as_str) {
                collected.push(s.to_string());
            } else if let Some(s) = part
                .get("text")
                .and_then(|t| t.get("value"))
                .and_then(Value::as_str)
            {
                collected.push(s.to_string());
            }
        }
    }

    if collected.is_empty() {
        None
    } else {
        Some(collected.join("\n"))
    }
}
