//! Completion provider client
//!
//! Direct HTTP client for an OpenAI-compatible chat-completions endpoint
//! (Hugging Face's router by default). One opaque call per turn; no retry is
//! performed and no timeout is imposed beyond the transport default.

use crate::config::ProviderConfig;
use crate::error::AppError;
use crate::store::MessageRole;
use serde::{Deserialize, Serialize};

/// Default API base URL (Hugging Face inference router)
pub const DEFAULT_BASE_URL: &str = "https://router.huggingface.co/v1";

/// Default model identifier
pub const DEFAULT_MODEL: &str = "meta-llama/Llama-3.1-8B-Instruct:cerebras";

/// Maximum number of tokens requested per completion
const MAX_TOKENS: u32 = 2000;

/// Sampling temperature used for every completion
const TEMPERATURE: f32 = 0.9;

/// One entry of the prompt sent to the provider
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    /// Sender role ("system", "user" or "assistant")
    pub role: MessageRole,
    /// Entry text
    pub content: String,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// HTTP client for the completion provider
///
/// Holds a shared `reqwest::Client` for connection pooling.
pub struct CompletionClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl CompletionClient {
    /// Create a client from provider configuration
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    /// Request a completion for the assembled prompt
    ///
    /// Returns the first choice's message content; a present-but-empty body
    /// comes back as an empty string (the caller decides what to do with it).
    ///
    /// # Errors
    /// * Returns `AppError::ProviderFailure` on transport errors, non-success
    ///   HTTP statuses, unparseable bodies, or a response without choices.
    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<String, AppError> {
        let url = format!("{}/chat/completions", self.base_url);
        let request_body = CompletionRequest {
            model: &self.model,
            messages,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        tracing::debug!(
            url = %url,
            model = %self.model,
            prompt_entries = messages.len(),
            "Calling completion provider"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                AppError::ProviderFailure(format!("Failed to send HTTP request: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            return Err(AppError::ProviderFailure(format!(
                "Provider returned error status {}: {}",
                status.as_u16(),
                error_body
            )));
        }

        let parsed: CompletionResponse = response.json().await.map_err(|e| {
            AppError::ProviderFailure(format!("Failed to parse provider response: {}", e))
        })?;

        let reply = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| {
                AppError::ProviderFailure("Provider response contains no choices".to_string())
            })?
            .message
            .content
            .unwrap_or_default();

        tracing::debug!(response_len = reply.len(), "Received provider completion");
        Ok(reply)
    }
}
