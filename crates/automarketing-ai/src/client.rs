//! Claude HTTP client

use reqwest::Client;

use crate::error::{AiError, Result};
use crate::types::{
    ApiErrorBody, ChatMessage, CompletionOptions, ContentBlock, MessageRequest, MessageResponse,
};

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";
pub const DEFAULT_MAX_TOKENS: u32 = 4096;
const API_VERSION: &str = "2023-06-01";

/// Claude client configuration
#[derive(Clone)]
pub struct ClaudeConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
}

impl Default for ClaudeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl std::fmt::Debug for ClaudeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaudeConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

/// Client for the Anthropic Messages API.
#[derive(Debug, Clone)]
pub struct ClaudeClient {
    http: Client,
    config: ClaudeConfig,
}

impl ClaudeClient {
    pub fn new(config: ClaudeConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// Whether an API key is present. No request is made.
    pub fn is_configured(&self) -> bool {
        self.config.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    /// Send `messages` and return the text of the first content block.
    ///
    /// # Errors
    ///
    /// [`AiError::MissingApiKey`] without a key, [`AiError::Api`] with the
    /// provider's message on a non-2xx reply, and
    /// [`AiError::UnexpectedResponse`] if the first block is not text.
    pub async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(AiError::MissingApiKey)?;

        let body = MessageRequest {
            model: options.model.as_deref().unwrap_or(&self.config.model),
            max_tokens: options.max_tokens.unwrap_or(self.config.max_tokens),
            messages,
        };

        let url = format!("{}/messages", self.config.base_url.trim_end_matches('/'));
        let response = self
            .http
            .post(&url)
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Claude request failed"))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .map(|b| b.error.message)
                .unwrap_or(text);

            tracing::error!(status = status.as_u16(), %message, "Claude API error");
            return Err(AiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: MessageResponse = response.json().await?;
        if let Some(usage) = parsed.usage {
            tracing::debug!(
                model = body.model,
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "Claude completion"
            );
        }

        match parsed.content.into_iter().next() {
            Some(ContentBlock::Text { text }) => Ok(text),
            Some(ContentBlock::Other) => Err(AiError::UnexpectedResponse(
                "first content block is not text".to_string(),
            )),
            None => Err(AiError::UnexpectedResponse("empty content".to_string())),
        }
    }

    /// Live connectivity check with a tiny prompt.
    pub async fn ping(&self) -> bool {
        let messages = [ChatMessage::user("Say hello in 5 words or less")];
        match self.complete(&messages, &CompletionOptions::default()).await {
            Ok(reply) => {
                tracing::info!(%reply, "Claude API reachable");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Claude API check failed");
                false
            }
        }
    }
}
