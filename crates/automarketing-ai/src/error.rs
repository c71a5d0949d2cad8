//! AI client error types.

use thiserror::Error;

/// Claude API errors
#[derive(Debug, Error)]
pub enum AiError {
    /// No API key configured
    #[error("Missing CLAUDE_API_KEY")]
    MissingApiKey,

    /// Request never produced a response
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Provider rejected the request; `message` is the provider's own text
    #[error("Claude API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response did not start with a text block
    #[error("Unexpected response format from Claude API: {0}")]
    UnexpectedResponse(String),
}

impl From<reqwest::Error> for AiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::UnexpectedResponse(err.to_string())
        } else {
            Self::Http(err.to_string())
        }
    }
}

/// Result type for AI operations.
pub type Result<T> = std::result::Result<T, AiError>;
