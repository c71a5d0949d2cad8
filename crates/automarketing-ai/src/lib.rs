//! # AutoMarketing AI
//!
//! Thin client for the Claude Messages API. Sends role-tagged messages and
//! returns the first text block of the reply; provider errors keep
//! the provider's own message.
//!
//! ```rust,ignore
//! use automarketing_ai::{ChatMessage, ClaudeClient, ClaudeConfig, CompletionOptions};
//!
//! let claude = ClaudeClient::new(ClaudeConfig {
//!     api_key: std::env::var("CLAUDE_API_KEY").ok(),
//!     ..Default::default()
//! });
//! let persona = claude
//!     .complete(&[ChatMessage::user("Describe a buyer persona for ...")], &CompletionOptions::default())
//!     .await?;
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod error;
pub mod types;

pub use client::{ClaudeClient, ClaudeConfig, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
pub use error::{AiError, Result};
pub use types::{ChatMessage, CompletionOptions, Role};
