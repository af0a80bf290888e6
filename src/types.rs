//! Provider-agnostic request and response types
//!
//! These are the shapes clients send to and receive from the gateway,
//! independent of which provider serves the call.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

const TEMPERATURE_RANGE: RangeInclusive<f64> = 0.0..=2.0;
const MAX_TOKENS_RANGE: RangeInclusive<u32> = 1..=4000;
const TOP_P_RANGE: RangeInclusive<f64> = 0.0..=1.0;

/// Role of a message participant
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single conversation message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Optional sampling knobs; unset values fall back to the provider's defaults
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct SamplingParams {
    /// Sampling temperature (0-2)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Maximum tokens to generate (1-4000)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Nucleus sampling parameter (0-1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
}

impl SamplingParams {
    /// Reject values outside the documented ranges
    pub fn validate(&self) -> AppResult<()> {
        if let Some(temperature) = self.temperature {
            if !TEMPERATURE_RANGE.contains(&temperature) {
                return Err(AppError::Validation(format!(
                    "temperature must be between 0 and 2, got {}",
                    temperature
                )));
            }
        }
        if let Some(max_tokens) = self.max_tokens {
            if !MAX_TOKENS_RANGE.contains(&max_tokens) {
                return Err(AppError::Validation(format!(
                    "max_tokens must be between 1 and 4000, got {}",
                    max_tokens
                )));
            }
        }
        if let Some(top_p) = self.top_p {
            if !TOP_P_RANGE.contains(&top_p) {
                return Err(AppError::Validation(format!(
                    "top_p must be between 0 and 1, got {}",
                    top_p
                )));
            }
        }
        Ok(())
    }
}

/// Multi-turn chat request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatRequest {
    /// Conversation so far, oldest first
    pub messages: Vec<Message>,
    /// Overrides the configured default system prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(flatten)]
    pub sampling: SamplingParams,
}

/// Single-prompt completion request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompletionRequest {
    /// The prompt to complete
    pub prompt: String,
    /// Overrides the configured default system prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(flatten)]
    pub sampling: SamplingParams,
}

/// Token usage reported by the provider
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Uniform response returned regardless of provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct CanonicalResponse {
    /// AI generated response
    pub response: String,
    /// Model used for generation
    pub model: String,
    pub usage: Usage,
}
