//! Chat-completions wire format shared by both providers
//!
//! Azure OpenAI and DigitalOcean inference both speak the OpenAI
//! chat-completions schema; they differ only in URL layout and auth header.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    config::ProviderKind,
    error::{AppError, AppResult, Operation},
    types::{CanonicalResponse, Message, SamplingParams, Usage},
};

/// Longest upstream error body kept in logs
const MAX_LOGGED_BODY: usize = 512;

/// Outbound chat-completions payload
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<&'a str>,
    pub messages: Vec<Message>,
    #[serde(flatten)]
    pub sampling: &'a SamplingParams,
}

/// Prepend the effective system prompt to a conversation
///
/// A blank prompt adds no system message.
pub fn with_system_prompt(system_prompt: &str, conversation: &[Message]) -> Vec<Message> {
    let mut messages = Vec::with_capacity(conversation.len() + 1);
    if !system_prompt.trim().is_empty() {
        messages.push(Message::system(system_prompt));
    }
    messages.extend_from_slice(conversation);
    messages
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WireUsage {
    #[serde(default)]
    prompt_tokens: Option<u32>,
    #[serde(default)]
    completion_tokens: Option<u32>,
    #[serde(default)]
    total_tokens: Option<u32>,
}

impl From<WireUsage> for Usage {
    fn from(usage: WireUsage) -> Self {
        let prompt_tokens = usage.prompt_tokens.unwrap_or(0);
        let completion_tokens = usage.completion_tokens.unwrap_or(0);
        let total_tokens = match (usage.prompt_tokens, usage.completion_tokens) {
            (Some(prompt), Some(completion)) => prompt.saturating_add(completion),
            _ => usage
                .total_tokens
                .unwrap_or(prompt_tokens.saturating_add(completion_tokens)),
        };

        Usage {
            prompt_tokens,
            completion_tokens,
            total_tokens,
        }
    }
}

impl ChatCompletionResponse {
    fn into_canonical(self, fallback_model: &str) -> Result<CanonicalResponse, &'static str> {
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or("response contained no choices")?;
        let response = choice
            .message
            .content
            .ok_or("first choice has no message content")?;

        let model = self
            .model
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| fallback_model.to_string());

        Ok(CanonicalResponse {
            response,
            model,
            usage: self.usage.unwrap_or_default().into(),
        })
    }
}

/// Send a prepared provider request and map the reply to the canonical shape
pub async fn execute(
    request: reqwest::RequestBuilder,
    provider: ProviderKind,
    operation: Operation,
    fallback_model: &str,
) -> AppResult<CanonicalResponse> {
    let response = request.send().await.map_err(|e| {
        warn!(provider = %provider, operation = %operation, error = %e, "Failed to reach provider");
        AppError::transport(provider, operation, &e)
    })?;

    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        warn!(
            provider = %provider,
            operation = %operation,
            status = %status,
            body = %truncate(&text, MAX_LOGGED_BODY),
            "Provider returned error status"
        );
        return Err(AppError::Upstream {
            provider,
            operation,
            status: Some(status.as_u16()),
            timed_out: false,
            message: format!("provider returned HTTP {}", status),
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| AppError::transport(provider, operation, &e))?;

    debug!(provider = %provider, operation = %operation, body_len = body.len(), "Received provider response");

    let parsed: ChatCompletionResponse = serde_json::from_slice(&body).map_err(|e| {
        warn!(provider = %provider, operation = %operation, error = %e, "Unparseable provider response");
        AppError::Parse {
            provider,
            operation,
            message: e.to_string(),
        }
    })?;

    parsed.into_canonical(fallback_model).map_err(|reason| {
        warn!(provider = %provider, operation = %operation, reason, "Unusable provider response");
        AppError::Parse {
            provider,
            operation,
            message: reason.to_string(),
        }
    })
}

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
