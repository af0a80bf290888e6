//! Request normalization
//!
//! Validates provider-agnostic requests, resolves the effective system prompt
//! and hands the call to the active provider adapter.

use tracing::{debug, info};

use crate::{
    error::{AppError, AppResult},
    provider::{AiProvider, Provider},
    types::{CanonicalResponse, ChatRequest, CompletionRequest},
};

/// Front door to the active provider
pub struct Gateway<P = Provider> {
    provider: P,
    default_system_prompt: String,
}

impl<P: AiProvider> Gateway<P> {
    pub fn new(provider: P, default_system_prompt: impl Into<String>) -> Self {
        Self {
            provider,
            default_system_prompt: default_system_prompt.into(),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// A non-blank request override wins over the configured default
    pub fn system_prompt<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested
            .filter(|prompt| !prompt.trim().is_empty())
            .unwrap_or(self.default_system_prompt.as_str())
    }

    /// Validate and forward a chat request
    pub async fn chat(&self, request: &ChatRequest) -> AppResult<CanonicalResponse> {
        if request.messages.is_empty() {
            return Err(AppError::Validation(
                "messages must contain at least one message".to_string(),
            ));
        }
        request.sampling.validate()?;

        let system_prompt = self.system_prompt(request.system_prompt.as_deref());

        info!(
            provider = %self.provider.kind(),
            model = %self.provider.model(),
            messages = request.messages.len(),
            "Forwarding chat request"
        );
        debug!(sampling = ?request.sampling, custom_system_prompt = request.system_prompt.is_some(), "Chat parameters");

        self.provider
            .chat(&request.messages, system_prompt, &request.sampling)
            .await
    }

    /// Validate and forward a completion request
    pub async fn complete(&self, request: &CompletionRequest) -> AppResult<CanonicalResponse> {
        request.sampling.validate()?;

        let system_prompt = self.system_prompt(request.system_prompt.as_deref());

        info!(
            provider = %self.provider.kind(),
            model = %self.provider.model(),
            "Forwarding completion request"
        );
        debug!(sampling = ?request.sampling, custom_system_prompt = request.system_prompt.is_some(), "Completion parameters");

        self.provider
            .complete(&request.prompt, system_prompt, &request.sampling)
            .await
    }
}
