//! Azure OpenAI adapter
//!
//! Talks to Azure-hosted deployments, or to any OpenAI-compatible endpoint
//! configured under the Azure settings.

use async_trait::async_trait;
use reqwest::{header::HeaderMap, Url};
use tracing::{info, instrument};

use super::{headers, wire, AiProvider};
use crate::{
    config::{AzureConfig, ConfigError, ProviderKind},
    error::{AppResult, Operation},
    types::{CanonicalResponse, Message, SamplingParams},
};

/// How requests are addressed and authenticated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AzureMode {
    /// `{endpoint}/openai/deployments/{model}/chat/completions?api-version=..`
    /// with an `api-key` header
    Deployment,
    /// `{endpoint}/chat/completions` with a bearer token and the model in the body
    OpenAiCompatible,
}

impl AzureMode {
    /// Azure-hosted endpoints use deployment addressing, anything else is
    /// treated as an OpenAI-compatible API
    pub fn detect(endpoint: &str) -> Self {
        if endpoint.to_ascii_lowercase().contains("azure") {
            AzureMode::Deployment
        } else {
            AzureMode::OpenAiCompatible
        }
    }
}

/// Azure OpenAI client
pub struct AzureOpenAI {
    client: reqwest::Client,
    url: Url,
    model: String,
    api_version: String,
    mode: AzureMode,
    headers: HeaderMap,
}

impl AzureOpenAI {
    /// Create a client, detecting the mode from the endpoint
    pub fn new(client: reqwest::Client, config: &AzureConfig) -> Result<Self, ConfigError> {
        Self::with_mode(client, config, AzureMode::detect(&config.endpoint))
    }

    /// Create a client with an explicit addressing mode
    pub fn with_mode(
        client: reqwest::Client,
        config: &AzureConfig,
        mode: AzureMode,
    ) -> Result<Self, ConfigError> {
        let headers = match mode {
            AzureMode::Deployment => headers::api_key_headers(&config.api_key, "AZURE_OPENAI_API_KEY")?,
            AzureMode::OpenAiCompatible => {
                headers::bearer_headers(&config.api_key, "AZURE_OPENAI_API_KEY")?
            }
        };

        let url = chat_completions_url(&config.endpoint, &config.model, mode)?;

        info!(endpoint = %config.endpoint, model = %config.model, mode = ?mode, "Using Azure OpenAI");

        Ok(Self {
            client,
            url,
            model: config.model.clone(),
            api_version: config.api_version.clone(),
            mode,
            headers,
        })
    }

    pub fn mode(&self) -> AzureMode {
        self.mode
    }

    /// Chat-completions URL for the configured mode
    pub fn chat_url(&self) -> &str {
        self.url.as_str()
    }

    #[instrument(skip_all, fields(provider = "azure", operation = %operation))]
    async fn send(
        &self,
        operation: Operation,
        messages: Vec<Message>,
        sampling: &SamplingParams,
    ) -> AppResult<CanonicalResponse> {
        // Deployment mode names the model in the URL.
        let body = wire::ChatCompletionRequest {
            model: match self.mode {
                AzureMode::Deployment => None,
                AzureMode::OpenAiCompatible => Some(self.model.as_str()),
            },
            messages,
            sampling,
        };

        let mut request = self
            .client
            .post(self.url.clone())
            .headers(self.headers.clone())
            .json(&body);
        if self.mode == AzureMode::Deployment {
            request = request.query(&[("api-version", self.api_version.as_str())]);
        }

        wire::execute(request, ProviderKind::Azure, operation, &self.model).await
    }
}

/// The deployment name is a single percent-encoded path segment
fn chat_completions_url(endpoint: &str, model: &str, mode: AzureMode) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        var: "AZURE_OPENAI_ENDPOINT",
        reason,
    };

    let mut url = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| invalid(format!("'{}' cannot be used as a base URL", endpoint)))?;
        segments.pop_if_empty();
        if mode == AzureMode::Deployment {
            segments.extend(["openai", "deployments", model]);
        }
        segments.extend(["chat", "completions"]);
    }
    Ok(url)
}

#[async_trait]
impl AiProvider for AzureOpenAI {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Azure
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn chat(
        &self,
        messages: &[Message],
        system_prompt: &str,
        sampling: &SamplingParams,
    ) -> AppResult<CanonicalResponse> {
        let messages = wire::with_system_prompt(system_prompt, messages);
        self.send(Operation::Chat, messages, sampling).await
    }

    async fn complete(
        &self,
        prompt: &str,
        system_prompt: &str,
        sampling: &SamplingParams,
    ) -> AppResult<CanonicalResponse> {
        let messages = wire::with_system_prompt(system_prompt, &[Message::user(prompt)]);
        self.send(Operation::Completion, messages, sampling).await
    }
}
