//! DigitalOcean inference adapter

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use tracing::{info, instrument};

use super::{headers, wire, AiProvider};
use crate::{
    config::{ConfigError, DigitalOceanConfig, ProviderKind},
    error::{AppResult, Operation},
    types::{CanonicalResponse, Message, SamplingParams},
};

const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

/// DigitalOcean inference API client
pub struct DigitalOceanClient {
    client: reqwest::Client,
    url: String,
    model: String,
    headers: HeaderMap,
}

impl DigitalOceanClient {
    /// Create a new DigitalOcean client
    pub fn new(client: reqwest::Client, config: &DigitalOceanConfig) -> Result<Self, ConfigError> {
        let headers = headers::bearer_headers(&config.api_key, "DIGITALOCEAN_API_KEY")?;

        info!(endpoint = %config.endpoint, model = %config.model, "Using DigitalOcean inference API");

        Ok(Self {
            client,
            url: chat_completions_url(&config.endpoint),
            model: config.model.clone(),
            headers,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    #[instrument(skip_all, fields(provider = "digitalocean", operation = %operation))]
    async fn send(
        &self,
        operation: Operation,
        messages: Vec<Message>,
        sampling: &SamplingParams,
    ) -> AppResult<CanonicalResponse> {
        let body = wire::ChatCompletionRequest {
            model: Some(self.model.as_str()),
            messages,
            sampling,
        };

        let request = self
            .client
            .post(&self.url)
            .headers(self.headers.clone())
            .json(&body);

        wire::execute(request, ProviderKind::DigitalOcean, operation, &self.model).await
    }
}

/// Endpoints may be configured either as the API base or as the full
/// chat-completions URL
fn chat_completions_url(endpoint: &str) -> String {
    let endpoint = endpoint.trim_end_matches('/');
    if endpoint.ends_with(CHAT_COMPLETIONS_PATH) {
        endpoint.to_string()
    } else {
        format!("{}{}", endpoint, CHAT_COMPLETIONS_PATH)
    }
}

#[async_trait]
impl AiProvider for DigitalOceanClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::DigitalOcean
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
