//! AI provider abstraction layer
//!
//! Defines the capability set every backend offers and the closed set of
//! backends this gateway can run against. Exactly one is active per process.

pub mod azure;
pub mod digitalocean;
pub mod headers;
pub mod wire;

use async_trait::async_trait;

use crate::{
    config::{ConfigError, ProviderConfig, ProviderKind},
    error::AppResult,
    types::{CanonicalResponse, Message, SamplingParams},
};

pub use azure::{AzureMode, AzureOpenAI};
pub use digitalocean::DigitalOceanClient;

/// Operations every provider adapter supports
///
/// Implementations own their endpoint shape, auth header and payload
/// schema. Errors are reported with the provider and operation attached and
/// are never retried.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Which backend this adapter talks to
    fn kind(&self) -> ProviderKind;

    /// Configured model identifier
    fn model(&self) -> &str;

    /// Multi-turn chat. `system_prompt` is prepended as a system message
    /// unless empty.
    async fn chat(
        &self,
        messages: &[Message],
        system_prompt: &str,
        sampling: &SamplingParams,
    ) -> AppResult<CanonicalResponse>;

    /// Single-prompt completion, sent as a one-message chat
    async fn complete(
        &self,
        prompt: &str,
        system_prompt: &str,
        sampling: &SamplingParams,
    ) -> AppResult<CanonicalResponse>;
}

/// The active provider, selected once at startup
pub enum Provider {
    Azure(AzureOpenAI),
    DigitalOcean(DigitalOceanClient),
}

impl Provider {
    /// Build the adapter matching the configured provider
    pub fn from_config(
        client: reqwest::Client,
        config: &ProviderConfig,
    ) -> Result<Self, ConfigError> {
        Ok(match config {
            ProviderConfig::Azure(azure) => Provider::Azure(AzureOpenAI::new(client, azure)?),
            ProviderConfig::DigitalOcean(digitalocean) => {
                Provider::DigitalOcean(DigitalOceanClient::new(client, digitalocean)?)
            }
        })
    }

    fn adapter(&self) -> &dyn AiProvider {
        match self {
            Provider::Azure(azure) => azure,
            Provider::DigitalOcean(digitalocean) => digitalocean,
        }
    }
}

#[async_trait]
impl AiProvider for Provider {
    fn kind(&self) -> ProviderKind {
        self.adapter().kind()
    }

    fn model(&self) -> &str {
        self.adapter().model()
    }

    async fn chat(
        &self,
        messages: &[Message],
        system_prompt: &str,
        sampling: &SamplingParams,
    ) -> AppResult<CanonicalResponse> {
        self.adapter().chat(messages, system_prompt, sampling).await
    }

    async fn complete(
        &self,
        prompt: &str,
        system_prompt: &str,
        sampling: &SamplingParams,
    ) -> AppResult<CanonicalResponse> {
        self.adapter().complete(prompt, system_prompt, sampling).await
    }
}
