//! AI Gateway - one stable API over interchangeable AI completion providers
//!
//! This library provides the core functionality for the gateway server. It
//! accepts chat and single-prompt requests, forwards them to the configured
//! provider (Azure OpenAI or DigitalOcean inference) and returns a uniform
//! response shape.

pub mod config;
pub mod docs;
pub mod error;
pub mod gateway;
pub mod provider;
pub mod routes;
pub mod types;

use std::time::Duration;

use anyhow::Result;

pub use crate::config::{Config, ConfigError, ProviderKind};
pub use crate::gateway::Gateway;
pub use crate::provider::{AiProvider, Provider};

/// Timeout applied to every outbound provider request
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(300);

/// Application state shared across all request handlers
pub struct AppState {
    pub config: Config,
    /// Normalization layer wrapping the provider selected at startup
    pub gateway: Gateway,
}

impl AppState {
    /// Create a new application state
    ///
    /// No network traffic happens here; an invalid credential format is
    /// reported as a [`ConfigError`].
    pub fn new(config: Config) -> Result<Self> {
        // Initialize HTTP client with connection pooling
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(100)
            .timeout(UPSTREAM_TIMEOUT)
            .build()?;

        let provider = Provider::from_config(http_client, &config.provider)?;
        let gateway = Gateway::new(provider, config.default_system_prompt.clone());

        Ok(Self { config, gateway })
    }
}
