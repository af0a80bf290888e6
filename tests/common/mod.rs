//! Common test utilities for the AI gateway
//!
//! Shared fixtures and the harness wiring the real router to a mock provider.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use ai_gateway::{routes, AppState, Config, ConfigError};
use axum_test::TestServer;

use crate::mocks::MockProvider;

/// Test configuration constants
pub mod constants {
    /// API key configured for the Azure provider
    pub const TEST_AZURE_API_KEY: &str = "azure-secret-key-do-not-leak";
    /// API key configured for the DigitalOcean provider
    pub const TEST_DIGITALOCEAN_API_KEY: &str = "do-secret-key-do-not-leak";
    /// Default system prompt used by the harness
    pub const TEST_SYSTEM_PROMPT: &str = "You are a helpful AI assistant.";
    pub const TEST_AZURE_MODEL: &str = "gpt-4";
    pub const TEST_DIGITALOCEAN_MODEL: &str = "llama3.3-70b-instruct";
}

/// Load a config from an explicit variable set, ignoring the process environment
pub fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|name| vars.get(name).cloned())
}

/// Azure settings pointing at `endpoint`
pub fn azure_vars(endpoint: &str) -> Vec<(&'static str, String)> {
    vec![
        ("AI_PROVIDER", "azure".to_string()),
        ("AZURE_OPENAI_ENDPOINT", endpoint.to_string()),
        ("AZURE_OPENAI_API_KEY", constants::TEST_AZURE_API_KEY.to_string()),
        ("AZURE_OPENAI_MODEL", constants::TEST_AZURE_MODEL.to_string()),
        ("DEFAULT_SYSTEM_PROMPT", constants::TEST_SYSTEM_PROMPT.to_string()),
    ]
}

/// DigitalOcean settings pointing at `endpoint`
pub fn digitalocean_vars(endpoint: &str) -> Vec<(&'static str, String)> {
    vec![
        ("AI_PROVIDER", "digitalocean".to_string()),
        ("DIGITALOCEAN_INFERENCE_ENDPOINT", endpoint.to_string()),
        (
            "DIGITALOCEAN_API_KEY",
            constants::TEST_DIGITALOCEAN_API_KEY.to_string(),
        ),
        (
            "DIGITALOCEAN_MODEL",
            constants::TEST_DIGITALOCEAN_MODEL.to_string(),
        ),
        ("DEFAULT_SYSTEM_PROMPT", constants::TEST_SYSTEM_PROMPT.to_string()),
    ]
}

/// Test harness for end-to-end gateway tests
///
/// Creates the real router and application state with the provider endpoint
/// pointing at a wiremock server.
///
/// ```ignore
/// let harness = TestHarness::azure().await;
/// harness.upstream.mock_chat_success("Hello!", "gpt-4", 10, 5).await;
/// let response = harness.server.post("/api/chat").json(&body).await;
/// ```
pub struct TestHarness {
    pub server: TestServer,
    pub upstream: MockProvider,
}

impl TestHarness {
    /// Harness with the Azure provider active
    pub async fn azure() -> Self {
        Self::with_vars(azure_vars).await
    }

    /// Harness with the DigitalOcean provider active
    pub async fn digitalocean() -> Self {
        Self::with_vars(digitalocean_vars).await
    }

    async fn with_vars(vars: fn(&str) -> Vec<(&'static str, String)>) -> Self {
        routes::metrics::init_metrics();
        let upstream = MockProvider::start().await;

        let vars = vars(&upstream.uri());
        let borrowed: Vec<(&str, &str)> = vars.iter().map(|(k, v)| (*k, v.as_str())).collect();
        let config = config_from(&borrowed).expect("Failed to load test configuration");

        let state = Arc::new(AppState::new(config).expect("Failed to create app state"));
        let app = routes::create_router(state);
        let server = TestServer::new(app).expect("Failed to create test server");

        Self { server, upstream }
    }
}
