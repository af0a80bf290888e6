//! Health check endpoint
//!
//! Reports process status and a redacted view of the active configuration.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::AppState;

/// Redacted view of the provider configuration
#[derive(Debug, Serialize, ToSchema)]
pub struct ConfigurationSummary {
    pub ai_provider: String,
    pub endpoint_configured: bool,
    pub api_key_configured: bool,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub configuration: ConfigurationSummary,
}

/// Health check endpoint
///
/// Never includes the API key itself, only whether one is set.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Service",
    responses((status = 200, description = "Service is running", body = HealthResponse))
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let provider = &state.config.provider;

    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "Service is running".to_string(),
        configuration: ConfigurationSummary {
            ai_provider: provider.kind().to_string(),
            endpoint_configured: !provider.endpoint().is_empty(),
            api_key_configured: !provider.api_key().is_empty(),
            model: provider.model().to_string(),
            api_version: provider.api_version().map(str::to_string),
        },
    })
}
