//! Service information endpoint

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::AppState;

/// Paths of the completion endpoints
#[derive(Debug, Serialize, ToSchema)]
pub struct EndpointIndex {
    pub chat: &'static str,
    pub completion: &'static str,
}

/// Static service description
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceInfo {
    pub service: &'static str,
    pub version: &'static str,
    pub provider: String,
    pub docs: &'static str,
    pub health: &'static str,
    pub endpoints: EndpointIndex,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Service",
    responses((status = 200, description = "Service information", body = ServiceInfo))
)]
pub async fn root(State(state): State<Arc<AppState>>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: "AI API Gateway",
        version: env!("CARGO_PKG_VERSION"),
        provider: state.config.provider_kind().to_string(),
        docs: "/docs",
        health: "/health",
        endpoints: EndpointIndex {
            chat: "/api/chat",
            completion: "/api/completion",
        },
    })
}
