//! HTTP routes for the AI gateway
//!
//! This module defines all HTTP endpoints exposed by the gateway.

pub mod chat;
pub mod completion;
pub mod docs;
pub mod health;
pub mod metrics;
pub mod root;

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::rejection::JsonRejection,
    http::HeaderValue,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::{
    config::CorsOrigins,
    error::{AppError, AppResult, Operation},
    provider::AiProvider,
    types::CanonicalResponse,
    AppState,
};

/// Create the main application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/", get(root::root))
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics::prometheus_metrics))
        .route("/api/chat", post(chat::chat))
        .route("/api/completion", post(completion::completion))
        .merge(docs::create_docs_router())
        // Global middleware (applied to all routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// CORS configuration
///
/// Credentials are only allowed for an explicit origin list; browsers reject
/// them together with a wildcard origin.
fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    match origins {
        CorsOrigins::Any => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsOrigins::List(list) => {
            let origins: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| HeaderValue::from_str(origin).ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(AllowMethods::mirror_request())
                .allow_headers(AllowHeaders::mirror_request())
                .allow_credentials(true)
        }
    }
}

/// Map a body extraction failure to a validation error
fn invalid_body(rejection: JsonRejection) -> AppError {
    AppError::Validation(format!("Invalid request body: {}", rejection.body_text()))
}

/// Record metrics and log the outcome of a provider-backed request
fn finish(
    state: &AppState,
    operation: Operation,
    start: Instant,
    result: AppResult<CanonicalResponse>,
) -> AppResult<Json<CanonicalResponse>> {
    let provider = state.gateway.provider().kind();
    let duration = start.elapsed().as_secs_f64();
    let outcome = match &result {
        Ok(_) => "success",
        Err(e) => e.kind(),
    };
    metrics::record_request(provider.as_str(), operation.as_str(), outcome, duration);

    match &result {
        Ok(response) => info!(
            provider = %provider,
            operation = %operation,
            model = %response.model,
            total_tokens = response.usage.total_tokens,
            duration_ms = %format!("{:.2}", duration * 1000.0),
            "Request completed"
        ),
        Err(e) => warn!(
            provider = %provider,
            operation = %operation,
            kind = outcome,
            error = %e,
            duration_ms = %format!("{:.2}", duration * 1000.0),
            "Request failed"
        ),
    }

    result.map(Json)
}
