//! Completion endpoint
//!
//! A single prompt, sent upstream as a one-message chat.

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use super::{finish, invalid_body};
use crate::{
    error::{AppResult, ErrorResponse, Operation},
    types::{CanonicalResponse, CompletionRequest},
    AppState,
};

/// Handle single-prompt completion requests
#[utoipa::path(
    post,
    path = "/api/completion",
    tag = "AI",
    request_body = CompletionRequest,
    responses(
        (status = 200, description = "Generated reply", body = CanonicalResponse),
        (status = 400, description = "Invalid request body or sampling parameters", body = ErrorResponse),
        (status = 502, description = "Provider failed or returned an unexpected response", body = ErrorResponse),
        (status = 504, description = "Provider timed out", body = ErrorResponse)
    )
)]
pub async fn completion(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CompletionRequest>, JsonRejection>,
) -> AppResult<Json<CanonicalResponse>> {
    let start = Instant::now();

    let result = match payload {
        Ok(Json(request)) => state.gateway.complete(&request).await,
        Err(rejection) => Err(invalid_body(rejection)),
    };

    finish(&state, Operation::Completion, start, result)
}
