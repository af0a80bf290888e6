//! Chat endpoint
//!
//! Multi-turn conversations forwarded to the active provider.

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use super::{finish, invalid_body};
use crate::{
    error::{AppResult, ErrorResponse, Operation},
    types::{CanonicalResponse, ChatRequest},
    AppState,
};

/// Handle chat requests
#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "AI",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Generated reply", body = CanonicalResponse),
        (status = 400, description = "Invalid request body or sampling parameters", body = ErrorResponse),
        (status = 502, description = "Provider failed or returned an unexpected response", body = ErrorResponse),
        (status = 504, description = "Provider timed out", body = ErrorResponse)
    )
)]
pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<Json<CanonicalResponse>> {
    let start = Instant::now();

    let result = match payload {
        Ok(Json(request)) => state.gateway.chat(&request).await,
        Err(rejection) => Err(invalid_body(rejection)),
    };

    finish(&state, Operation::Chat, start, result)
}
