//! Error types for the AI gateway
//!
//! This module defines the request-time error kinds and their JSON rendering.
//! Startup failures live in [`crate::config::ConfigError`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::config::ProviderKind;

/// The provider operation an error originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Chat,
    Completion,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Chat => "chat",
            Operation::Completion => "completion",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    /// Request body failed schema or range checks; no upstream call was made
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Network failure or non-2xx status from the provider
    #[error("{provider} {operation} request failed: {message}")]
    Upstream {
        provider: ProviderKind,
        operation: Operation,
        status: Option<u16>,
        timed_out: bool,
        message: String,
    },

    /// Provider answered with a body that is not a chat completion
    #[error("{provider} {operation} response could not be parsed: {message}")]
    Parse {
        provider: ProviderKind,
        operation: Operation,
        message: String,
    },

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Wrap a transport-level failure from the HTTP client
    pub fn transport(provider: ProviderKind, operation: Operation, err: &reqwest::Error) -> Self {
        AppError::Upstream {
            provider,
            operation,
            status: err.status().map(|s| s.as_u16()),
            timed_out: err.is_timeout(),
            message: if err.is_timeout() {
                "request to provider timed out".to_string()
            } else if err.is_connect() {
                "could not connect to provider".to_string()
            } else {
                "provider request failed".to_string()
            },
        }
    }

    /// Short label used for metrics and logs
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation_error",
            AppError::Upstream { .. } => "upstream_error",
            AppError::Parse { .. } => "parse_error",
            AppError::Internal(_) => "internal_error",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream { timed_out: true, .. } => StatusCode::GATEWAY_TIMEOUT,
            AppError::Upstream { .. } | AppError::Parse { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

/// Error details
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ErrorDetails>,
}

/// Upstream context attached to provider failures
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorDetails {
    pub provider: String,
    pub operation: Operation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_status: Option<u16>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let (code, message, details) = match &self {
            AppError::Validation(msg) => ("VALIDATION_ERROR", msg.clone(), None),
            AppError::Upstream {
                provider,
                operation,
                status: upstream_status,
                timed_out,
                ..
            } => (
                if *timed_out {
                    "UPSTREAM_TIMEOUT"
                } else {
                    "UPSTREAM_ERROR"
                },
                self.to_string(),
                Some(ErrorDetails {
                    provider: provider.to_string(),
                    operation: *operation,
                    upstream_status: *upstream_status,
                }),
            ),
            AppError::Parse {
                provider,
                operation,
                ..
            } => (
                "UPSTREAM_PARSE_ERROR",
                format!("{} returned an unexpected {} response", provider, operation),
                Some(ErrorDetails {
                    provider: provider.to_string(),
                    operation: *operation,
                    upstream_status: None,
                }),
            ),
            AppError::Internal(_) => (
                "INTERNAL_ERROR",
                "Internal server error".to_string(),
                None,
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
