//! OpenAPI specification for the gateway
//!
//! Aggregates all endpoints and schemas into a single OpenAPI document.

use utoipa::OpenApi;

use crate::{
    error::{ErrorBody, ErrorDetails, ErrorResponse, Operation},
    routes::{
        health::{ConfigurationSummary, HealthResponse},
        root::{EndpointIndex, ServiceInfo},
    },
    types::{
        CanonicalResponse, ChatRequest, CompletionRequest, Message, Role, SamplingParams, Usage,
    },
};

/// OpenAPI specification for the AI API Gateway
#[derive(OpenApi)]
#[openapi(
    info(
        title = "AI API Gateway",
        description = "Unified interface to Azure OpenAI and DigitalOcean inference. \
                       Set AI_PROVIDER to `azure` or `digitalocean` and supply that provider's credentials."
    ),
    paths(
        crate::routes::root::root,
        crate::routes::health::health_check,
        crate::routes::chat::chat,
        crate::routes::completion::completion
    ),
    components(
        schemas(
            // Requests
            Role,
            Message,
            SamplingParams,
            ChatRequest,
            CompletionRequest,
            // Responses
            Usage,
            CanonicalResponse,
            HealthResponse,
            ConfigurationSummary,
            ServiceInfo,
            EndpointIndex,
            // Errors
            Operation,
            ErrorResponse,
            ErrorBody,
            ErrorDetails,
        )
    ),
    tags(
        (name = "AI", description = "Chat and completion endpoints"),
        (name = "Service", description = "Service information and health")
    )
)]
pub struct ApiDoc;
