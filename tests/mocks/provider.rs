//! Mock chat-completions provider for testing
//!
//! Provides wiremock-based mocks for `POST .../chat/completions` as served by
//! Azure OpenAI (OpenAI-compatible addressing) and DigitalOcean inference.
//!
//! # Example
//!
//! ```rust,ignore
//! let upstream = MockProvider::start().await;
//! upstream.mock_chat_success("Hello!", "gpt-4", 10, 5).await;
//! // Use upstream.uri() as the provider endpoint
//! ```

use serde_json::{json, Value};
use wiremock::{
    matchers::{header_exists, method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Path every provider request lands on
pub const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

/// Mock provider server wrapper
pub struct MockProvider {
    server: MockServer,
}

impl MockProvider {
    /// Start a new mock provider server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Get the mock server URI
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Build a chat completion body the way providers return it
    pub fn completion_body(
        content: &str,
        model: &str,
        prompt_tokens: u32,
        completion_tokens: u32,
    ) -> Value {
        json!({
            "id": "chatcmpl-test123",
            "object": "chat.completion",
            "created": 1706745600,
            "model": model,
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }],
            "usage": {
                "prompt_tokens": prompt_tokens,
                "completion_tokens": completion_tokens,
                "total_tokens": prompt_tokens + completion_tokens
            }
        })
    }

    /// Mock a successful chat completion
    pub async fn mock_chat_success(
        &self,
        content: &str,
        model: &str,
        prompt_tokens: u32,
        completion_tokens: u32,
    ) {
        self.mock_chat_body(Self::completion_body(
            content,
            model,
            prompt_tokens,
            completion_tokens,
        ))
        .await;
    }

    /// Mock a 200 response with an arbitrary JSON body
    pub async fn mock_chat_body(&self, body: Value) {
        Mock::given(method("POST"))
            .and(path(CHAT_COMPLETIONS_PATH))
            .and(header_exists("Authorization"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Mock 401 Unauthorized
    pub async fn mock_chat_unauthorized(&self) {
        self.mock_chat_error(
            401,
            json!({
                "error": {
                    "message": "Incorrect API key provided: sk-test-***",
                    "type": "invalid_request_error",
                    "code": "invalid_api_key"
                }
            }),
        )
        .await;
    }

    /// Mock 404 for an unknown deployment or model
    pub async fn mock_chat_not_found(&self) {
        self.mock_chat_error(
            404,
            json!({
                "error": {
                    "code": "DeploymentNotFound",
                    "message": "The API deployment for this resource does not exist."
                }
            }),
        )
        .await;
    }

    /// Mock 500 Internal Server Error
    pub async fn mock_chat_server_error(&self) {
        self.mock_chat_error(
            500,
            json!({
                "error": {
                    "message": "The server had an error while processing your request",
                    "type": "server_error"
                }
            }),
        )
        .await;
    }

    /// Mock a 200 response whose body is not JSON
    pub async fn mock_chat_garbage(&self) {
        Mock::given(method("POST"))
            .and(path(CHAT_COMPLETIONS_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html>upstream maintenance</html>")
                    .insert_header("content-type", "text/html"),
            )
            .mount(&self.server)
            .await;
    }

    async fn mock_chat_error(&self, status: u16, body: Value) {
        Mock::given(method("POST"))
            .and(path(CHAT_COMPLETIONS_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// JSON bodies of every request the provider received
    pub async fn received_bodies(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|request| serde_json::from_slice(&request.body).expect("request body is JSON"))
            .collect()
    }

    /// All requests the provider received
    pub async fn received_requests(&self) -> Vec<wiremock::Request> {
        self.server.received_requests().await.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completion_body_totals() {
        let body = MockProvider::completion_body("Hi", "gpt-4", 10, 5);
        assert_eq!(body["usage"]["total_tokens"], 15);
        assert_eq!(body["choices"][0]["message"]["content"], "Hi");
    }

    #[tokio::test]
    async fn test_mock_server_starts() {
        let upstream = MockProvider::start().await;
        assert!(upstream.uri().starts_with("http://"));
        assert!(upstream.received_requests().await.is_empty());
    }
}
