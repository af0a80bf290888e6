//! Header utilities for provider requests
//!
//! Requests to providers carry only the credential header and the JSON content
//! type. Nothing from the incoming client request is forwarded.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::config::ConfigError;

/// Azure's deployment-style authentication header
pub const AZURE_API_KEY_HEADER: HeaderName = HeaderName::from_static("api-key");

/// Build headers authenticating with `Authorization: Bearer <key>`
pub fn bearer_headers(api_key: &str, var: &'static str) -> Result<HeaderMap, ConfigError> {
    build_headers(AUTHORIZATION, &format!("Bearer {}", api_key), var)
}

/// Build headers authenticating with Azure's `api-key: <key>`
pub fn api_key_headers(api_key: &str, var: &'static str) -> Result<HeaderMap, ConfigError> {
    build_headers(AZURE_API_KEY_HEADER, api_key, var)
}

fn build_headers(
    name: HeaderName,
    credential: &str,
    var: &'static str,
) -> Result<HeaderMap, ConfigError> {
    let mut value = HeaderValue::from_str(credential).map_err(|_| ConfigError::Invalid {
        var,
        reason: "contains characters not allowed in an HTTP header".to_string(),
    })?;
    value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(name, value);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Ok(headers)
}
