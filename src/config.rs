//! Configuration management for the AI gateway
//!
//! Configuration is loaded once from environment variables (optionally seeded
//! from a `.env` file) and is immutable afterwards. Only the settings of the
//! selected provider are read and validated.

use std::env;
use std::fmt;
use std::str::FromStr;

use axum::http::HeaderValue;
use thiserror::Error;
use tracing::Level;

const DEFAULT_AZURE_MODEL: &str = "gpt-4";
const DEFAULT_AZURE_API_VERSION: &str = "2024-02-15-preview";
const DEFAULT_DIGITALOCEAN_ENDPOINT: &str = "https://inference.do-ai.run/v1";
const DEFAULT_DIGITALOCEAN_MODEL: &str = "openai-gpt-4o";
const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful AI assistant.";

/// Log level used when `LOG_LEVEL` is unset
pub const DEFAULT_LOG_LEVEL: Level = Level::INFO;

/// Configuration errors. All of them are fatal at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },

    #[error("Invalid AI_PROVIDER: {0}. Must be 'azure' or 'digitalocean'")]
    UnknownProvider(String),
}

/// The backend provider selected for this process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Azure,
    DigitalOcean,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Azure => "azure",
            ProviderKind::DigitalOcean => "digitalocean",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "azure" => Ok(ProviderKind::Azure),
            "digitalocean" => Ok(ProviderKind::DigitalOcean),
            _ => Err(ConfigError::UnknownProvider(s.to_string())),
        }
    }
}

/// Azure OpenAI connection settings
#[derive(Clone)]
pub struct AzureConfig {
    pub endpoint: String,
    pub api_key: String,
    /// Deployment name in deployment mode, model id otherwise
    pub model: String,
    pub api_version: String,
}

/// DigitalOcean inference connection settings
#[derive(Clone)]
pub struct DigitalOceanConfig {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
}

/// Connection settings of the active provider
#[derive(Debug, Clone)]
pub enum ProviderConfig {
    Azure(AzureConfig),
    DigitalOcean(DigitalOceanConfig),
}

impl ProviderConfig {
    pub fn kind(&self) -> ProviderKind {
        match self {
            ProviderConfig::Azure(_) => ProviderKind::Azure,
            ProviderConfig::DigitalOcean(_) => ProviderKind::DigitalOcean,
        }
    }

    pub fn endpoint(&self) -> &str {
        match self {
            ProviderConfig::Azure(c) => &c.endpoint,
            ProviderConfig::DigitalOcean(c) => &c.endpoint,
        }
    }

    pub fn api_key(&self) -> &str {
        match self {
            ProviderConfig::Azure(c) => &c.api_key,
            ProviderConfig::DigitalOcean(c) => &c.api_key,
        }
    }

    pub fn model(&self) -> &str {
        match self {
            ProviderConfig::Azure(c) => &c.model,
            ProviderConfig::DigitalOcean(c) => &c.model,
        }
    }

    pub fn api_version(&self) -> Option<&str> {
        match self {
            ProviderConfig::Azure(c) => Some(&c.api_version),
            ProviderConfig::DigitalOcean(_) => None,
        }
    }
}

// Keys stay out of Debug output so a logged config never leaks them.
impl fmt::Debug for AzureConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AzureConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl fmt::Debug for DigitalOceanConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigitalOceanConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .finish()
    }
}

/// Allowed CORS origins
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

impl CorsOrigins {
    fn parse(raw: &str) -> Result<Self, ConfigError> {
        let raw = raw.trim();
        if raw == "*" {
            return Ok(CorsOrigins::Any);
        }

        let origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        if origins.is_empty() {
            return Err(ConfigError::Invalid {
                var: "CORS_ORIGINS",
                reason: "no origins given".to_string(),
            });
        }
        if origins.iter().any(|origin| origin == "*") {
            return Ok(CorsOrigins::Any);
        }
        if let Some(bad) = origins.iter().find(|o| HeaderValue::from_str(o).is_err()) {
            return Err(ConfigError::Invalid {
                var: "CORS_ORIGINS",
                reason: format!("'{}' is not a valid origin", bad),
            });
        }

        Ok(CorsOrigins::List(origins))
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    /// Active provider and its connection settings
    pub provider: ProviderConfig,

    /// System prompt used when a request carries none
    pub default_system_prompt: String,

    pub cors_origins: CorsOrigins,
    pub log_level: Level,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Blank values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &'static str| var(name).ok_or(ConfigError::Missing(name));

        let kind: ProviderKind = var("AI_PROVIDER")
            .unwrap_or_else(|| ProviderKind::Azure.as_str().to_string())
            .parse()?;

        let provider = match kind {
            ProviderKind::Azure => ProviderConfig::Azure(AzureConfig {
                endpoint: parse_endpoint("AZURE_OPENAI_ENDPOINT", required("AZURE_OPENAI_ENDPOINT")?)?,
                api_key: required("AZURE_OPENAI_API_KEY")?.trim().to_string(),
                model: var("AZURE_OPENAI_MODEL")
                    .unwrap_or_else(|| DEFAULT_AZURE_MODEL.to_string()),
                api_version: var("AZURE_OPENAI_API_VERSION")
                    .unwrap_or_else(|| DEFAULT_AZURE_API_VERSION.to_string()),
            }),
            ProviderKind::DigitalOcean => ProviderConfig::DigitalOcean(DigitalOceanConfig {
                endpoint: parse_endpoint(
                    "DIGITALOCEAN_INFERENCE_ENDPOINT",
                    var("DIGITALOCEAN_INFERENCE_ENDPOINT")
                        .unwrap_or_else(|| DEFAULT_DIGITALOCEAN_ENDPOINT.to_string()),
                )?,
                api_key: strip_bearer(&required("DIGITALOCEAN_API_KEY")?),
                model: var("DIGITALOCEAN_MODEL")
                    .unwrap_or_else(|| DEFAULT_DIGITALOCEAN_MODEL.to_string()),
            }),
        };

        if provider.api_key().is_empty() {
            return Err(ConfigError::Missing(match kind {
                ProviderKind::Azure => "AZURE_OPENAI_API_KEY",
                ProviderKind::DigitalOcean => "DIGITALOCEAN_API_KEY",
            }));
        }

        Ok(Self {
            host: var("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: match var("API_PORT") {
                Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                    var: "API_PORT",
                    reason: format!("'{}' is not a valid port", raw),
                })?,
                None => 8000,
            },

            provider,

            // A set but blank prompt disables the default system message.
            default_system_prompt: match lookup("DEFAULT_SYSTEM_PROMPT") {
                Some(raw) if raw.trim().is_empty() => String::new(),
                Some(raw) => raw,
                None => DEFAULT_SYSTEM_PROMPT.to_string(),
            },

            cors_origins: match var("CORS_ORIGINS") {
                Some(raw) => CorsOrigins::parse(&raw)?,
                None => CorsOrigins::Any,
            },
            log_level: match var("LOG_LEVEL") {
                Some(raw) => parse_log_level(&raw)?,
                None => DEFAULT_LOG_LEVEL,
            },
        })
    }

    pub fn provider_kind(&self) -> ProviderKind {
        self.provider.kind()
    }

    /// Default tracing filter derived from the configured log level
    pub fn log_filter(&self) -> String {
        log_filter(self.log_level)
    }
}

/// Tracing filter directive for the gateway and its HTTP layer
pub fn log_filter(level: Level) -> String {
    let level = level.as_str().to_ascii_lowercase();
    format!("ai_gateway={level},tower_http={level}")
}

fn parse_endpoint(var: &'static str, raw: String) -> Result<String, ConfigError> {
    let endpoint = raw.trim().trim_end_matches('/').to_string();
    if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
        return Err(ConfigError::Invalid {
            var,
            reason: format!("'{}' is not an http(s) URL", raw),
        });
    }
    Ok(endpoint)
}

fn strip_bearer(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix("Bearer ")
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}

fn parse_log_level(raw: &str) -> Result<Level, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "warning" => Ok(Level::WARN),
        "critical" | "fatal" => Ok(Level::ERROR),
        other => other.parse().map_err(|_| ConfigError::Invalid {
            var: "LOG_LEVEL",
            reason: format!("'{}' is not a log level", raw),
        }),
    }
}
