use std::time::Duration;

use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Data backend
    pub data_backend: DataBackend,
    pub graphql_endpoint: Option<String>,
    pub graphql_api_key: Option<String>,
    pub graphql_timeout: Duration,

    // Web Server
    pub web_host: String,
    pub web_port: u16,

    // Identity (delegated to the upstream session proxy)
    pub identity_header: String,
    pub sign_in_url: String,
    pub sign_out_url: String,

    // Pages
    pub top_communities_limit: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataBackend {
    /// Remote GraphQL service
    Graphql,
    /// Process-local store, for development without the remote service
    Memory,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required environment variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let data_backend = parse_data_backend(&env_or_default("DATA_BACKEND", "graphql"))?;

        let graphql_endpoint = match data_backend {
            DataBackend::Graphql => Some(required_env("GRAPHQL_ENDPOINT")?),
            DataBackend::Memory => optional_env("GRAPHQL_ENDPOINT"),
        };

        Ok(Self {
            data_backend,
            graphql_endpoint,
            graphql_api_key: optional_env("GRAPHQL_API_KEY"),
            graphql_timeout: Duration::from_secs(parse_env_u64("GRAPHQL_TIMEOUT_SECS", 30)?),

            web_host: env_or_default("WEB_HOST", "0.0.0.0"),
            web_port: parse_env_u16("WEB_PORT", 8080)?,

            identity_header: env_or_default("IDENTITY_HEADER", "x-forwarded-user").to_lowercase(),
            sign_in_url: env_or_default("SIGN_IN_URL", "/oauth2/sign_in"),
            sign_out_url: env_or_default("SIGN_OUT_URL", "/oauth2/sign_out"),

            top_communities_limit: parse_env_u32("TOP_COMMUNITIES_LIMIT", 10)?,
        })
    }

    /// Configuration for tests: in-memory backend, default identity header.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            data_backend: DataBackend::Memory,
            graphql_endpoint: None,
            graphql_api_key: None,
            graphql_timeout: Duration::from_secs(5),
            web_host: "127.0.0.1".to_string(),
            web_port: 0,
            identity_header: "x-forwarded-user".to_string(),
            sign_in_url: "/oauth2/sign_in".to_string(),
            sign_out_url: "/oauth2/sign_out".to_string(),
            top_communities_limit: 10,
        }
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_communities_limit == 0 {
            return Err(ConfigError::InvalidValue {
                name: "TOP_COMMUNITIES_LIMIT".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.identity_header.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "IDENTITY_HEADER".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        if self.data_backend == DataBackend::Graphql {
            let endpoint = self
                .graphql_endpoint
                .as_deref()
                .ok_or_else(|| ConfigError::MissingEnvVar("GRAPHQL_ENDPOINT".to_string()))?;
            let parsed = Url::parse(endpoint).map_err(|e| ConfigError::InvalidValue {
                name: "GRAPHQL_ENDPOINT".to_string(),
                message: e.to_string(),
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ConfigError::InvalidValue {
                    name: "GRAPHQL_ENDPOINT".to_string(),
                    message: format!("must be an http(s) URL, got scheme '{}'", parsed.scheme()),
                });
            }
        }
        Ok(())
    }
}

fn required_env(name: &str) -> Result<String, ConfigError> {
    optional_env(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_u32(name: &str, default: u32) -> Result<u32, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_u16(name: &str, default: u16) -> Result<u16, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_data_backend(value: &str) -> Result<DataBackend, ConfigError> {
    match value.to_lowercase().as_str() {
        "graphql" => Ok(DataBackend::Graphql),
        "memory" => Ok(DataBackend::Memory),
        _ => Err(ConfigError::InvalidValue {
            name: "DATA_BACKEND".to_string(),
            message: format!("must be 'graphql' or 'memory', got '{value}'"),
        }),
    }
}
