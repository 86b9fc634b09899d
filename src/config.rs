//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults. The provider API credential is required: its
//! absence is a fatal startup condition, not a per-request error.

use anyhow::Context;
use std::env;
use std::fmt;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Completion provider configuration
    pub provider: ProviderConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Completion provider configuration
#[derive(Clone)]
pub struct ProviderConfig {
    /// API credential for the completion endpoint
    pub api_key: String,
    /// Base URL of the OpenAI-compatible API
    pub base_url: String,
    /// Model identifier to request completions from
    pub model: String,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &"[redacted]")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    ///
    /// Fails if `HF_TOKEN` is not set.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key =
            env::var("HF_TOKEN").context("HF_TOKEN environment variable is required")?;

        Ok(Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            provider: ProviderConfig {
                api_key,
                base_url: env::var("LUMO_BASE_URL")
                    .unwrap_or_else(|_| crate::provider::DEFAULT_BASE_URL.to_string()),
                model: env::var("LUMO_MODEL")
                    .unwrap_or_else(|_| crate::provider::DEFAULT_MODEL.to_string()),
            },
        })
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_config_debug_redacts_api_key() {
        let config = ProviderConfig {
            api_key: "hf_secret".to_string(),
            base_url: "http://localhost".to_string(),
            model: "test".to_string(),
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hf_secret"));
        assert!(debug.contains("[redacted]"));
    }

    #[test]
    fn server_addr_joins_host_and_port() {
        let config = Config {
            server: ServerConfig {
                port: 9000,
                host: "127.0.0.1".to_string(),
            },
            provider: ProviderConfig {
                api_key: "k".to_string(),
                base_url: "http://localhost".to_string(),
                model: "m".to_string(),
            },
        };
        assert_eq!(config.server_addr(), "127.0.0.1:9000");
    }
}
