use std::{env, time::Duration};

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

#[derive(Clone, Debug)]
pub struct Config {
    pub openai_api_key: SecretString,
    pub openai_api_base: String,
    pub openai_model: String,
    pub vector_store_id: Option<String>,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub agent_timeout_secs: u64,
    pub agent_max_retries: u32,
    pub retrieval_max_results: usize,
    pub max_upload_bytes: usize,
    pub vector_store_poll_interval_ms: u64,
    pub vector_store_max_polls: u32,
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            openai_api_key: SecretString::from(env::var("OPENAI_API_KEY").unwrap_or_default()),
            openai_api_base: env::var("OPENAI_API_BASE")
                .unwrap_or_else(|_| DEFAULT_OPENAI_API_BASE.to_string()),
            openai_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string()),
            vector_store_id: env::var("OPENAI_VECTOR_STORE_ID")
                .ok()
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty()),
            web_server_host: env::var("WEB_SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            web_server_port: parse_env("WEB_SERVER_PORT", 8000),
            agent_timeout_secs: parse_env("AGENT_TIMEOUT_SECS", 120),
            agent_max_retries: parse_env("AGENT_MAX_RETRIES", 1),
            retrieval_max_results: parse_env("RETRIEVAL_MAX_RESULTS", 5),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 20 * 1024 * 1024),
            vector_store_poll_interval_ms: parse_env("VECTOR_STORE_POLL_INTERVAL_MS", 1000),
            vector_store_max_polls: parse_env("VECTOR_STORE_MAX_POLLS", 60),
            cors_allowed_origins: parse_origins(
                &env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()),
            ),
        }
    }

    /// Reports configuration the upstream provider will reject.
    pub fn validate_for_production(&self) -> AppResult<()> {
        if self.openai_api_key.expose_secret().trim().is_empty() {
            return Err(AppError::ConfigurationError(
                "OPENAI_API_KEY not found. Ensure .env file is present and configured.".to_string(),
            ));
        }

        if let Some(id) = &self.vector_store_id {
            if !id.starts_with("vs_") {
                return Err(AppError::ConfigurationError(format!(
                    "OPENAI_VECTOR_STORE_ID '{}' does not look like a vector store id (expected 'vs_' prefix)",
                    id
                )));
            }
        }

        if self.agent_timeout_secs == 0 {
            return Err(AppError::ConfigurationError(
                "AGENT_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    pub fn agent_timeout(&self) -> Duration {
        Duration::from_secs(self.agent_timeout_secs)
    }

    pub fn vector_store_poll_interval(&self) -> Duration {
        Duration::from_millis(self.vector_store_poll_interval_ms)
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_allowed_origins.iter().any(|origin| origin == "*")
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            openai_api_key: SecretString::from("sk-test".to_string()),
            openai_api_base: "http://127.0.0.1:9/v1".to_string(),
            openai_model: "gpt-test".to_string(),
            vector_store_id: Some("vs_test".to_string()),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8000,
            agent_timeout_secs: 5,
            agent_max_retries: 0,
            retrieval_max_results: 3,
            max_upload_bytes: 1024,
            vector_store_poll_interval_ms: 1,
            vector_store_max_polls: 3,
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
