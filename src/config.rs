//! Configuration management for the study planner.
//!
//! Configuration is read from environment variables:
//! - `GEMINI_API_KEY` - Optional. Read on every generation request, not at startup.
//!   Without it the request uses template tasks.
//! - `GEMINI_MODEL` - Optional. Defaults to `gemini-pro`.
//! - `GEMINI_API_BASE` - Optional. Endpoint base URL.
//! - `GEMINI_TEMPERATURE`, `GEMINI_TOP_P`, `GEMINI_TOP_K` - Optional sampling parameters.
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `3000`.
//! - `JWT_SECRET` - Required. Secret used to sign session tokens.
//! - `DASHBOARD_PASSWORD` - Required. Password accepted by `/api/auth/login`.
//! - `JWT_TTL_DAYS` - Optional. Session lifetime in days. Defaults to `30`.

use std::str::FromStr;

use thiserror::Error;

use crate::llm::{ApiKey, GenerationOptions, GEMINI_API_BASE};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Generative-language endpoint settings.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: ApiKey,
    pub model: String,
    pub api_base: String,
    pub options: GenerationOptions,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: ApiKey::default(),
            model: "gemini-pro".to_string(),
            api_base: GEMINI_API_BASE.to_string(),
            options: GenerationOptions::default(),
        }
    }
}

/// Session auth settings.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub dashboard_password: String,
    pub jwt_ttl_days: i64,
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    pub gemini: GeminiConfig,

    pub auth: AuthConfig,
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

fn parse_or<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| ConfigError::InvalidValue(name.to_string(), format!("{}", e))),
        Err(_) => Ok(default),
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `JWT_SECRET` or `DASHBOARD_PASSWORD`
    /// is not set, and `ConfigError::InvalidValue` for unparsable numbers.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = GeminiConfig::default();
        let gemini = GeminiConfig {
            api_key: defaults.api_key,
            model: std::env::var("GEMINI_MODEL").unwrap_or(defaults.model),
            api_base: std::env::var("GEMINI_API_BASE").unwrap_or(defaults.api_base),
            options: GenerationOptions {
                temperature: parse_or("GEMINI_TEMPERATURE", defaults.options.temperature)?,
                top_p: parse_or("GEMINI_TOP_P", defaults.options.top_p)?,
                top_k: parse_or("GEMINI_TOP_K", defaults.options.top_k)?,
            },
        };

        let auth = AuthConfig {
            jwt_secret: required("JWT_SECRET")?,
            dashboard_password: required("DASHBOARD_PASSWORD")?,
            jwt_ttl_days: parse_or("JWT_TTL_DAYS", 30)?,
        };

        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_or("PORT", 3000)?,
            gemini,
            auth,
        })
    }

    /// Create a config with custom auth values (useful for testing).
    pub fn new(jwt_secret: impl Into<String>, dashboard_password: impl Into<String>) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            gemini: GeminiConfig::default(),
            auth: AuthConfig {
                jwt_secret: jwt_secret.into(),
                dashboard_password: dashboard_password.into(),
                jwt_ttl_days: 30,
            },
        }
    }

    /// Whether a model key is available right now.
    pub fn ai_enabled(&self) -> bool {
        self.gemini.api_key.resolve().is_some()
    }
}
