use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::errors::ConfigError;

pub const DEFAULT_BIND: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_WORKERS: usize = 4;
pub const DEFAULT_AGENT_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Relay service settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub workers: usize,
    pub agent_timeout: Duration,
    /// `None` keeps CORS fully permissive.
    pub cors_origins: Option<Vec<String>>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so callers can supply
    /// values without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind = lookup("SUMMARIZER_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let port = parse_or("SUMMARIZER_PORT", lookup("SUMMARIZER_PORT"), DEFAULT_PORT)?;
        let addr = format!("{bind}:{port}")
            .parse()
            .map_err(|_| ConfigError::Invalid {
                name: "SUMMARIZER_BIND",
                value: bind.clone(),
            })?;

        let workers = parse_or(
            "SUMMARIZER_WORKERS",
            lookup("SUMMARIZER_WORKERS"),
            DEFAULT_WORKERS,
        )?;
        if workers == 0 {
            return Err(ConfigError::Invalid {
                name: "SUMMARIZER_WORKERS",
                value: "0".to_string(),
            });
        }

        let timeout_secs = parse_or(
            "SUMMARIZER_AGENT_TIMEOUT_SECS",
            lookup("SUMMARIZER_AGENT_TIMEOUT_SECS"),
            DEFAULT_AGENT_TIMEOUT_SECS,
        )?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "SUMMARIZER_AGENT_TIMEOUT_SECS",
                value: "0".to_string(),
            });
        }

        let cors_origins = lookup("SUMMARIZER_CORS_ORIGINS")
            .map(|raw| {
                let origins: Vec<String> = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(ToString::to_string)
                    .collect();
                // An empty allow-list would silently block every origin.
                if origins.is_empty() {
                    Err(ConfigError::Invalid {
                        name: "SUMMARIZER_CORS_ORIGINS",
                        value: raw,
                    })
                } else {
                    Ok(origins)
                }
            })
            .transpose()?;

        Ok(Self {
            addr,
            workers,
            agent_timeout: Duration::from_secs(timeout_secs),
            cors_origins,
        })
    }
}

/// Credentials and model settings for the LLM-backed host summarizer.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub openai_api_key: String,
    pub openai_org_id: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
}

impl AgentConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            openai_api_key: env::var("OPENAI_API_KEY").map_err(|e| ConfigError::Missing {
                name: "OPENAI_API_KEY",
                reason: e.to_string(),
            })?,
            openai_org_id: env::var("OPENAI_ORG_ID").ok(),
            openai_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string()),
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string()),
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    raw.map(|value| {
        value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value })
    })
    .transpose()
    .map(|parsed| parsed.unwrap_or(default))
}
