//! Process configuration, read once at startup

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use spotlight_exa::{ExaConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Settings for the whole server
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Exa credential and connection settings
    pub exa: ExaConfig,
    /// Listen port (bound on all interfaces)
    pub port: u16,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Expects:
    /// - EXA_API_KEY: Exa API key (required)
    /// - EXA_BASE_URL: API root (default https://api.exa.ai)
    /// - EXA_TIMEOUT_SECS: per-call timeout (default 30)
    /// - SERVER_PORT: listen port (default 8000)
    /// - STATIC_DIR: static asset directory (default "static")
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get("EXA_API_KEY").ok_or(ConfigError::MissingVar("EXA_API_KEY"))?;

        let timeout_secs = match get("EXA_TIMEOUT_SECS") {
            Some(raw) => {
                let parsed = raw.trim().parse::<u64>().ok().filter(|secs| *secs > 0);
                parsed.ok_or_else(|| {
                    ConfigError::invalid("EXA_TIMEOUT_SECS", raw, "expected a positive integer")
                })?
            }
            None => DEFAULT_TIMEOUT_SECS,
        };

        let port = match get("SERVER_PORT") {
            Some(raw) => {
                let parsed = raw.trim().parse::<u16>().ok();
                parsed.ok_or_else(|| {
                    ConfigError::invalid("SERVER_PORT", raw, "expected a port number")
                })?
            }
            None => DEFAULT_PORT,
        };

        Ok(Self {
            exa: ExaConfig {
                api_key: api_key.trim().to_string(),
                base_url: get("EXA_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                timeout: Duration::from_secs(timeout_secs),
            },
            port,
            static_dir: get("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Set {0} in your environment or .env file")]
    MissingVar(&'static str),

    #[error("Invalid value '{value}' for {name}: {reason}")]
    InvalidVar {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl ConfigError {
    fn invalid(name: &'static str, value: String, reason: &'static str) -> Self {
        ConfigError::InvalidVar {
            name,
            value,
            reason,
        }
    }
}
