//! Application configuration via environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_ALLOWED_ORIGINS: &str =
    "http://localhost:3002,http://localhost:63342,http://127.0.0.1:63342";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the external users/departments API, without trailing slash.
    pub upstream_base_url: String,
    pub upstream_timeout: Duration,
    pub port: u16,
    pub session_https_only: bool,
    pub cors_allowed_origins: Vec<String>,
    pub address_data_dir: PathBuf,
    /// Uniform gating policy for proxy and reference-data routes.
    pub proxy_requires_session: bool,
    /// `None` disables the background sweep.
    pub session_sweep_interval: Option<Duration>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required: `EXTERNAL_API_BASE`. Everything else has a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (the environment in
    /// production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let upstream_base_url = lookup("EXTERNAL_API_BASE")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnv("EXTERNAL_API_BASE".into()))?
            .trim()
            .trim_end_matches('/')
            .to_string();

        let timeout_secs: u64 = parse_or(&lookup, "UPSTREAM_TIMEOUT_SECS", 10)?;
        let sweep_secs: u64 = parse_or(&lookup, "SESSION_SWEEP_SECS", 300)?;

        Ok(Self {
            upstream_base_url,
            upstream_timeout: Duration::from_secs(timeout_secs),
            port: parse_or(&lookup, "PORT", 3002)?,
            session_https_only: flag_or(&lookup, "SESSION_HTTPS_ONLY", false)?,
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.into())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            address_data_dir: lookup("ADDRESS_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data")),
            proxy_requires_session: flag_or(&lookup, "PROXY_REQUIRE_SESSION", true)?,
            session_sweep_interval: (sweep_secs > 0).then(|| Duration::from_secs(sweep_secs)),
        })
    }
}

/// Configuration for testing; all fields settable directly.
impl Config {
    pub fn test_default() -> Self {
        Self {
            upstream_base_url: "http://127.0.0.1:9/api".into(),
            upstream_timeout: Duration::from_secs(10),
            port: 3002,
            session_https_only: false,
            cors_allowed_origins: vec!["http://localhost:3002".into()],
            address_data_dir: PathBuf::from("data"),
            proxy_requires_session: true,
            session_sweep_interval: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnv(String),

    #[error("invalid value for {key}: {value:?}")]
    InvalidEnv { key: String, value: String },
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
            key: key.into(),
            value: raw,
        }),
    }
}

fn flag_or<F>(lookup: &F, key: &str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => match raw.trim() {
            "true" | "True" | "1" => Ok(true),
            "false" | "False" | "0" => Ok(false),
            _ => Err(ConfigError::InvalidEnv {
                key: key.into(),
                value: raw,
            }),
        },
    }
}
