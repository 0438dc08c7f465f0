//! Server configuration, read from the environment.
//!
//! ```bash
//! MDSNIPS_PORT=3000
//! MDSNIPS_INDEX_DIR=./data/index      # empty = in-memory collection
//! MDSNIPS_STORE_TIMEOUT_SECS=5
//!
//! # Basic auth, enabled when both are set
//! MDSNIPS_USER=admin
//! MDSNIPS_PASS=secret
//!
//! # Mutating requests per client per window
//! MDSNIPS_RATE_LIMIT=5
//! MDSNIPS_RATE_WINDOW_SECS=60
//!
//! ENV=PROD                            # redirect http to https
//! ```

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// `None` keeps the collection in memory.
    pub index_dir: Option<PathBuf>,
    pub store_timeout: Duration,
    pub basic_auth: Option<BasicAuthConfig>,
    pub rate_limit: RateLimitConfig,
    pub force_https: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAuthConfig {
    pub user: String,
    pub pass: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 5,
            window: Duration::from_secs(60),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            index_dir: Some(PathBuf::from("./data/index")),
            store_timeout: Duration::from_secs(5),
            basic_auth: None,
            rate_limit: RateLimitConfig::default(),
            force_https: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}: invalid value `{value}`")]
    InvalidValue { var: &'static str, value: String },

    #[error("MDSNIPS_USER and MDSNIPS_PASS must be set together")]
    IncompleteBasicAuth,
}

impl Config {
    /// Load from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Load from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let port = parse_or(&lookup, "MDSNIPS_PORT", defaults.port)?;

        let index_dir = match lookup("MDSNIPS_INDEX_DIR") {
            Some(dir) if dir.is_empty() => None,
            Some(dir) => Some(PathBuf::from(dir)),
            None => defaults.index_dir,
        };

        let store_timeout = Duration::from_secs(parse_or(
            &lookup,
            "MDSNIPS_STORE_TIMEOUT_SECS",
            defaults.store_timeout.as_secs(),
        )?);

        let user = lookup("MDSNIPS_USER").filter(|v| !v.is_empty());
        let pass = lookup("MDSNIPS_PASS").filter(|v| !v.is_empty());
        let basic_auth = match (user, pass) {
            (Some(user), Some(pass)) => Some(BasicAuthConfig { user, pass }),
            (None, None) => None,
            _ => return Err(ConfigError::IncompleteBasicAuth),
        };

        let rate_limit = RateLimitConfig {
            max_requests: parse_or(
                &lookup,
                "MDSNIPS_RATE_LIMIT",
                defaults.rate_limit.max_requests,
            )?,
            window: Duration::from_secs(parse_or(
                &lookup,
                "MDSNIPS_RATE_WINDOW_SECS",
                defaults.rate_limit.window.as_secs(),
            )?),
        };

        let force_https = lookup("ENV").is_some_and(|v| v == "PROD");

        Ok(Self {
            port,
            index_dir,
            store_timeout,
            basic_auth,
            rate_limit,
            force_https,
        })
    }
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { var, value }),
    }
}
