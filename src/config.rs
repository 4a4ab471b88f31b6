//! Client configuration
//!
//! Settings come from an optional YAML file and are then overridden by
//! environment variables:
//!
//! | Variable | Field |
//! |---|---|
//! | `ADX_SELLER_BASE_URL` | `base_url` |
//! | `ADX_SELLER_ACCESS_TOKEN` | `auth.bearer_token` |
//! | `ADX_SELLER_API_KEY` | `auth.api_key` |
//! | `ADX_SELLER_TIMEOUT_SECS` | `timeout_secs` |
//!
//! ```yaml
//! base_url: https://www.googleapis.com/adexchangeseller/v1/
//! user_agent: nightly-export/1.0
//! timeout_secs: 60
//! rate_limit:
//!   requests_per_second: 5
//!   burst_size: 5
//! auth:
//!   bearer_token: ya29....
//! page_size: 500
//! parquet_compression: zstd
//! ```

use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig, DEFAULT_BASE_URL};
use crate::output::ParquetWriterConfig;
use crate::types::Scope;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

/// Environment variable overriding the base URL
pub const ENV_BASE_URL: &str = "ADX_SELLER_BASE_URL";
/// Environment variable holding a bearer token
pub const ENV_ACCESS_TOKEN: &str = "ADX_SELLER_ACCESS_TOKEN";
/// Environment variable holding an API key
pub const ENV_API_KEY: &str = "ADX_SELLER_API_KEY";
/// Environment variable overriding the request timeout
pub const ENV_TIMEOUT_SECS: &str = "ADX_SELLER_TIMEOUT_SECS";

// ============================================================================
// Client Config
// ============================================================================

/// Everything needed to build a client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the API
    pub base_url: String,

    /// Application fragment appended to the user agent
    pub user_agent: Option<String>,

    /// Request deadline in seconds
    pub timeout_secs: u64,

    /// Request pacing (`null` disables it)
    pub rate_limit: Option<RateLimiterConfig>,

    /// Credential to attach
    pub auth: AuthSettings,

    /// Default `maxResults` for list calls
    pub page_size: Option<u32>,

    /// Compression for Parquet export
    pub parquet_compression: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: None,
            timeout_secs: default_timeout_secs(),
            rate_limit: Some(RateLimiterConfig::default()),
            auth: AuthSettings::default(),
            page_size: None,
            parquet_compression: None,
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

impl ClientConfig {
    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a YAML file; a missing file yields the defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(content) => {
                debug!("Loaded client config from {}", path.display());
                Self::from_yaml_str(&content)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(Error::config(format!(
                "Failed to read config file '{}': {e}",
                path.display()
            ))),
        }
    }

    /// Load an optional file, then apply the process environment
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Override fields from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Override fields from any variable lookup
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = var(ENV_BASE_URL) {
            self.base_url = url;
        }
        if let Some(token) = var(ENV_ACCESS_TOKEN) {
            self.auth.bearer_token = Some(token);
        }
        if let Some(key) = var(ENV_API_KEY) {
            self.auth.api_key = Some(key);
        }
        if let Some(secs) = var(ENV_TIMEOUT_SECS) {
            self.timeout_secs = secs.trim().parse().map_err(|_| {
                Error::config(format!("{ENV_TIMEOUT_SECS} must be a whole number, got '{secs}'"))
            })?;
        }
        Ok(())
    }

    /// Request deadline
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// Transport settings
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(self.base_url.clone())
            .timeout(self.timeout());

        builder = match self.rate_limit {
            Some(ref limit) => builder.rate_limit(limit.clone()),
            None => builder.no_rate_limit(),
        };

        if let Some(ref agent) = self.user_agent {
            builder = builder.user_agent_suffix(agent);
        }

        builder.build()
    }

    /// Consume the config into transport settings
    pub fn into_http_config(self) -> HttpClientConfig {
        self.http_config()
    }

    /// Apply credentials given on the command line
    ///
    /// An explicit API key replaces a bearer token that came from the file
    /// or the environment; an explicit token still wins over both.
    pub fn override_credentials(&mut self, token: Option<&str>, api_key: Option<&str>) {
        if let Some(key) = api_key {
            self.auth.api_key = Some(key.to_string());
            self.auth.bearer_token = None;
        }
        if let Some(token) = token {
            self.auth.bearer_token = Some(token.to_string());
        }
    }

    /// Credential to attach to requests
    pub fn auth_config(&self) -> AuthConfig {
        self.auth.to_auth_config()
    }

    /// Parquet writer settings
    pub fn parquet_config(&self) -> Result<ParquetWriterConfig> {
        match self.parquet_compression {
            Some(ref name) => ParquetWriterConfig::new().with_compression_name(name),
            None => Ok(ParquetWriterConfig::new()),
        }
    }
}

// ============================================================================
// Auth Settings
// ============================================================================

/// Credential settings
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// OAuth2 access token obtained elsewhere
    pub bearer_token: Option<String>,
    /// API key
    pub api_key: Option<String>,
    /// Capability level the token was issued for (`full` or `readonly`)
    pub scope: Scope,
}

impl AuthSettings {
    /// Build the credential; a bearer token wins over an API key
    pub fn to_auth_config(&self) -> AuthConfig {
        match (&self.bearer_token, &self.api_key) {
            (Some(token), key) => {
                if key.is_some() {
                    warn!("Both a bearer token and an API key are configured; using the token");
                }
                AuthConfig::bearer(token.clone())
            }
            (None, Some(key)) => AuthConfig::api_key(key.clone()),
            (None, None) => AuthConfig::None,
        }
    }

    /// What to ask the credential provider for when nothing is configured
    pub fn missing_credential_hint(&self) -> Option<String> {
        if self.bearer_token.is_some() || self.api_key.is_some() {
            return None;
        }
        Some(format!(
            "No credential configured; requests will be anonymous. \
             Set {ENV_ACCESS_TOKEN} to a token issued for {}",
            self.scope.url()
        ))
    }
}

impl fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSettings")
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "***"))
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("scope", &self.scope)
            .finish()
    }
}
