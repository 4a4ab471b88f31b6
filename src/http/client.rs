//! HTTP transport
//!
//! Provides the client every API call goes through. It handles:
//! - Endpoint resolution against the configured base URL
//! - Client identification and conditional-fetch headers
//! - Credential attachment
//! - Optional request pacing
//! - Per-call deadlines and external cancellation
//!
//! Each call issues exactly one request. Nothing is retried here; retry
//! policy belongs to the caller.

use super::interpret::{interpret_json, interpret_media, MediaDownload};
use super::rate_limit::{RateLimiter, RateLimiterConfig};
use super::request::RequestSpec;
use crate::auth::{AuthConfig, Authenticator};
use crate::error::{Error, Result};
use crate::types::{Alt, Response};
use futures::future::{AbortRegistration, Abortable};
use reqwest::header::IF_NONE_MATCH;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Production endpoint of the API
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/adexchangeseller/v1/";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL all paths are resolved against
    pub base_url: String,
    /// Default request deadline
    pub timeout: Duration,
    /// Request pacing
    pub rate_limit: Option<RateLimiterConfig>,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string identifying this client
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            rate_limit: Some(RateLimiterConfig::default()),
            default_headers: HashMap::new(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the default request deadline
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set request pacing
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Disable request pacing
    pub fn no_rate_limit(mut self) -> Self {
        self.config.rate_limit = None;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Replace the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Append an application fragment to the default user agent
    pub fn user_agent_suffix(mut self, suffix: &str) -> Self {
        if !suffix.is_empty() {
            self.config.user_agent = format!("{} {suffix}", default_user_agent());
        }
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// HTTP client shared by all calls
///
/// Cheap to share behind an `Arc`; the underlying connection pool is safe
/// for concurrent use.
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    base_url: Url,
    authenticator: Authenticator,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Create a client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::config(format!(
                "Base URL cannot hold a path: {}",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config,
            base_url,
            authenticator: Authenticator::default(),
            rate_limiter,
        })
    }

    /// Create a client with authentication
    pub fn with_auth(config: HttpClientConfig, auth: AuthConfig) -> Result<Self> {
        let mut client = Self::with_config(config)?;
        client.set_auth(auth);
        Ok(client)
    }

    /// Replace the credential attached to requests
    pub fn set_auth(&mut self, auth: AuthConfig) {
        self.authenticator = Authenticator::new(auth);
    }

    /// Base URL paths are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Check if request pacing is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// Fetch a request and decode its JSON body
    pub async fn fetch_json<T: DeserializeOwned>(&self, mut spec: RequestSpec) -> Result<Response<T>> {
        let abort = spec.abort.take();
        let timeout = self.effective_timeout(&spec);
        spec.alt = Alt::Json;

        let work = async {
            let response = self.send(spec).await?;
            interpret_json(response).await
        };

        run_cancellable(work, abort, timeout).await
    }

    /// Fetch a request in media mode, handing the open body to the caller
    pub async fn fetch_media(&self, mut spec: RequestSpec) -> Result<MediaDownload> {
        let abort = spec.abort.take();
        let timeout = self.effective_timeout(&spec);
        spec.alt = Alt::Media;

        let work = async {
            let response = self.send(spec).await?;
            interpret_media(response).await
        };

        run_cancellable(work, abort, timeout).await
    }

    /// Send a request and return the raw response, whatever its status
    pub async fn send(&self, spec: RequestSpec) -> Result<reqwest::Response> {
        let url = spec.resolve(&self.base_url)?;
        let timeout = self.effective_timeout(&spec);

        if let Some(ref limiter) = self.rate_limiter {
            let waited = limiter.acquire().await;
            if waited > Duration::from_secs(1) {
                warn!("Rate limiter delayed {} by {:?}", spec.method_id, waited);
            }
        }

        let mut req = self.client.get(url.clone()).timeout(timeout);

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if let Some(ref tag) = spec.if_none_match {
            req = req.header(IF_NONE_MATCH, tag.as_str());
        }

        req = self.authenticator.apply(req).await?;

        debug!("GET {} ({})", url, spec.method_id);
        let response = req.send().await?;
        debug!(
            "{} returned {}",
            spec.method_id,
            response.status().as_u16()
        );

        Ok(response)
    }

    fn effective_timeout(&self, spec: &RequestSpec) -> Duration {
        spec.timeout.unwrap_or(self.config.timeout)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("auth", self.authenticator.config())
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

/// Run a fetch under an optional abort signal
///
/// An abort surfaces as [`Error::Cancelled`]; a reqwest timeout as
/// [`Error::Timeout`].
async fn run_cancellable<T, F>(
    work: F,
    abort: Option<AbortRegistration>,
    timeout: Duration,
) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let result = match abort {
        Some(registration) => Abortable::new(work, registration)
            .await
            .map_err(|_| Error::Cancelled)?,
        None => work.await,
    };

    result.map_err(|err| match err {
        Error::Transport(e) if e.is_timeout() => Error::Timeout {
            timeout_ms: timeout.as_millis() as u64,
        },
        other => other,
    })
}
