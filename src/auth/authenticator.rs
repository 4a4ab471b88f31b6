//! Authenticator implementation
//!
//! Applies the configured credential to outgoing requests.

use super::types::AuthConfig;
use crate::error::Result;
use reqwest::RequestBuilder;

/// Query parameter carrying an API key
const API_KEY_PARAM: &str = "key";

/// Authenticator handles applying authentication to HTTP requests
#[derive(Debug, Clone, Default)]
pub struct Authenticator {
    config: AuthConfig,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// The underlying config
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Apply authentication to a request builder
    pub async fn apply(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        match &self.config {
            AuthConfig::None => Ok(req),
            AuthConfig::Bearer { token } => Ok(req.bearer_auth(token)),
            AuthConfig::ApiKey { key } => Ok(req.query(&[(API_KEY_PARAM, key.as_str())])),
            AuthConfig::TokenSource(source) => {
                let token = source.token().await?;
                Ok(req.bearer_auth(token))
            }
        }
    }
}
