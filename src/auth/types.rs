//! Auth configuration types

use crate::error::Result;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// Source of bearer tokens managed outside this crate
///
/// Implementations own token acquisition and refresh; the transport asks
/// for a token right before every request.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Current access token
    async fn token(&self) -> Result<String>;
}

/// A fixed token, for short-lived tools and tests
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    /// Wrap a token
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StaticToken(***)")
    }
}

#[async_trait]
impl TokenSource for StaticToken {
    async fn token(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Authentication configuration
#[derive(Clone, Default)]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// Bearer token authentication
    Bearer {
        /// The bearer token
        token: String,
    },

    /// API key sent as the `key` query parameter
    ApiKey {
        /// The API key value
        key: String,
    },

    /// Bearer tokens from an external provider
    TokenSource(Arc<dyn TokenSource>),
}

impl AuthConfig {
    /// Bearer token config
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// API key config
    pub fn api_key(key: impl Into<String>) -> Self {
        Self::ApiKey { key: key.into() }
    }

    /// External token source config
    pub fn token_source(source: impl TokenSource + 'static) -> Self {
        Self::TokenSource(Arc::new(source))
    }

    /// True if nothing will be attached
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

// Secrets never reach logs.
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Bearer { .. } => f.write_str("Bearer(***)"),
            Self::ApiKey { .. } => f.write_str("ApiKey(***)"),
            Self::TokenSource(_) => f.write_str("TokenSource"),
        }
    }
}
