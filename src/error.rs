//! Error types for the Ad Exchange Seller client
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! The four failures a fetch can end in are kept distinct so callers can
//! match on them:
//!
//! - [`Error::NotModified`] - the conditional fetch matched the server's tag
//! - [`Error::Api`] - the server answered with a non-2xx status
//! - [`Error::Transport`], [`Error::Timeout`], [`Error::Cancelled`] - no status was received
//! - [`Error::Decode`] - a 2xx body did not have the expected shape

use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The main error type for the crate
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Response Classification
    // ============================================================================
    /// The server's cache tag matched `If-None-Match`; nothing was decoded.
    #[error("Not modified (HTTP 304)")]
    NotModified { headers: HeaderMap },

    #[error("{0}")]
    Api(Box<ApiError>),

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Request cancelled")]
    Cancelled,

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Request Building Errors
    // ============================================================================
    #[error("Invalid value for parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },

    #[error("Pagination error: {message}")]
    Pagination { message: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Output Errors
    // ============================================================================
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Output error: {message}")]
    Output { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a pagination error
    pub fn pagination(message: impl Into<String>) -> Self {
        Self::Pagination {
            message: message.into(),
        }
    }

    /// Create an output error
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }

    /// Create an API error from its parts
    pub fn api(status: u16, headers: HeaderMap, body: impl Into<String>) -> Self {
        Self::Api(Box::new(ApiError::new(status, headers, body)))
    }

    /// True for the conditional-fetch short-circuit
    pub fn is_not_modified(&self) -> bool {
        matches!(self, Self::NotModified { .. })
    }

    /// True when no HTTP status was ever received
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Timeout { .. } | Self::Cancelled
        )
    }

    /// HTTP status carried by this error, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotModified { .. } => Some(304),
            Self::Api(err) => Some(err.status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Response headers carried by this error, if the server answered
    pub fn headers(&self) -> Option<&HeaderMap> {
        match self {
            Self::NotModified { headers } => Some(headers),
            Self::Api(err) => Some(&err.headers),
            _ => None,
        }
    }

    /// The structured API error, if this is one
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }
}

// ============================================================================
// API Error Payload
// ============================================================================

/// A non-2xx response, with the server's error payload when it sent one
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw response body
    pub body: String,
    /// Decoded `{"error": {...}}` payload
    pub details: Option<ErrorDetails>,
}

impl ApiError {
    /// Build an API error, decoding the body if it holds an error payload
    pub fn new(status: u16, headers: HeaderMap, body: impl Into<String>) -> Self {
        let body = body.into();
        let details = serde_json::from_str::<ErrorEnvelope>(&body)
            .ok()
            .map(|envelope| envelope.error);
        Self {
            status,
            headers,
            body,
            details,
        }
    }

    /// Server-supplied message, falling back to the raw body
    pub fn message(&self) -> &str {
        match &self.details {
            Some(details) if !details.message.is_empty() => &details.message,
            _ => &self.body,
        }
    }

    /// Per-field error items, empty when the body had none
    pub fn items(&self) -> &[ErrorItem] {
        self.details.as_ref().map_or(&[], |d| d.errors.as_slice())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}: {}", self.status, self.message())?;
        for item in self.items() {
            write!(f, "\n  {item}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetails,
}

/// Structured error payload returned by the service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code (mirrors the HTTP status)
    #[serde(default)]
    pub code: u16,
    /// Human-readable message
    #[serde(default)]
    pub message: String,
    /// Per-field details
    #[serde(default)]
    pub errors: Vec<ErrorItem>,
}

/// One entry of the per-field error list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorItem {
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_type: Option<String>,
}

impl fmt::Display for ErrorItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.reason, self.message)?;
        if let Some(location) = &self.location {
            write!(f, " (at {location})")?;
        }
        Ok(())
    }
}

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::invalid_param("startDate", "bad date");
        assert_eq!(
            err.to_string(),
            "Invalid value for parameter 'startDate': bad date"
        );

        let err = Error::api(404, HeaderMap::new(), "Not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found");
    }

    #[test]
    fn test_api_error_decodes_payload() {
        let body = r#"{
            "error": {
                "code": 400,
                "message": "Invalid value 'x'",
                "errors": [
                    {"domain": "global", "reason": "invalid", "message": "Invalid value 'x'", "location": "dimension", "locationType": "parameter"}
                ]
            }
        }"#;
        let err = ApiError::new(400, HeaderMap::new(), body);

        let details = err.details.as_ref().unwrap();
        assert_eq!(details.code, 400);
        assert_eq!(err.message(), "Invalid value 'x'");
        assert_eq!(err.items().len(), 1);
        assert_eq!(err.items()[0].location.as_deref(), Some("dimension"));
        assert_eq!(err.items()[0].location_type.as_deref(), Some("parameter"));
        assert!(err.to_string().contains("invalid: Invalid value 'x' (at dimension)"));
    }

    #[test]
    fn test_api_error_keeps_raw_body() {
        let err = ApiError::new(502, HeaderMap::new(), "<html>Bad Gateway</html>");
        assert!(err.details.is_none());
        assert_eq!(err.message(), "<html>Bad Gateway</html>");
        assert!(err.items().is_empty());
    }

    #[test]
    fn test_classification_helpers() {
        let err = Error::NotModified {
            headers: HeaderMap::new(),
        };
        assert!(err.is_not_modified());
        assert_eq!(err.status(), Some(304));
        assert!(err.headers().is_some());
        assert!(!err.is_transport());

        let err = Error::api(403, HeaderMap::new(), "");
        assert_eq!(err.status(), Some(403));
        assert!(err.api_error().is_some());
        assert!(!err.is_not_modified());

        assert!(Error::Cancelled.is_transport());
        assert!(Error::Timeout { timeout_ms: 10 }.is_transport());
        assert_eq!(Error::Cancelled.status(), None);
        assert_eq!(Error::decode("x").status(), None);
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
