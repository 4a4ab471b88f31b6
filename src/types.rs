//! Common types used throughout the crate
//!
//! This module contains shared type definitions used by the transport,
//! the pagination driver and the API call types.

use reqwest::header::{HeaderMap, ETAG};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Deref, DerefMut};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Response Metadata
// ============================================================================

/// HTTP status and headers of a decoded response
#[derive(Debug, Clone, Default)]
pub struct ResponseMeta {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
}

impl ResponseMeta {
    /// Create response metadata
    pub fn new(status: u16, headers: HeaderMap) -> Self {
        Self { status, headers }
    }

    /// Value of the `ETag` header, if any
    pub fn etag(&self) -> Option<&str> {
        self.headers.get(ETAG).and_then(|v| v.to_str().ok())
    }

    /// Value of an arbitrary header as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// A decoded payload together with the response it came from
///
/// Derefs to the payload, so `response.items` works directly on a
/// collection response.
#[derive(Debug, Clone)]
pub struct Response<T> {
    /// Status and headers
    pub meta: ResponseMeta,
    /// Decoded body
    pub payload: T,
}

impl<T> Response<T> {
    /// Wrap a payload
    pub fn new(meta: ResponseMeta, payload: T) -> Self {
        Self { meta, payload }
    }

    /// HTTP status code
    pub fn status(&self) -> u16 {
        self.meta.status
    }

    /// Response headers
    pub fn headers(&self) -> &HeaderMap {
        &self.meta.headers
    }

    /// Drop the metadata and keep the payload
    pub fn into_inner(self) -> T {
        self.payload
    }

    /// Split into metadata and payload
    pub fn into_parts(self) -> (ResponseMeta, T) {
        (self.meta, self.payload)
    }

    /// Transform the payload, keeping the metadata
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Response<U> {
        Response {
            meta: self.meta,
            payload: f(self.payload),
        }
    }
}

impl<T> Deref for Response<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.payload
    }
}

impl<T> DerefMut for Response<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.payload
    }
}

// ============================================================================
// Request Modifiers
// ============================================================================

/// Response format requested through the `alt` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alt {
    /// Structured JSON (decoded into a typed container)
    #[default]
    Json,
    /// Raw media stream handed to the caller (report downloads)
    Media,
}

impl Alt {
    /// Wire value of the parameter
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Media => "media",
        }
    }
}

impl fmt::Display for Alt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Partial-response field selection, sent as the `fields` parameter
///
/// ```
/// use adexchange_seller::types::FieldMask;
///
/// let mask = FieldMask::new(["nextPageToken", "items(id,name)"]);
/// assert_eq!(mask.to_string(), "nextPageToken,items(id,name)");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMask(Vec<String>);

impl FieldMask {
    /// Build a mask from field selectors
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            fields
                .into_iter()
                .map(Into::into)
                .filter(|f: &String| !f.is_empty())
                .collect(),
        )
    }

    /// Add one selector
    #[must_use]
    pub fn with(mut self, field: impl Into<String>) -> Self {
        let field = field.into();
        if !field.is_empty() {
            self.0.push(field);
        }
        self
    }

    /// True if no selector was given
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Selectors in order
    pub fn fields(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for FieldMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(","))
    }
}

impl From<&str> for FieldMask {
    fn from(value: &str) -> Self {
        Self::new([value.trim()])
    }
}

// ============================================================================
// OAuth Scopes
// ============================================================================

/// Capability level of the credential attached to the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// View and manage Ad Exchange data
    Full,
    /// View Ad Exchange data
    #[default]
    Readonly,
}

impl Scope {
    /// OAuth2 scope URL
    pub fn url(self) -> &'static str {
        match self {
            Self::Full => "https://www.googleapis.com/auth/adexchange.seller",
            Self::Readonly => "https://www.googleapis.com/auth/adexchange.seller.readonly",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_response_deref_and_map() {
        let response = Response::new(ResponseMeta::new(200, HeaderMap::new()), vec![1, 2, 3]);
        assert_eq!(response.len(), 3);
        assert_eq!(response.status(), 200);

        let mapped = response.map(|v| v.into_iter().sum::<i32>());
        assert_eq!(mapped.into_inner(), 6);
    }

    #[test]
    fn test_response_meta_etag() {
        let mut headers = HeaderMap::new();
        headers.insert(ETAG, HeaderValue::from_static("\"abc\""));
        let meta = ResponseMeta::new(200, headers);
        assert_eq!(meta.etag(), Some("\"abc\""));
        assert_eq!(meta.header("etag"), Some("\"abc\""));
        assert_eq!(meta.header("x-missing"), None);
    }

    #[test]
    fn test_field_mask() {
        let mask = FieldMask::from(" items(id,name),nextPageToken ");
        assert_eq!(mask.fields().len(), 1);
        assert_eq!(mask.to_string(), "items(id,name),nextPageToken");

        let mask = FieldMask::default().with("etag").with("").with("kind");
        assert_eq!(mask.to_string(), "etag,kind");
        assert!(FieldMask::new(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_alt_and_scope() {
        assert_eq!(Alt::default().as_str(), "json");
        assert_eq!(Alt::Media.to_string(), "media");
        assert!(Scope::Readonly.url().ends_with(".readonly"));
        assert!(!Scope::Full.url().ends_with(".readonly"));
    }
}
