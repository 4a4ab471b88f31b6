//! Request building
//!
//! A [`RequestSpec`] is everything one API call needs before it touches the
//! network: the path template and its bound identifiers, the query modifiers
//! that were actually set, the conditional-fetch tag and the response format.

use crate::error::{Error, Result};
use crate::types::{Alt, FieldMask};
use futures::future::AbortRegistration;
use std::fmt::Display;
use std::time::Duration;
use tracing::debug;
use url::Url;

// ============================================================================
// Query Parameters
// ============================================================================

/// Ordered, multi-valued query parameters
///
/// Repeatable modifiers (`dimension`, `metric`, ...) appear once per value
/// under the same key. Only parameters that were explicitly pushed are ever
/// serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// Create an empty parameter list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter
    pub fn push(&mut self, key: impl Into<String>, value: impl Display) {
        self.0.push((key.into(), value.to_string()));
    }

    /// Append a parameter only if it is set
    pub fn push_opt<V: Display>(&mut self, key: &str, value: Option<V>) {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    /// Append every value under the same key
    pub fn push_all<I, V>(&mut self, key: &str, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Display,
    {
        for value in values {
            self.push(key, value);
        }
    }

    /// First value for a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All values for a key, in insertion order
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Whether a key is present
    pub fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    /// Iterate over key/value pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of pairs
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no parameter is set
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ============================================================================
// Request Spec
// ============================================================================

/// A fully described GET request against the API
#[derive(Debug)]
pub struct RequestSpec {
    /// Method identifier used in logs (e.g. `adunits.list`)
    pub method_id: &'static str,
    /// Path template relative to the base URL
    pub path: &'static str,
    /// Values for the template placeholders
    pub path_params: Vec<(&'static str, String)>,
    /// Query modifiers
    pub query: QueryParams,
    /// Cache-validation tag for `If-None-Match`
    pub if_none_match: Option<String>,
    /// Response format
    pub alt: Alt,
    /// Deadline for this call, overriding the client default
    pub timeout: Option<Duration>,
    /// External cancellation signal
    pub abort: Option<AbortRegistration>,
}

impl RequestSpec {
    /// Start a GET request for a path template
    pub fn get(method_id: &'static str, path: &'static str) -> Self {
        Self {
            method_id,
            path,
            path_params: Vec::new(),
            query: QueryParams::new(),
            if_none_match: None,
            alt: Alt::Json,
            timeout: None,
            abort: None,
        }
    }

    /// Bind a path placeholder
    #[must_use]
    pub fn path_param(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.path_params.push((name, value.into()));
        self
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: &str, value: impl Display) -> Self {
        self.query.push(key, value);
        self
    }

    /// Add a query parameter if set
    #[must_use]
    pub fn query_opt<V: Display>(mut self, key: &str, value: Option<V>) -> Self {
        self.query.push_opt(key, value);
        self
    }

    /// Add a repeated query parameter
    #[must_use]
    pub fn query_all<I, V>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Display,
    {
        self.query.push_all(key, values);
        self
    }

    /// Restrict the serialized fields (skipped when empty)
    #[must_use]
    pub fn fields(mut self, mask: Option<FieldMask>) -> Self {
        if let Some(mask) = mask.filter(|m| !m.is_empty()) {
            self.query.push("fields", mask);
        }
        self
    }

    /// Set the conditional-fetch tag
    #[must_use]
    pub fn if_none_match(mut self, tag: Option<String>) -> Self {
        self.if_none_match = tag;
        self
    }

    /// Set the response format
    #[must_use]
    pub fn alt(mut self, alt: Alt) -> Self {
        self.alt = alt;
        self
    }

    /// Set the per-call deadline
    #[must_use]
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Attach a cancellation signal
    #[must_use]
    pub fn abort(mut self, abort: Option<AbortRegistration>) -> Self {
        self.abort = abort;
        self
    }

    /// Resolve the final URL against a base URL
    ///
    /// `alt` is always sent; every other parameter only if it was set.
    pub fn resolve(&self, base: &Url) -> Result<Url> {
        let segments = expand_path(self.path, &self.path_params)?;

        let mut url = base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| Error::config(format!("Base URL cannot hold a path: {base}")))?;
            path.pop_if_empty();
            path.extend(segments.iter());
        }

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("alt", self.alt.as_str());
            for (key, value) in self.query.iter() {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }
}

/// Substitute `{name}` placeholders in a path template
///
/// Returns the raw (unencoded) path segments; encoding happens when they are
/// pushed onto the URL, so a `/` inside an identifier never splits it.
pub fn expand_path(template: &str, params: &[(&str, String)]) -> Result<Vec<String>> {
    template
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let Some(name) = segment
                .strip_prefix('{')
                .and_then(|s| s.strip_suffix('}'))
            else {
                return Ok(segment.to_string());
            };

            match params.iter().find(|(key, _)| *key == name) {
                Some((_, value)) if value.is_empty() => {
                    Err(Error::invalid_param(name, "must not be empty"))
                }
                Some((_, value)) if value == "." || value == ".." => Err(Error::invalid_param(
                    name,
                    format!("'{value}' is not a valid identifier"),
                )),
                Some((_, value)) => Ok(value.clone()),
                None => Err(Error::invalid_param(name, "is required")),
            }
        })
        .collect()
}

/// Clamp a numeric modifier to its ceiling
pub fn clamp_param(name: &str, value: u32, max: u32) -> u32 {
    if value > max {
        debug!("Clamping {} from {} to {}", name, value, max);
        max
    } else {
        value
    }
}
