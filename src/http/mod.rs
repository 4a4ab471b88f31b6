//! HTTP module
//!
//! The three stages every API call passes through:
//!
//! - **Request building** ([`RequestSpec`]): path expansion and the query
//!   modifiers that were actually set
//! - **Transport** ([`HttpClient`]): one GET per call, with credentials,
//!   pacing, deadlines and cancellation
//! - **Interpretation** ([`interpret_json`], [`interpret_media`]): 304 →
//!   not modified, non-2xx → API error, 2xx → decoded payload or raw stream

mod client;
mod interpret;
mod rate_limit;
mod request;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, DEFAULT_BASE_URL};
pub use interpret::{check_status, decode_body, interpret_json, interpret_media, MediaDownload};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use request::{clamp_param, expand_path, QueryParams, RequestSpec};
