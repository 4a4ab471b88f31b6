//! # Ad Exchange Seller client
//!
//! A typed, async client for the Ad Exchange Seller REST API (v1): list
//! ad clients, ad units, custom channels and URL channels, and generate
//! reports.
//!
//! ## Features
//!
//! - **Typed resources**: every API resource decodes into a serde struct
//! - **Call builders**: optional query parameters, partial responses,
//!   conditional `If-None-Match` fetches, deadlines and cancellation
//! - **Pagination**: follow `nextPageToken` with a [`Pager`](pagination::Pager)
//! - **Reports**: validated report parameters, raw media download and
//!   export to CSV, JSON lines or Parquet
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use adexchange_seller::api::ListCallBuilder;
//! use adexchange_seller::{AdExchangeSeller, AuthConfig, HttpClientConfig, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let api = AdExchangeSeller::with_config(
//!         HttpClientConfig::default(),
//!         AuthConfig::bearer("ya29...."),
//!     )?;
//!
//!     let clients = api.adclients().list().max_results(10).send().await?;
//!     for client in &clients.items {
//!         println!("{:?}", client.id);
//!     }
//!
//!     let report = api
//!         .reports()
//!         .generate("today-7d", "today")
//!         .dimension("DATE")
//!         .metric("EARNINGS")
//!         .send()
//!         .await?;
//!     println!("{} rows", report.row_count());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      AdExchangeSeller                        │
//! │  adclients()  adunits()  customchannels()  urlchannels()     │
//! │  reports() ─ saved()                                         │
//! └──────────────────────────────────────────────────────────────┘
//!                               │ call builders
//! ┌──────────┬──────────────────┴───────┬────────────┬───────────┐
//! │   Auth   │          HTTP            │ Pagination │  Output   │
//! ├──────────┼──────────────────────────┼────────────┼───────────┤
//! │ Bearer   │ Request specs            │ Page token │ CSV       │
//! │ API key  │ Status interpretation    │ Pager      │ JSON lines│
//! │ Token    │ Media download           │ Stream     │ Parquet   │
//! │ source   │ Rate limit, deadlines    │            │           │
//! └──────────┴──────────────────────────┴────────────┴───────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
// Allow common clippy pedantic lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Response envelope, field masks and scopes
pub mod types;

/// Credentials attached to requests
pub mod auth;

/// HTTP transport, request building and response interpretation
pub mod http;

/// Page-token pagination
pub mod pagination;

/// Resources, call builders and report types
pub mod api;

/// Report export (CSV, JSON lines, Parquet)
pub mod output;

/// Client configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use api::AdExchangeSeller;
pub use auth::AuthConfig;
pub use config::ClientConfig;
pub use http::{HttpClient, HttpClientConfig};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
