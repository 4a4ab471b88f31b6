//! Authentication module
//!
//! Supports: Bearer token, API key, externally managed token sources
//!
//! Obtaining credentials is the job of an outside identity provider. This
//! module only attaches whatever that provider hands out to each request.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, StaticToken, TokenSource};

#[cfg(test)]
mod tests;
