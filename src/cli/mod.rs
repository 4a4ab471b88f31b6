//! CLI module
//!
//! Command-line interface for the Ad Exchange Seller API.
//!
//! # Commands
//!
//! - `adclients list` - List ad clients
//! - `adunits list|get|channels` - Ad units and their custom channels
//! - `customchannels list|get|adunits` - Custom channels and their ad units
//! - `urlchannels list` - URL channels
//! - `reports generate|saved-list|saved-generate` - Reports and saved reports

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
