//! Pagination module
//!
//! Follows continuation tokens across list calls.
//!
//! # Overview
//!
//! Every list response carries an optional `nextPageToken`. A [`Pager`]
//! re-issues the call with that token until a response omits it. Only the
//! token decides termination: a page with zero items but a token is
//! followed once more.
//!
//! ```rust,ignore
//! let units = api.adunits().list("ca-pub-123").max_results(100).pager();
//! let all = units.collect_all().await?;
//! ```

mod pager;
mod types;

pub use pager::Pager;
pub use types::{NextPage, Page, PageState, PagedCall};

#[cfg(test)]
mod tests;
