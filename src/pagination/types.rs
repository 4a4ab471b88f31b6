//! Pagination types and traits
//!
//! Defines the abstractions the pager is built on.

use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestSpec};
use futures::future::AbortRegistration;
use serde::de::DeserializeOwned;

/// Outcome of recording one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// Fetch again with this token
    Continue {
        /// Continuation token from the last response
        token: String,
    },
    /// The last response had no token
    Done,
}

impl NextPage {
    /// Build from an optional token; empty tokens count as absent
    pub fn from_token(token: Option<&str>) -> Self {
        match token {
            Some(t) if !t.is_empty() => Self::Continue {
                token: t.to_string(),
            },
            _ => Self::Done,
        }
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue { .. })
    }
}

/// A single page of a list response
pub trait Page {
    /// Resource type on the page
    type Item;

    /// Items on this page, in server order
    fn items(&self) -> &[Self::Item];

    /// Take the items
    fn into_items(self) -> Vec<Self::Item>;

    /// Token for the next page, if any
    fn next_page_token(&self) -> Option<&str>;

    /// Cache-validation tag of this page
    fn etag(&self) -> Option<&str> {
        None
    }
}

/// A list call that can be re-issued for any page
pub trait PagedCall {
    /// Decoded page type
    type Page: Page + DeserializeOwned;

    /// Transport the call runs on
    fn client(&self) -> &HttpClient;

    /// Request for the page identified by `page_token` (first page if `None`)
    fn page_request(&self, page_token: Option<&str>) -> RequestSpec;

    /// Token the call was created with
    fn start_token(&self) -> Option<&str> {
        None
    }

    /// Hand over the cancellation signal attached to the call, if any
    fn take_abort(&mut self) -> Option<AbortRegistration> {
        None
    }
}

/// Tracks progress through a paginated listing
#[derive(Debug, Clone, Default)]
pub struct PageState {
    /// Pages fetched so far
    pub pages_fetched: u32,
    /// Items fetched so far
    pub items_fetched: u64,
    /// Token to send with the next request
    pub token: Option<String>,
    /// Is pagination complete?
    pub done: bool,
}

impl PageState {
    /// Create a new state
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state resuming from a token
    pub fn with_token(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.is_empty()),
            ..Default::default()
        }
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Record a fetched page and decide what comes next
    ///
    /// Fails if the server hands back the token that was just sent, which
    /// would otherwise repeat the same page forever.
    pub fn record(&mut self, items: usize, next_token: Option<&str>) -> Result<NextPage> {
        self.pages_fetched += 1;
        self.items_fetched += items as u64;

        let next = NextPage::from_token(next_token);
        match &next {
            NextPage::Continue { token } => {
                if self.token.as_deref() == Some(token.as_str()) {
                    self.mark_done();
                    return Err(Error::pagination(format!(
                        "server repeated continuation token after page {}",
                        self.pages_fetched
                    )));
                }
                self.token = Some(token.clone());
            }
            NextPage::Done => {
                self.token = None;
                self.mark_done();
            }
        }
        Ok(next)
    }
}
