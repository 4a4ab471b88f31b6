//! Page-by-page driver for list calls

use super::types::{Page, PageState, PagedCall};
use crate::error::{Error, Result};
use crate::types::Response;
use futures::future::{self, AbortRegistration, Abortable, Pending};
use futures::stream::{self, Stream, TryStreamExt};
use std::fmt;
use tracing::debug;

/// Drives a [`PagedCall`] until the server stops returning tokens
///
/// Dropping the pager (or the stream made from it) stops pagination and
/// cancels any request in flight. A cancellation signal attached to the call
/// with `abort_with` covers the whole run: once it fires, the request in
/// flight is dropped and every later page fails with [`Error::Cancelled`].
pub struct Pager<C> {
    call: C,
    state: PageState,
    max_pages: Option<u32>,
    abort: Option<Abortable<Pending<()>>>,
}

impl<C: PagedCall> Pager<C> {
    /// Start paging from the call's own token
    pub fn new(mut call: C) -> Self {
        let state = PageState::with_token(call.start_token().map(str::to_string));
        let abort = call.take_abort();
        Self {
            call,
            state,
            max_pages: None,
            abort: abort.map(|registration| Abortable::new(future::pending(), registration)),
        }
    }

    /// Cancel the whole run when `registration` is aborted
    #[must_use]
    pub fn abort_with(mut self, registration: AbortRegistration) -> Self {
        self.abort = Some(Abortable::new(future::pending(), registration));
        self
    }

    /// Stop after at most `max_pages` pages
    #[must_use]
    pub fn max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Progress so far
    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// Fetch the next page, or `None` once the listing is exhausted
    pub async fn next_page(&mut self) -> Result<Option<Response<C::Page>>> {
        if self.state.done {
            return Ok(None);
        }
        if self
            .max_pages
            .is_some_and(|max| self.state.pages_fetched >= max)
        {
            debug!("Stopping after {} pages", self.state.pages_fetched);
            self.state.mark_done();
            return Ok(None);
        }

        let spec = self.call.page_request(self.state.token.as_deref());
        let fetch = self.call.client().fetch_json::<C::Page>(spec);
        let page = match self.abort {
            Some(ref mut signal) => tokio::select! {
                biased;
                _ = signal => {
                    debug!("Paging cancelled after {} pages", self.state.pages_fetched);
                    self.state.mark_done();
                    return Err(Error::Cancelled);
                }
                page = fetch => page?,
            },
            None => fetch.await?,
        };

        let next = self
            .state
            .record(page.items().len(), page.next_page_token())?;
        debug!(
            "Page {} returned {} items ({})",
            self.state.pages_fetched,
            page.items().len(),
            if next.is_done() { "last page" } else { "more pages" }
        );

        Ok(Some(page))
    }

    /// Stream of pages
    pub fn into_stream(self) -> impl Stream<Item = Result<Response<C::Page>>> {
        stream::try_unfold(self, |mut pager| async move {
            let page = pager.next_page().await?;
            Ok::<_, Error>(page.map(|page| (page, pager)))
        })
    }

    /// Stream of items across all pages
    pub fn items(self) -> impl Stream<Item = Result<<C::Page as Page>::Item>> {
        self.into_stream()
            .map_ok(|page| {
                stream::iter(page.into_inner().into_items().into_iter().map(Ok::<_, Error>))
            })
            .try_flatten()
    }

    /// Fetch every page and gather the items in order
    pub async fn collect_all(self) -> Result<Vec<<C::Page as Page>::Item>> {
        self.items().try_collect().await
    }
}

impl<C: fmt::Debug> fmt::Debug for Pager<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pager")
            .field("call", &self.call)
            .field("state", &self.state)
            .field("max_pages", &self.max_pages)
            .field("abortable", &self.abort.is_some())
            .finish()
    }
}
