//! `adclients` resource

use super::models::AdClients;
use super::options::{CallBuilder, CallOptions, ListCallBuilder, PageOptions, MAX_LIST_RESULTS};
use super::send_page;
use crate::error::Result;
use crate::http::{HttpClient, RequestSpec};
use crate::pagination::{PagedCall, Pager};
use crate::types::Response;
use futures::future::AbortRegistration;
use std::sync::Arc;

/// Calls on the `adclients` resource
#[derive(Debug, Clone)]
pub struct AdClientsApi {
    client: Arc<HttpClient>,
}

impl AdClientsApi {
    pub(crate) fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// List the ad clients of the account
    pub fn list(&self) -> AdClientsListCall {
        AdClientsListCall {
            client: self.client.clone(),
            page: PageOptions::default(),
            options: CallOptions::default(),
        }
    }
}

/// `adclients.list`
#[derive(Debug)]
pub struct AdClientsListCall {
    client: Arc<HttpClient>,
    page: PageOptions,
    options: CallOptions,
}

impl AdClientsListCall {
    /// Fetch one page
    pub async fn send(mut self) -> Result<Response<AdClients>> {
        let abort = self.options.abort.take();
        send_page(&self, abort).await
    }

    /// Follow continuation tokens from the current page onwards
    pub fn pager(self) -> Pager<Self> {
        Pager::new(self)
    }
}

impl CallBuilder for AdClientsListCall {
    fn options_mut(&mut self) -> &mut CallOptions {
        &mut self.options
    }
}

impl ListCallBuilder for AdClientsListCall {
    fn page_options_mut(&mut self) -> &mut PageOptions {
        &mut self.page
    }
}

impl PagedCall for AdClientsListCall {
    type Page = AdClients;

    fn client(&self) -> &HttpClient {
        &self.client
    }

    fn page_request(&self, page_token: Option<&str>) -> RequestSpec {
        let spec = RequestSpec::get("adexchangeseller.adclients.list", "adclients");
        let spec = self.page.decorate(spec, MAX_LIST_RESULTS, page_token);
        self.options.decorate(spec)
    }

    fn start_token(&self) -> Option<&str> {
        self.page.page_token.as_deref()
    }

    fn take_abort(&mut self) -> Option<AbortRegistration> {
        self.options.abort.take()
    }
}
