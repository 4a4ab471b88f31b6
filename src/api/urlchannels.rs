//! `urlchannels` resource

use super::models::UrlChannels;
use super::options::{CallBuilder, CallOptions, ListCallBuilder, PageOptions, MAX_LIST_RESULTS};
use super::send_page;
use crate::error::Result;
use crate::http::{HttpClient, RequestSpec};
use crate::pagination::{PagedCall, Pager};
use crate::types::Response;
use futures::future::AbortRegistration;
use std::sync::Arc;

/// Calls on the `urlchannels` resource
#[derive(Debug, Clone)]
pub struct UrlChannelsApi {
    client: Arc<HttpClient>,
}

impl UrlChannelsApi {
    pub(crate) fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// List the URL channels of an ad client
    pub fn list(&self, ad_client_id: impl Into<String>) -> UrlChannelsListCall {
        UrlChannelsListCall {
            client: self.client.clone(),
            ad_client_id: ad_client_id.into(),
            page: PageOptions::default(),
            options: CallOptions::default(),
        }
    }
}

/// `urlchannels.list`
#[derive(Debug)]
pub struct UrlChannelsListCall {
    client: Arc<HttpClient>,
    ad_client_id: String,
    page: PageOptions,
    options: CallOptions,
}

impl UrlChannelsListCall {
    /// Fetch one page
    pub async fn send(mut self) -> Result<Response<UrlChannels>> {
        let abort = self.options.abort.take();
        send_page(&self, abort).await
    }

    /// Follow continuation tokens from the current page onwards
    pub fn pager(self) -> Pager<Self> {
        Pager::new(self)
    }
}

impl CallBuilder for UrlChannelsListCall {
    fn options_mut(&mut self) -> &mut CallOptions {
        &mut self.options
    }
}

impl ListCallBuilder for UrlChannelsListCall {
    fn page_options_mut(&mut self) -> &mut PageOptions {
        &mut self.page
    }
}

impl PagedCall for UrlChannelsListCall {
    type Page = UrlChannels;

    fn client(&self) -> &HttpClient {
        &self.client
    }

    fn page_request(&self, page_token: Option<&str>) -> RequestSpec {
        let spec = RequestSpec::get(
            "adexchangeseller.urlchannels.list",
            "adclients/{adClientId}/urlchannels",
        )
        .path_param("adClientId", self.ad_client_id.clone());
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
