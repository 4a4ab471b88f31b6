//! `customchannels` resource and its `adunits` sub-resource

use super::models::{AdUnits, CustomChannel, CustomChannels};
use super::options::{CallBuilder, CallOptions, ListCallBuilder, PageOptions, MAX_LIST_RESULTS};
use super::send_page;
use crate::error::Result;
use crate::http::{HttpClient, RequestSpec};
use crate::pagination::{PagedCall, Pager};
use crate::types::Response;
use futures::future::AbortRegistration;
use std::sync::Arc;

/// Calls on the `customchannels` resource
#[derive(Debug, Clone)]
pub struct CustomChannelsApi {
    client: Arc<HttpClient>,
}

impl CustomChannelsApi {
    pub(crate) fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// Get one custom channel
    pub fn get(
        &self,
        ad_client_id: impl Into<String>,
        custom_channel_id: impl Into<String>,
    ) -> CustomChannelsGetCall {
        CustomChannelsGetCall {
            client: self.client.clone(),
            ad_client_id: ad_client_id.into(),
            custom_channel_id: custom_channel_id.into(),
            options: CallOptions::default(),
        }
    }

    /// List the custom channels of an ad client
    pub fn list(&self, ad_client_id: impl Into<String>) -> CustomChannelsListCall {
        CustomChannelsListCall {
            client: self.client.clone(),
            ad_client_id: ad_client_id.into(),
            page: PageOptions::default(),
            options: CallOptions::default(),
        }
    }

    /// List the ad units in a custom channel
    pub fn ad_units(
        &self,
        ad_client_id: impl Into<String>,
        custom_channel_id: impl Into<String>,
    ) -> CustomChannelAdUnitsListCall {
        CustomChannelAdUnitsListCall {
            client: self.client.clone(),
            ad_client_id: ad_client_id.into(),
            custom_channel_id: custom_channel_id.into(),
            include_inactive: None,
            page: PageOptions::default(),
            options: CallOptions::default(),
        }
    }
}

// ============================================================================
// customchannels.get
// ============================================================================

/// `customchannels.get`
#[derive(Debug)]
pub struct CustomChannelsGetCall {
    client: Arc<HttpClient>,
    ad_client_id: String,
    custom_channel_id: String,
    options: CallOptions,
}

impl CustomChannelsGetCall {
    /// Fetch the custom channel
    pub async fn send(mut self) -> Result<Response<CustomChannel>> {
        let abort = self.options.abort.take();
        let spec = RequestSpec::get(
            "adexchangeseller.customchannels.get",
            "adclients/{adClientId}/customchannels/{customChannelId}",
        )
        .path_param("adClientId", self.ad_client_id)
        .path_param("customChannelId", self.custom_channel_id);
        let spec = self.options.decorate(spec).abort(abort);
        self.client.fetch_json(spec).await
    }
}

impl CallBuilder for CustomChannelsGetCall {
    fn options_mut(&mut self) -> &mut CallOptions {
        &mut self.options
    }
}

// ============================================================================
// customchannels.list
// ============================================================================

/// `customchannels.list`
#[derive(Debug)]
pub struct CustomChannelsListCall {
    client: Arc<HttpClient>,
    ad_client_id: String,
    page: PageOptions,
    options: CallOptions,
}

impl CustomChannelsListCall {
    /// Fetch one page
    pub async fn send(mut self) -> Result<Response<CustomChannels>> {
        let abort = self.options.abort.take();
        send_page(&self, abort).await
    }

    /// Follow continuation tokens from the current page onwards
    pub fn pager(self) -> Pager<Self> {
        Pager::new(self)
    }
}

impl CallBuilder for CustomChannelsListCall {
    fn options_mut(&mut self) -> &mut CallOptions {
        &mut self.options
    }
}

impl ListCallBuilder for CustomChannelsListCall {
    fn page_options_mut(&mut self) -> &mut PageOptions {
        &mut self.page
    }
}

impl PagedCall for CustomChannelsListCall {
    type Page = CustomChannels;

    fn client(&self) -> &HttpClient {
        &self.client
    }

    fn page_request(&self, page_token: Option<&str>) -> RequestSpec {
        let spec = RequestSpec::get(
            "adexchangeseller.customchannels.list",
            "adclients/{adClientId}/customchannels",
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

// ============================================================================
// customchannels.adunits.list
// ============================================================================

/// `customchannels.adunits.list`
#[derive(Debug)]
pub struct CustomChannelAdUnitsListCall {
    client: Arc<HttpClient>,
    ad_client_id: String,
    custom_channel_id: String,
    include_inactive: Option<bool>,
    page: PageOptions,
    options: CallOptions,
}

impl CustomChannelAdUnitsListCall {
    /// Whether to include inactive ad units (server default: true)
    #[must_use]
    pub fn include_inactive(mut self, include: bool) -> Self {
        self.include_inactive = Some(include);
        self
    }

    /// Fetch one page
    pub async fn send(mut self) -> Result<Response<AdUnits>> {
        let abort = self.options.abort.take();
        send_page(&self, abort).await
    }

    /// Follow continuation tokens from the current page onwards
    pub fn pager(self) -> Pager<Self> {
        Pager::new(self)
    }
}

impl CallBuilder for CustomChannelAdUnitsListCall {
    fn options_mut(&mut self) -> &mut CallOptions {
        &mut self.options
    }
}

impl ListCallBuilder for CustomChannelAdUnitsListCall {
    fn page_options_mut(&mut self) -> &mut PageOptions {
        &mut self.page
    }
}

impl PagedCall for CustomChannelAdUnitsListCall {
    type Page = AdUnits;

    fn client(&self) -> &HttpClient {
        &self.client
    }

    fn page_request(&self, page_token: Option<&str>) -> RequestSpec {
        let spec = RequestSpec::get(
            "adexchangeseller.customchannels.adunits.list",
            "adclients/{adClientId}/customchannels/{customChannelId}/adunits",
        )
        .path_param("adClientId", self.ad_client_id.clone())
        .path_param("customChannelId", self.custom_channel_id.clone())
        .query_opt("includeInactive", self.include_inactive);
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
