//! `adunits` resource and its `customchannels` sub-resource

use super::models::{AdUnit, AdUnits, CustomChannels};
use super::options::{CallBuilder, CallOptions, ListCallBuilder, PageOptions, MAX_LIST_RESULTS};
use super::send_page;
use crate::error::Result;
use crate::http::{HttpClient, RequestSpec};
use crate::pagination::{PagedCall, Pager};
use crate::types::Response;
use futures::future::AbortRegistration;
use std::sync::Arc;

/// Calls on the `adunits` resource
#[derive(Debug, Clone)]
pub struct AdUnitsApi {
    client: Arc<HttpClient>,
}

impl AdUnitsApi {
    pub(crate) fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// Get one ad unit
    pub fn get(&self, ad_client_id: impl Into<String>, ad_unit_id: impl Into<String>) -> AdUnitsGetCall {
        AdUnitsGetCall {
            client: self.client.clone(),
            ad_client_id: ad_client_id.into(),
            ad_unit_id: ad_unit_id.into(),
            options: CallOptions::default(),
        }
    }

    /// List the ad units of an ad client
    pub fn list(&self, ad_client_id: impl Into<String>) -> AdUnitsListCall {
        AdUnitsListCall {
            client: self.client.clone(),
            ad_client_id: ad_client_id.into(),
            include_inactive: None,
            page: PageOptions::default(),
            options: CallOptions::default(),
        }
    }

    /// List the custom channels an ad unit belongs to
    pub fn custom_channels(
        &self,
        ad_client_id: impl Into<String>,
        ad_unit_id: impl Into<String>,
    ) -> AdUnitCustomChannelsListCall {
        AdUnitCustomChannelsListCall {
            client: self.client.clone(),
            ad_client_id: ad_client_id.into(),
            ad_unit_id: ad_unit_id.into(),
            page: PageOptions::default(),
            options: CallOptions::default(),
        }
    }
}

// ============================================================================
// adunits.get
// ============================================================================

/// `adunits.get`
#[derive(Debug)]
pub struct AdUnitsGetCall {
    client: Arc<HttpClient>,
    ad_client_id: String,
    ad_unit_id: String,
    options: CallOptions,
}

impl AdUnitsGetCall {
    /// Fetch the ad unit
    pub async fn send(mut self) -> Result<Response<AdUnit>> {
        let abort = self.options.abort.take();
        let spec = RequestSpec::get(
            "adexchangeseller.adunits.get",
            "adclients/{adClientId}/adunits/{adUnitId}",
        )
        .path_param("adClientId", self.ad_client_id)
        .path_param("adUnitId", self.ad_unit_id);
        let spec = self.options.decorate(spec).abort(abort);
        self.client.fetch_json(spec).await
    }
}

impl CallBuilder for AdUnitsGetCall {
    fn options_mut(&mut self) -> &mut CallOptions {
        &mut self.options
    }
}

// ============================================================================
// adunits.list
// ============================================================================

/// `adunits.list`
#[derive(Debug)]
pub struct AdUnitsListCall {
    client: Arc<HttpClient>,
    ad_client_id: String,
    include_inactive: Option<bool>,
    page: PageOptions,
    options: CallOptions,
}

impl AdUnitsListCall {
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

impl CallBuilder for AdUnitsListCall {
    fn options_mut(&mut self) -> &mut CallOptions {
        &mut self.options
    }
}

impl ListCallBuilder for AdUnitsListCall {
    fn page_options_mut(&mut self) -> &mut PageOptions {
        &mut self.page
    }
}

impl PagedCall for AdUnitsListCall {
    type Page = AdUnits;

    fn client(&self) -> &HttpClient {
        &self.client
    }

    fn page_request(&self, page_token: Option<&str>) -> RequestSpec {
        let spec = RequestSpec::get("adexchangeseller.adunits.list", "adclients/{adClientId}/adunits")
            .path_param("adClientId", self.ad_client_id.clone())
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

// ============================================================================
// adunits.customchannels.list
// ============================================================================

/// `adunits.customchannels.list`
#[derive(Debug)]
pub struct AdUnitCustomChannelsListCall {
    client: Arc<HttpClient>,
    ad_client_id: String,
    ad_unit_id: String,
    page: PageOptions,
    options: CallOptions,
}

impl AdUnitCustomChannelsListCall {
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

impl CallBuilder for AdUnitCustomChannelsListCall {
    fn options_mut(&mut self) -> &mut CallOptions {
        &mut self.options
    }
}

impl ListCallBuilder for AdUnitCustomChannelsListCall {
    fn page_options_mut(&mut self) -> &mut PageOptions {
        &mut self.page
    }
}

impl PagedCall for AdUnitCustomChannelsListCall {
    type Page = CustomChannels;

    fn client(&self) -> &HttpClient {
        &self.client
    }

    fn page_request(&self, page_token: Option<&str>) -> RequestSpec {
        let spec = RequestSpec::get(
            "adexchangeseller.adunits.customchannels.list",
            "adclients/{adClientId}/adunits/{adUnitId}/customchannels",
        )
        .path_param("adClientId", self.ad_client_id.clone())
        .path_param("adUnitId", self.ad_unit_id.clone());
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
