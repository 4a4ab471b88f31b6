//! Ad Exchange Seller API surface
//!
//! [`AdExchangeSeller`] is the entry point. Each resource has a service
//! struct that hands out single-use call builders:
//!
//! ```rust,ignore
//! use adexchange_seller::api::{CallBuilder, ListCallBuilder};
//! use adexchange_seller::AdExchangeSeller;
//!
//! let api = AdExchangeSeller::new(client);
//!
//! // One page
//! let page = api.adunits().list("ca-pub-1").max_results(50).send().await?;
//!
//! // Every page
//! let units = api.adunits().list("ca-pub-1").pager().collect_all().await?;
//!
//! // A report
//! let report = api
//!     .reports()
//!     .generate("today-7d", "today")
//!     .dimension("DATE")
//!     .metric("EARNINGS")
//!     .send()
//!     .await?;
//! ```

mod adclients;
mod adunits;
mod customchannels;
mod models;
mod options;
mod params;
mod report;
mod reports;
mod urlchannels;

pub use adclients::{AdClientsApi, AdClientsListCall};
pub use adunits::{AdUnitCustomChannelsListCall, AdUnitsApi, AdUnitsGetCall, AdUnitsListCall};
pub use customchannels::{
    CustomChannelAdUnitsListCall, CustomChannelsApi, CustomChannelsGetCall, CustomChannelsListCall,
};
pub use models::{
    AdClient, AdClients, AdUnit, AdUnitStatus, AdUnits, Collection, CustomChannel, CustomChannels,
    SavedReport, SavedReports, TargetingInfo, UrlChannel, UrlChannels,
};
pub use options::{
    CallBuilder, CallOptions, ListCallBuilder, PageOptions, MAX_LIST_RESULTS, MAX_REPORT_ROWS,
    MAX_SAVED_REPORTS, MAX_START_INDEX,
};
pub use params::{validate_date, validate_filter, validate_name, validate_sort, Filter, Sort};
pub use report::{HeaderType, Report, ReportHeader};
pub use reports::{
    ReportsApi, ReportsGenerateCall, SavedReportGenerateCall, SavedReportsApi,
    SavedReportsListCall,
};
pub use urlchannels::{UrlChannelsApi, UrlChannelsListCall};

use crate::auth::AuthConfig;
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig};
use crate::pagination::PagedCall;
use crate::types::Response;
use futures::future::AbortRegistration;
use std::sync::Arc;


/// Root of the API
#[derive(Debug, Clone)]
pub struct AdExchangeSeller {
    client: Arc<HttpClient>,
}

impl AdExchangeSeller {
    /// Wrap a configured transport
    pub fn new(client: HttpClient) -> Self {
        Self::from_shared(Arc::new(client))
    }

    /// Share a transport with other users
    pub fn from_shared(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// Build the transport from a config and a credential
    pub fn with_config(config: HttpClientConfig, auth: AuthConfig) -> Result<Self> {
        Ok(Self::new(HttpClient::with_auth(config, auth)?))
    }

    /// The underlying transport
    pub fn client(&self) -> &Arc<HttpClient> {
        &self.client
    }

    /// `adclients` resource
    pub fn adclients(&self) -> AdClientsApi {
        AdClientsApi::new(self.client.clone())
    }

    /// `adunits` resource
    pub fn adunits(&self) -> AdUnitsApi {
        AdUnitsApi::new(self.client.clone())
    }

    /// `customchannels` resource
    pub fn customchannels(&self) -> CustomChannelsApi {
        CustomChannelsApi::new(self.client.clone())
    }

    /// `urlchannels` resource
    pub fn urlchannels(&self) -> UrlChannelsApi {
        UrlChannelsApi::new(self.client.clone())
    }

    /// `reports` resource
    pub fn reports(&self) -> ReportsApi {
        ReportsApi::new(self.client.clone())
    }
}

/// Fetch the page a list call currently points at
async fn send_page<C: PagedCall>(
    call: &C,
    abort: Option<AbortRegistration>,
) -> Result<Response<C::Page>> {
    let spec = call.page_request(call.start_token()).abort(abort);
    call.client().fetch_json(spec).await
}
