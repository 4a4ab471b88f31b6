//! Resource models
//!
//! Every field is optional on the wire. A field that is `None` is never
//! serialized; `Some(false)` or `Some(String::new())` is.

use crate::pagination::Page;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Ad Clients
// ============================================================================

/// An ad client (one per product the account sells through)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdClient {
    /// Always `adexchangeseller#adClient`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Unique identifier of this ad client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Whether this client is opted in to ARC
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arc_opt_in: Option<bool>,
    /// Product code of the client (e.g. `AFC`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_code: Option<String>,
    /// Whether reports can be generated for this client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supports_reporting: Option<bool>,
}

// ============================================================================
// Ad Units
// ============================================================================

/// Activity status of an ad unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AdUnitStatus {
    /// Created in the last seven days, no activity yet
    New,
    /// Activity in the last seven days
    Active,
    /// No activity in the last seven days
    Inactive,
    /// A value this client does not know about
    Other(String),
}

impl AdUnitStatus {
    /// Wire value
    pub fn as_str(&self) -> &str {
        match self {
            Self::New => "NEW",
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for AdUnitStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "NEW" => Self::New,
            "ACTIVE" => Self::Active,
            "INACTIVE" => Self::Inactive,
            _ => Self::Other(value),
        }
    }
}

impl From<AdUnitStatus> for String {
    fn from(value: AdUnitStatus) -> Self {
        match value {
            AdUnitStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for AdUnitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ad unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdUnit {
    /// Always `adexchangeseller#adUnit`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Unique identifier, valid within the ad client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Identity code, e.g. `ca-pub-123456:78910`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Name of the ad unit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Activity status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AdUnitStatus>,
}

// ============================================================================
// Channels
// ============================================================================

/// A custom channel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomChannel {
    /// Always `adexchangeseller#customChannel`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Unique identifier, valid within the ad client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Code of the channel, unique within the ad client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Name of the channel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Targeting information, if the channel is activated for targeting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targeting_info: Option<TargetingInfo>,
}

/// Targeting information of a custom channel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetingInfo {
    /// Name used to describe the channel externally
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ads_appear_on: Option<String>,
    /// External description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Where ads appear, e.g. `TOP_LEFT` or `MULTIPLE_LOCATIONS`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Language of the sites ads are displayed on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_language: Option<String>,
}

/// A URL channel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlChannel {
    /// Always `adexchangeseller#urlChannel`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Unique identifier, valid within the ad client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// URL pattern, e.g. `www.example.com/sports`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_pattern: Option<String>,
}

// ============================================================================
// Saved Reports
// ============================================================================

/// A report definition stored on the server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedReport {
    /// Always `adexchangeseller#savedReport`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Unique identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Name of the saved report
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

// ============================================================================
// Collections
// ============================================================================

/// One page of a resource listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection<T> {
    /// Kind of list, e.g. `adexchangeseller#adUnits`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Cache tag of this page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    /// Resources on this page, in server order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<T>,
    /// Token for the next page; absent on the last page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            kind: None,
            etag: None,
            items: Vec::new(),
            next_page_token: None,
        }
    }
}

impl<T> Page for Collection<T> {
    type Item = T;

    fn items(&self) -> &[T] {
        &self.items
    }

    fn into_items(self) -> Vec<T> {
        self.items
    }

    fn next_page_token(&self) -> Option<&str> {
        self.next_page_token.as_deref()
    }

    fn etag(&self) -> Option<&str> {
        self.etag.as_deref()
    }
}

/// A page of ad clients
pub type AdClients = Collection<AdClient>;

/// A page of ad units
pub type AdUnits = Collection<AdUnit>;

/// A page of custom channels
pub type CustomChannels = Collection<CustomChannel>;

/// A page of URL channels
pub type UrlChannels = Collection<UrlChannel>;

/// A page of saved reports
pub type SavedReports = Collection<SavedReport>;
