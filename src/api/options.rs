//! Modifiers shared by every call
//!
//! Each call builder carries a [`CallOptions`]; list calls also carry a
//! [`PageOptions`]. Unset fields are never serialized.

use crate::http::{clamp_param, RequestSpec};
use crate::types::FieldMask;
use futures::future::AbortRegistration;
use std::time::Duration;

/// Ceiling for `maxResults` on ad client, ad unit and channel listings
pub const MAX_LIST_RESULTS: u32 = 10_000;

/// Ceiling for `maxResults` on saved report listings
pub const MAX_SAVED_REPORTS: u32 = 100;

/// Ceiling for `maxResults` on generated reports
pub const MAX_REPORT_ROWS: u32 = 50_000;

/// Ceiling for `startIndex` on generated reports
pub const MAX_START_INDEX: u32 = 5_000;

/// Per-call modifiers common to every method
#[derive(Debug, Default)]
pub struct CallOptions {
    /// Partial-response selection
    pub fields: Option<FieldMask>,
    /// Cache tag for a conditional fetch
    pub if_none_match: Option<String>,
    /// Deadline overriding the client default
    pub timeout: Option<Duration>,
    /// External cancellation signal; a pager made from the call takes it over
    pub abort: Option<AbortRegistration>,
}

impl CallOptions {
    /// Apply everything except the abort registration
    pub(crate) fn decorate(&self, spec: RequestSpec) -> RequestSpec {
        spec.fields(self.fields.clone())
            .if_none_match(self.if_none_match.clone())
            .timeout(self.timeout)
    }
}

/// Page size and position of a list call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageOptions {
    /// Requested page size
    pub max_results: Option<u32>,
    /// Continuation token to start from
    pub page_token: Option<String>,
}

impl PageOptions {
    /// Apply `maxResults` (clamped to `max`) and the given page token
    pub(crate) fn decorate(&self, spec: RequestSpec, max: u32, page_token: Option<&str>) -> RequestSpec {
        spec.query_opt(
            "maxResults",
            self.max_results.map(|n| clamp_param("maxResults", n, max)),
        )
        .query_opt("pageToken", page_token.filter(|t| !t.is_empty()))
    }
}

// ============================================================================
// Builder Traits
// ============================================================================

/// Modifiers accepted by every call
///
/// ```
/// use adexchange_seller::api::CallBuilder;
/// # fn demo(api: &adexchange_seller::AdExchangeSeller) {
/// let call = api
///     .adclients()
///     .list()
///     .fields("items(id,productCode),nextPageToken")
///     .if_none_match("\"etag-1\"");
/// # }
/// ```
pub trait CallBuilder: Sized {
    /// Mutable access to the shared modifiers
    fn options_mut(&mut self) -> &mut CallOptions;

    /// Restrict the response to the selected fields
    #[must_use]
    fn fields(mut self, mask: impl Into<FieldMask>) -> Self {
        self.options_mut().fields = Some(mask.into());
        self
    }

    /// Only fetch if the resource no longer matches this cache tag
    #[must_use]
    fn if_none_match(mut self, etag: impl Into<String>) -> Self {
        self.options_mut().if_none_match = Some(etag.into());
        self
    }

    /// Deadline for this call
    #[must_use]
    fn timeout(mut self, timeout: Duration) -> Self {
        self.options_mut().timeout = Some(timeout);
        self
    }

    /// Cancel the call when the matching `AbortHandle` fires
    #[must_use]
    fn abort_with(mut self, registration: AbortRegistration) -> Self {
        self.options_mut().abort = Some(registration);
        self
    }
}

/// Modifiers accepted by list calls
pub trait ListCallBuilder: CallBuilder {
    /// Mutable access to the page modifiers
    fn page_options_mut(&mut self) -> &mut PageOptions;

    /// Requested page size, clamped to the method's ceiling
    #[must_use]
    fn max_results(mut self, max_results: u32) -> Self {
        self.page_options_mut().max_results = Some(max_results);
        self
    }

    /// Continue a listing from a token returned earlier
    #[must_use]
    fn page_token(mut self, token: impl Into<String>) -> Self {
        self.page_options_mut().page_token = Some(token.into());
        self
    }
}
