//! `reports` resource and its `saved` sub-resource

use super::models::SavedReports;
use super::options::{
    CallBuilder, CallOptions, ListCallBuilder, PageOptions, MAX_REPORT_ROWS, MAX_SAVED_REPORTS,
    MAX_START_INDEX,
};
use super::params::{validate_date, validate_filter, validate_name, validate_sort};
use super::report::Report;
use super::send_page;
use crate::error::Result;
use crate::http::{clamp_param, HttpClient, MediaDownload, RequestSpec};
use crate::pagination::{PagedCall, Pager};
use crate::types::Response;
use futures::future::AbortRegistration;
use std::sync::Arc;
use tracing::debug;

/// Calls on the `reports` resource
#[derive(Debug, Clone)]
pub struct ReportsApi {
    client: Arc<HttpClient>,
}

impl ReportsApi {
    pub(crate) fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// Generate a report for a date range (both ends inclusive)
    ///
    /// Dates are `YYYY-MM-DD` or relative, such as `today-7d`.
    pub fn generate(
        &self,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> ReportsGenerateCall {
        ReportsGenerateCall {
            client: self.client.clone(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            dimensions: Vec::new(),
            metrics: Vec::new(),
            filters: Vec::new(),
            sorts: Vec::new(),
            locale: None,
            max_results: None,
            start_index: None,
            options: CallOptions::default(),
        }
    }

    /// Saved report definitions
    pub fn saved(&self) -> SavedReportsApi {
        SavedReportsApi {
            client: self.client.clone(),
        }
    }
}

// ============================================================================
// reports.generate
// ============================================================================

/// `reports.generate`
#[derive(Debug)]
pub struct ReportsGenerateCall {
    client: Arc<HttpClient>,
    start_date: String,
    end_date: String,
    dimensions: Vec<String>,
    metrics: Vec<String>,
    filters: Vec<String>,
    sorts: Vec<String>,
    locale: Option<String>,
    max_results: Option<u32>,
    start_index: Option<u32>,
    options: CallOptions,
}

impl ReportsGenerateCall {
    /// Add a dimension to group by
    #[must_use]
    pub fn dimension(mut self, dimension: impl Into<String>) -> Self {
        self.dimensions.push(dimension.into());
        self
    }

    /// Add several dimensions
    #[must_use]
    pub fn dimensions<I, S>(mut self, dimensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dimensions.extend(dimensions.into_iter().map(Into::into));
        self
    }

    /// Add a metric column
    #[must_use]
    pub fn metric(mut self, metric: impl Into<String>) -> Self {
        self.metrics.push(metric.into());
        self
    }

    /// Add several metric columns
    #[must_use]
    pub fn metrics<I, S>(mut self, metrics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metrics.extend(metrics.into_iter().map(Into::into));
        self
    }

    /// Add a filter, e.g. [`Filter::equals`](super::Filter::equals)
    #[must_use]
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filters.push(filter.into());
        self
    }

    /// Add a sort key, e.g. [`Sort::desc`](super::Sort::desc)
    #[must_use]
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sorts.push(sort.into());
        self
    }

    /// Locale for translated output (server default: `en_US`)
    #[must_use]
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Maximum number of rows, clamped to [`MAX_REPORT_ROWS`]
    #[must_use]
    pub fn max_results(mut self, max_results: u32) -> Self {
        self.max_results = Some(max_results);
        self
    }

    /// Index of the first row, clamped to [`MAX_START_INDEX`]
    #[must_use]
    pub fn start_index(mut self, start_index: u32) -> Self {
        self.start_index = Some(start_index);
        self
    }

    /// Check every parameter locally
    pub fn validate(&self) -> Result<()> {
        validate_date("startDate", &self.start_date)?;
        validate_date("endDate", &self.end_date)?;
        for dimension in &self.dimensions {
            validate_name("dimension", dimension)?;
        }
        for metric in &self.metrics {
            validate_name("metric", metric)?;
        }
        for filter in &self.filters {
            validate_filter(filter)?;
        }
        for sort in &self.sorts {
            validate_sort(sort)?;
        }
        if let Some(ref locale) = self.locale {
            validate_name("locale", locale)?;
        }
        Ok(())
    }

    /// Build the request after validating it
    pub fn request(&self) -> Result<RequestSpec> {
        self.validate()?;

        let spec = RequestSpec::get("adexchangeseller.reports.generate", "reports")
            .query("startDate", &self.start_date)
            .query("endDate", &self.end_date)
            .query_all("dimension", &self.dimensions)
            .query_all("metric", &self.metrics)
            .query_all("filter", &self.filters)
            .query_all("sort", &self.sorts)
            .query_opt("locale", self.locale.as_deref())
            .query_opt(
                "maxResults",
                self.max_results
                    .map(|n| clamp_param("maxResults", n, MAX_REPORT_ROWS)),
            )
            .query_opt(
                "startIndex",
                self.start_index
                    .map(|n| clamp_param("startIndex", n, MAX_START_INDEX)),
            );

        Ok(self.options.decorate(spec))
    }

    /// Generate the report and decode it
    pub async fn send(mut self) -> Result<Response<Report>> {
        let spec = self.request()?.abort(self.options.abort.take());
        let report = self.client.fetch_json::<Report>(spec).await?;
        report.validate()?;
        debug!(
            "Report has {} columns and {} rows",
            report.headers.len(),
            report.rows.len()
        );
        Ok(report)
    }

    /// Generate the report in media mode and hand back the raw body
    pub async fn download(mut self) -> Result<MediaDownload> {
        let spec = self.request()?.abort(self.options.abort.take());
        self.client.fetch_media(spec).await
    }
}

impl CallBuilder for ReportsGenerateCall {
    fn options_mut(&mut self) -> &mut CallOptions {
        &mut self.options
    }
}

// ============================================================================
// reports.saved
// ============================================================================

/// Calls on the `reports.saved` resource
#[derive(Debug, Clone)]
pub struct SavedReportsApi {
    client: Arc<HttpClient>,
}

impl SavedReportsApi {
    /// List the saved report definitions
    pub fn list(&self) -> SavedReportsListCall {
        SavedReportsListCall {
            client: self.client.clone(),
            page: PageOptions::default(),
            options: CallOptions::default(),
        }
    }

    /// Generate a saved report
    pub fn generate(&self, saved_report_id: impl Into<String>) -> SavedReportGenerateCall {
        SavedReportGenerateCall {
            client: self.client.clone(),
            saved_report_id: saved_report_id.into(),
            locale: None,
            max_results: None,
            start_index: None,
            options: CallOptions::default(),
        }
    }
}

/// `reports.saved.list`
#[derive(Debug)]
pub struct SavedReportsListCall {
    client: Arc<HttpClient>,
    page: PageOptions,
    options: CallOptions,
}

impl SavedReportsListCall {
    /// Fetch one page
    pub async fn send(mut self) -> Result<Response<SavedReports>> {
        let abort = self.options.abort.take();
        send_page(&self, abort).await
    }

    /// Follow continuation tokens from the current page onwards
    pub fn pager(self) -> Pager<Self> {
        Pager::new(self)
    }
}

impl CallBuilder for SavedReportsListCall {
    fn options_mut(&mut self) -> &mut CallOptions {
        &mut self.options
    }
}

impl ListCallBuilder for SavedReportsListCall {
    fn page_options_mut(&mut self) -> &mut PageOptions {
        &mut self.page
    }
}

impl PagedCall for SavedReportsListCall {
    type Page = SavedReports;

    fn client(&self) -> &HttpClient {
        &self.client
    }

    fn page_request(&self, page_token: Option<&str>) -> RequestSpec {
        let spec = RequestSpec::get("adexchangeseller.reports.saved.list", "reports/saved");
        let spec = self.page.decorate(spec, MAX_SAVED_REPORTS, page_token);
        self.options.decorate(spec)
    }

    fn start_token(&self) -> Option<&str> {
        self.page.page_token.as_deref()
    }

    fn take_abort(&mut self) -> Option<AbortRegistration> {
        self.options.abort.take()
    }
}

/// `reports.saved.generate`
#[derive(Debug)]
pub struct SavedReportGenerateCall {
    client: Arc<HttpClient>,
    saved_report_id: String,
    locale: Option<String>,
    max_results: Option<u32>,
    start_index: Option<u32>,
    options: CallOptions,
}

impl SavedReportGenerateCall {
    /// Locale for translated output (server default: `en_US`)
    #[must_use]
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Maximum number of rows, clamped to [`MAX_REPORT_ROWS`]
    #[must_use]
    pub fn max_results(mut self, max_results: u32) -> Self {
        self.max_results = Some(max_results);
        self
    }

    /// Index of the first row, clamped to [`MAX_START_INDEX`]
    #[must_use]
    pub fn start_index(mut self, start_index: u32) -> Self {
        self.start_index = Some(start_index);
        self
    }

    /// Build the request after validating it
    pub fn request(&self) -> Result<RequestSpec> {
        if let Some(ref locale) = self.locale {
            validate_name("locale", locale)?;
        }

        let spec = RequestSpec::get(
            "adexchangeseller.reports.saved.generate",
            "reports/{savedReportId}",
        )
        .path_param("savedReportId", self.saved_report_id.clone())
        .query_opt("locale", self.locale.as_deref())
        .query_opt(
            "maxResults",
            self.max_results
                .map(|n| clamp_param("maxResults", n, MAX_REPORT_ROWS)),
        )
        .query_opt(
            "startIndex",
            self.start_index
                .map(|n| clamp_param("startIndex", n, MAX_START_INDEX)),
        );

        Ok(self.options.decorate(spec))
    }

    /// Generate the report and decode it
    pub async fn send(mut self) -> Result<Response<Report>> {
        let spec = self.request()?.abort(self.options.abort.take());
        let report = self.client.fetch_json::<Report>(spec).await?;
        report.validate()?;
        Ok(report)
    }
}

impl CallBuilder for SavedReportGenerateCall {
    fn options_mut(&mut self) -> &mut CallOptions {
        &mut self.options
    }
}
