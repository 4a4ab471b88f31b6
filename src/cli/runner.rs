//! CLI runner - executes commands

use crate::api::{
    AdExchangeSeller, CallBuilder, ListCallBuilder, Report, SavedReportGenerateCall,
};
use crate::cli::commands::{
    AdClientsCommand, AdUnitsCommand, Cli, Commands, CustomChannelsCommand, FetchArgs,
    OutputFormat, PageArgs, ReportWindowArgs, ReportsCommand, UrlChannelsCommand,
};
use crate::config::ClientConfig;
use crate::error::{Error, Result, ResultExt};
use crate::http::MediaDownload;
use crate::output::{write_csv, write_jsonl, write_report_parquet};
use crate::pagination::{Page, PagedCall, Pager};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    ///
    /// Ctrl-C drops the in-flight request and reports [`Error::Cancelled`].
    /// A `304 Not Modified` answer to `--if-none-match` is not a failure.
    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;
        let api = AdExchangeSeller::with_config(config.http_config(), config.auth_config())?;

        let result = tokio::select! {
            result = self.dispatch(&api, &config) => result,
            _ = tokio::signal::ctrl_c() => Err(Error::Cancelled),
        };

        match result {
            Err(Error::NotModified { .. }) => {
                eprintln!("not modified");
                Ok(())
            }
            other => other,
        }
    }

    /// Config file and environment, then command-line overrides
    fn load_config(&self) -> Result<ClientConfig> {
        let mut config = ClientConfig::resolve(self.cli.config.as_deref())?;
        if let Some(ref url) = self.cli.base_url {
            config.base_url.clone_from(url);
        }
        config.override_credentials(self.cli.token.as_deref(), self.cli.api_key.as_deref());
        if let Some(hint) = config.auth.missing_credential_hint() {
            warn!("{hint}");
        }
        debug!("Resolved config: {config:?}");
        Ok(config)
    }

    async fn dispatch(&self, api: &AdExchangeSeller, config: &ClientConfig) -> Result<()> {
        let page_size = config.page_size;

        match &self.cli.command {
            Commands::Adclients { command } => match command {
                AdClientsCommand::List { page, fetch } => {
                    let call = list_options(api.adclients().list(), page, page_size);
                    self.list(fetch_options(call, fetch), page).await
                }
            },

            Commands::Adunits { command } => match command {
                AdUnitsCommand::List {
                    client,
                    include_inactive,
                    page,
                    fetch,
                } => {
                    let mut call = api.adunits().list(client);
                    if let Some(include) = include_inactive {
                        call = call.include_inactive(*include);
                    }
                    let call = list_options(call, page, page_size);
                    self.list(fetch_options(call, fetch), page).await
                }
                AdUnitsCommand::Get {
                    client,
                    unit,
                    fetch,
                } => {
                    let response = fetch_options(api.adunits().get(client, unit), fetch)
                        .send()
                        .await?;
                    self.emit_json(&*response)
                }
                AdUnitsCommand::Channels {
                    client,
                    unit,
                    page,
                    fetch,
                } => {
                    let call =
                        list_options(api.adunits().custom_channels(client, unit), page, page_size);
                    self.list(fetch_options(call, fetch), page).await
                }
            },

            Commands::Customchannels { command } => match command {
                CustomChannelsCommand::List {
                    client,
                    page,
                    fetch,
                } => {
                    let call = list_options(api.customchannels().list(client), page, page_size);
                    self.list(fetch_options(call, fetch), page).await
                }
                CustomChannelsCommand::Get {
                    client,
                    channel,
                    fetch,
                } => {
                    let response = fetch_options(api.customchannels().get(client, channel), fetch)
                        .send()
                        .await?;
                    self.emit_json(&*response)
                }
                CustomChannelsCommand::Adunits {
                    client,
                    channel,
                    include_inactive,
                    page,
                    fetch,
                } => {
                    let mut call = api.customchannels().ad_units(client, channel);
                    if let Some(include) = include_inactive {
                        call = call.include_inactive(*include);
                    }
                    let call = list_options(call, page, page_size);
                    self.list(fetch_options(call, fetch), page).await
                }
            },

            Commands::Urlchannels { command } => match command {
                UrlChannelsCommand::List {
                    client,
                    page,
                    fetch,
                } => {
                    let call = list_options(api.urlchannels().list(client), page, page_size);
                    self.list(fetch_options(call, fetch), page).await
                }
            },

            Commands::Reports { command } => self.reports(api, config, command).await,
        }
    }

    async fn reports(
        &self,
        api: &AdExchangeSeller,
        config: &ClientConfig,
        command: &ReportsCommand,
    ) -> Result<()> {
        match command {
            ReportsCommand::Generate {
                start,
                end,
                dimensions,
                metrics,
                filters,
                sorts,
                window,
                download,
                fetch,
            } => {
                let mut call = api
                    .reports()
                    .generate(start, end)
                    .dimensions(dimensions)
                    .metrics(metrics);
                for filter in filters {
                    call = call.filter(filter);
                }
                for sort in sorts {
                    call = call.sort(sort);
                }
                if let Some(ref locale) = window.locale {
                    call = call.locale(locale);
                }
                if let Some(max) = window.max_results {
                    call = call.max_results(max);
                }
                if let Some(index) = window.start_index {
                    call = call.start_index(index);
                }
                let call = fetch_options(call, fetch);

                if *download {
                    return self.download(call.download().await?).await;
                }

                let start_time = Instant::now();
                let report = call.send().await?;
                info!(
                    "Generated report: {} rows in {:?}",
                    report.row_count(),
                    start_time.elapsed()
                );
                self.emit_report(&report, config)
            }

            ReportsCommand::SavedList { page, fetch } => {
                let call = list_options(api.reports().saved().list(), page, config.page_size);
                self.list(fetch_options(call, fetch), page).await
            }

            ReportsCommand::SavedGenerate { id, window, fetch } => {
                let call = window_options(api.reports().saved().generate(id), window);
                let report = fetch_options(call, fetch).send().await?;
                info!("Generated saved report {id}: {} rows", report.row_count());
                self.emit_report(&report, config)
            }
        }
    }

    /// One page, or every page with `--all`
    async fn list<C>(&self, call: C, page: &PageArgs) -> Result<()>
    where
        C: PagedCall,
        C::Page: Serialize,
        <C::Page as Page>::Item: Serialize,
    {
        let mut pager = Pager::new(call);

        if page.all {
            let items = pager.collect_all().await?;
            info!("Fetched {} items", items.len());
            return self.emit_items(&items);
        }

        let Some(response) = pager.next_page().await? else {
            return Ok(());
        };
        let (meta, payload) = response.into_parts();
        if let Some(etag) = meta.etag() {
            debug!("ETag: {etag}");
        }
        if let Some(token) = payload.next_page_token() {
            info!("More results available: --page-token {token}");
        }

        match self.cli.format {
            OutputFormat::Jsonl => self.emit_items(payload.items()),
            _ => self.emit_json(&payload),
        }
    }

    async fn download(&self, media: MediaDownload) -> Result<()> {
        if let Some(content_type) = media.content_type() {
            debug!("Downloading {content_type}");
        }

        let written = match self.cli.output {
            Some(ref path) => {
                let mut file = tokio::fs::File::create(path).await.with_context(|| {
                    format!("Failed to create output file '{}'", path.display())
                })?;
                let written = media.copy_to(&mut file).await?;
                info!("Wrote {written} bytes to {}", path.display());
                written
            }
            None => media.copy_to(&mut tokio::io::stdout()).await?,
        };
        debug!("Download complete: {written} bytes");
        Ok(())
    }

    // ========================================================================
    // Output
    // ========================================================================

    /// Destination for text output: `--output` or stdout
    fn sink(&self) -> Result<Box<dyn Write>> {
        match self.cli.output {
            Some(ref path) => {
                let file = File::create(path).with_context(|| {
                    format!("Failed to create output file '{}'", path.display())
                })?;
                Ok(Box::new(BufWriter::new(file)))
            }
            None => Ok(Box::new(io::stdout().lock())),
        }
    }

    fn emit_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let mut out = self.sink()?;
        match self.cli.format {
            OutputFormat::Json | OutputFormat::Jsonl => serde_json::to_writer(&mut out, value)?,
            OutputFormat::Pretty => serde_json::to_writer_pretty(&mut out, value)?,
            OutputFormat::Csv | OutputFormat::Parquet => {
                return Err(Error::output(format!(
                    "{:?} output is only available for reports",
                    self.cli.format
                )))
            }
        }
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }

    fn emit_items<T: Serialize>(&self, items: &[T]) -> Result<()> {
        if self.cli.format != OutputFormat::Jsonl {
            return self.emit_json(items);
        }

        let mut out = self.sink()?;
        for item in items {
            serde_json::to_writer(&mut out, item)?;
            writeln!(out)?;
        }
        out.flush()?;
        Ok(())
    }

    fn emit_report(&self, report: &Report, config: &ClientConfig) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json | OutputFormat::Pretty => self.emit_json(report),
            OutputFormat::Csv => {
                let mut out = self.sink()?;
                write_csv(report, &mut out)?;
                out.flush()?;
                Ok(())
            }
            OutputFormat::Jsonl => {
                let mut out = self.sink()?;
                write_jsonl(report, &mut out)?;
                out.flush()?;
                Ok(())
            }
            OutputFormat::Parquet => {
                let path = self.cli.output.as_ref().ok_or_else(|| {
                    Error::output("Parquet format requires an --output file")
                })?;
                let parquet = config.parquet_config()?;
                let rows = write_report_parquet(path, report, Some(&parquet))?;
                info!("Wrote {rows} rows to {}", path.display());
                Ok(())
            }
        }
    }
}

// ============================================================================
// Builder Helpers
// ============================================================================

fn fetch_options<B: CallBuilder>(mut call: B, fetch: &FetchArgs) -> B {
    if let Some(ref fields) = fetch.fields {
        call = call.fields(fields.as_str());
    }
    if let Some(ref etag) = fetch.if_none_match {
        call = call.if_none_match(etag);
    }
    if let Some(secs) = fetch.timeout_secs {
        call = call.timeout(Duration::from_secs(secs));
    }
    call
}

fn list_options<B: ListCallBuilder>(mut call: B, page: &PageArgs, page_size: Option<u32>) -> B {
    if let Some(max) = page.max_results.or(page_size) {
        call = call.max_results(max);
    }
    if let Some(ref token) = page.page_token {
        call = call.page_token(token);
    }
    call
}

fn window_options(
    mut call: SavedReportGenerateCall,
    window: &ReportWindowArgs,
) -> SavedReportGenerateCall {
    if let Some(ref locale) = window.locale {
        call = call.locale(locale);
    }
    if let Some(max) = window.max_results {
        call = call.max_results(max);
    }
    if let Some(index) = window.start_index {
        call = call.start_index(index);
    }
    call
}
