//! CLI commands and argument parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Ad Exchange Seller command-line client
#[derive(Parser, Debug)]
#[command(name = "adx-seller")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// OAuth2 access token (overrides config and environment)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// API key (replaces a configured token; `--token` still wins)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Base URL of the API
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Output file (stdout if omitted)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands, one per API resource
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ad clients of the account
    Adclients {
        #[command(subcommand)]
        command: AdClientsCommand,
    },

    /// Ad units of an ad client
    Adunits {
        #[command(subcommand)]
        command: AdUnitsCommand,
    },

    /// Custom channels of an ad client
    Customchannels {
        #[command(subcommand)]
        command: CustomChannelsCommand,
    },

    /// URL channels of an ad client
    Urlchannels {
        #[command(subcommand)]
        command: UrlChannelsCommand,
    },

    /// Report generation
    Reports {
        #[command(subcommand)]
        command: ReportsCommand,
    },
}

/// Paging flags shared by list commands
#[derive(Args, Debug, Clone, Default)]
pub struct PageArgs {
    /// Page size (clamped to the method's maximum)
    #[arg(long)]
    pub max_results: Option<u32>,

    /// Continue from a token printed by an earlier run
    #[arg(long)]
    pub page_token: Option<String>,

    /// Follow continuation tokens and print every item
    #[arg(long)]
    pub all: bool,
}

/// Request flags shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct FetchArgs {
    /// Partial-response field selection, e.g. `items(id,name),nextPageToken`
    #[arg(long)]
    pub fields: Option<String>,

    /// Only fetch if the resource changed since this ETag
    #[arg(long)]
    pub if_none_match: Option<String>,

    /// Request deadline in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

/// `adclients` commands
#[derive(Subcommand, Debug)]
pub enum AdClientsCommand {
    /// List ad clients
    List {
        #[command(flatten)]
        page: PageArgs,
        #[command(flatten)]
        fetch: FetchArgs,
    },
}

/// `adunits` commands
#[derive(Subcommand, Debug)]
pub enum AdUnitsCommand {
    /// List the ad units of an ad client
    List {
        /// Ad client ID
        client: String,
        /// Include inactive ad units (`true` or `false`)
        #[arg(long)]
        include_inactive: Option<bool>,
        #[command(flatten)]
        page: PageArgs,
        #[command(flatten)]
        fetch: FetchArgs,
    },

    /// Get one ad unit
    Get {
        /// Ad client ID
        client: String,
        /// Ad unit ID
        unit: String,
        #[command(flatten)]
        fetch: FetchArgs,
    },

    /// List the custom channels an ad unit belongs to
    Channels {
        /// Ad client ID
        client: String,
        /// Ad unit ID
        unit: String,
        #[command(flatten)]
        page: PageArgs,
        #[command(flatten)]
        fetch: FetchArgs,
    },
}

/// `customchannels` commands
#[derive(Subcommand, Debug)]
pub enum CustomChannelsCommand {
    /// List the custom channels of an ad client
    List {
        /// Ad client ID
        client: String,
        #[command(flatten)]
        page: PageArgs,
        #[command(flatten)]
        fetch: FetchArgs,
    },

    /// Get one custom channel
    Get {
        /// Ad client ID
        client: String,
        /// Custom channel ID
        channel: String,
        #[command(flatten)]
        fetch: FetchArgs,
    },

    /// List the ad units in a custom channel
    Adunits {
        /// Ad client ID
        client: String,
        /// Custom channel ID
        channel: String,
        /// Include inactive ad units (`true` or `false`)
        #[arg(long)]
        include_inactive: Option<bool>,
        #[command(flatten)]
        page: PageArgs,
        #[command(flatten)]
        fetch: FetchArgs,
    },
}

/// `urlchannels` commands
#[derive(Subcommand, Debug)]
pub enum UrlChannelsCommand {
    /// List the URL channels of an ad client
    List {
        /// Ad client ID
        client: String,
        #[command(flatten)]
        page: PageArgs,
        #[command(flatten)]
        fetch: FetchArgs,
    },
}

/// Row window flags shared by report commands
#[derive(Args, Debug, Clone, Default)]
pub struct ReportWindowArgs {
    /// Locale for translated output, e.g. `en_US`
    #[arg(long)]
    pub locale: Option<String>,

    /// Maximum number of rows
    #[arg(long)]
    pub max_results: Option<u32>,

    /// Index of the first row
    #[arg(long)]
    pub start_index: Option<u32>,
}

/// `reports` commands
#[derive(Subcommand, Debug)]
pub enum ReportsCommand {
    /// Generate a report
    Generate {
        /// Start date (`YYYY-MM-DD` or relative, e.g. `today-7d`)
        start: String,
        /// End date, inclusive
        end: String,
        /// Dimension to group by (repeatable)
        #[arg(short = 'd', long = "dimension")]
        dimensions: Vec<String>,
        /// Metric column (repeatable)
        #[arg(short = 'm', long = "metric")]
        metrics: Vec<String>,
        /// Filter such as `AD_CLIENT_ID==ca-pub-1` (repeatable)
        #[arg(long = "filter", allow_hyphen_values = true)]
        filters: Vec<String>,
        /// Sort key such as `-EARNINGS` (repeatable)
        #[arg(long = "sort", allow_hyphen_values = true)]
        sorts: Vec<String>,
        #[command(flatten)]
        window: ReportWindowArgs,
        /// Stream the raw media response instead of decoding it
        #[arg(long)]
        download: bool,
        #[command(flatten)]
        fetch: FetchArgs,
    },

    /// List saved reports
    SavedList {
        #[command(flatten)]
        page: PageArgs,
        #[command(flatten)]
        fetch: FetchArgs,
    },

    /// Generate a saved report
    SavedGenerate {
        /// Saved report ID
        id: String,
        #[command(flatten)]
        window: ReportWindowArgs,
        #[command(flatten)]
        fetch: FetchArgs,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON
    Json,
    /// Human-readable JSON
    Pretty,
    /// One JSON object per line (list items or report rows)
    Jsonl,
    /// CSV (reports only)
    Csv,
    /// Parquet file (reports only, requires --output)
    Parquet,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_with_paging() {
        let cli = Cli::try_parse_from([
            "adx-seller",
            "adunits",
            "list",
            "ca-pub-1",
            "--include-inactive",
            "false",
            "--max-results",
            "50",
            "--all",
            "-f",
            "jsonl",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Jsonl);
        let Commands::Adunits {
            command:
                AdUnitsCommand::List {
                    client,
                    include_inactive,
                    page,
                    ..
                },
        } = cli.command
        else {
            panic!("expected adunits list");
        };
        assert_eq!(client, "ca-pub-1");
        assert_eq!(include_inactive, Some(false));
        assert_eq!(page.max_results, Some(50));
        assert!(page.all);
    }

    #[test]
    fn test_parse_report_generate() {
        let cli = Cli::try_parse_from([
            "adx-seller",
            "reports",
            "generate",
            "today-7d",
            "today",
            "-d",
            "DATE",
            "-d",
            "AD_CLIENT_ID",
            "-m",
            "EARNINGS",
            "--sort",
            "-EARNINGS",
            "--download",
            "-o",
            "report.csv",
        ])
        .unwrap();

        assert_eq!(cli.output, Some(PathBuf::from("report.csv")));
        let Commands::Reports {
            command:
                ReportsCommand::Generate {
                    dimensions,
                    sorts,
                    download,
                    ..
                },
        } = cli.command
        else {
            panic!("expected reports generate");
        };
        assert_eq!(dimensions, vec!["DATE", "AD_CLIENT_ID"]);
        assert_eq!(sorts, vec!["-EARNINGS"]);
        assert!(download);
    }
}
