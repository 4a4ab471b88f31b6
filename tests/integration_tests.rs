//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: client config → typed calls → paging →
//! report export

use adexchange_seller::api::{CallBuilder, ListCallBuilder};
use adexchange_seller::auth::TokenSource;
use adexchange_seller::output::{write_csv, write_report_parquet};
use adexchange_seller::{AdExchangeSeller, AuthConfig, ClientConfig, Error, Result};
use async_trait::async_trait;
use futures::future::AbortHandle;
use futures::TryStreamExt;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs::File;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use test_case::test_case;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn config_for(server: &MockServer, auth_yaml: &str) -> ClientConfig {
    let yaml = format!(
        "base_url: {}/\nuser_agent: integration/1.0\nrate_limit: null\n{auth_yaml}",
        server.uri()
    );
    ClientConfig::from_yaml_str(&yaml).unwrap()
}

fn api_from(config: &ClientConfig) -> AdExchangeSeller {
    AdExchangeSeller::with_config(config.http_config(), config.auth_config()).unwrap()
}

// ============================================================================
// Auth and Config Integration Tests
// ============================================================================

#[tokio::test]
async fn test_bearer_token_and_user_agent_from_config() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/adclients"))
        .and(header("Authorization", "Bearer ya29.test"))
        .and(query_param_is_missing("key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "adexchangeseller#adClients",
            "items": [{ "kind": "adexchangeseller#adClient", "id": "ca-pub-1" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server, "auth:\n  bearer_token: ya29.test\n");
    let clients = api_from(&config).adclients().list().send().await.unwrap();
    assert_eq!(clients.items[0].id.as_deref(), Some("ca-pub-1"));

    let requests = server.received_requests().await.unwrap();
    let agent = requests[0].headers.get("user-agent").unwrap().to_str().unwrap();
    assert!(agent.ends_with(" integration/1.0"), "{agent}");
}

#[tokio::test]
async fn test_api_key_from_environment() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/adclients/ca-pub-1/urlchannels"))
        .and(query_param("key", "k-env"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "adexchangeseller#urlChannels",
            "items": [{ "id": "uc1", "urlPattern": "example.com/news" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = config_for(&server, "");
    config
        .apply_env_from(|key| (key == "ADX_SELLER_API_KEY").then(|| "k-env".to_string()))
        .unwrap();

    let channels = api_from(&config)
        .urlchannels()
        .list("ca-pub-1")
        .send()
        .await
        .unwrap();
    assert_eq!(
        channels.items[0].url_pattern.as_deref(),
        Some("example.com/news")
    );
}

struct CountingTokens(AtomicUsize);

#[async_trait]
impl TokenSource for CountingTokens {
    async fn token(&self) -> Result<String> {
        let n = self.0.fetch_add(1, Ordering::SeqCst);
        Ok(format!("token-{n}"))
    }
}

#[tokio::test]
async fn test_token_source_consulted_per_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/adclients/ca-pub-1/adunits"))
        .and(query_param_is_missing("pageToken"))
        .and(header("Authorization", "Bearer token-0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "id": "u1" }],
            "nextPageToken": "p2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/adclients/ca-pub-1/adunits"))
        .and(query_param("pageToken", "p2"))
        .and(header("Authorization", "Bearer token-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "id": "u2" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server, "");
    let source = CountingTokens(AtomicUsize::new(0));
    let api = AdExchangeSeller::with_config(config.http_config(), AuthConfig::token_source(source))
        .unwrap();

    let ids: Vec<String> = api
        .adunits()
        .list("ca-pub-1")
        .pager()
        .items()
        .map_ok(|unit| unit.id.unwrap_or_default())
        .try_collect()
        .await
        .unwrap();
    assert_eq!(ids, vec!["u1", "u2"]);
}

// ============================================================================
// Listing Integration Tests
// ============================================================================

#[tokio::test]
async fn test_partial_response_across_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/adclients/ca-pub-1/customchannels"))
        .and(query_param("fields", "items(id,name),nextPageToken"))
        .and(query_param("maxResults", "1"))
        .and(query_param_is_missing("pageToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "id": "c1", "name": "Sports" }],
            "nextPageToken": "n1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/adclients/ca-pub-1/customchannels"))
        .and(query_param("fields", "items(id,name),nextPageToken"))
        .and(query_param("maxResults", "1"))
        .and(query_param("pageToken", "n1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "id": "c2", "name": "News" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server, "");
    let channels = api_from(&config)
        .customchannels()
        .list("ca-pub-1")
        .fields("items(id,name),nextPageToken")
        .max_results(1)
        .pager()
        .collect_all()
        .await
        .unwrap();

    let names: Vec<_> = channels.iter().filter_map(|c| c.name.as_deref()).collect();
    assert_eq!(names, vec!["Sports", "News"]);
}

/// Serve `total` URL channels, `page_size` per page, with offset tokens
fn paged_channels(
    total: usize,
    page_size: usize,
) -> impl Fn(&Request) -> ResponseTemplate + Send + Sync + 'static {
    move |request: &Request| {
        let offset: usize = request
            .url
            .query_pairs()
            .find(|(k, _)| k == "pageToken")
            .and_then(|(_, v)| v.parse().ok())
            .unwrap_or(0);
        let end = (offset + page_size).min(total);
        let items: Vec<_> = (offset..end)
            .map(|i| json!({ "id": format!("uc{i}") }))
            .collect();
        let mut body = json!({ "kind": "adexchangeseller#urlChannels", "items": items });
        if end < total {
            body["nextPageToken"] = json!(end.to_string());
        }
        ResponseTemplate::new(200).set_body_json(body)
    }
}

#[test_case(0, 1, &[0] ; "no items")]
#[test_case(1, 1, &[1] ; "one item")]
#[test_case(2, 1, &[1, 1] ; "two items page size one")]
#[test_case(5, 2, &[2, 2, 1] ; "five items page size two")]
#[tokio::test]
async fn test_pagination_terminates(total: usize, page_size: usize, expected: &[usize]) {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/adclients/ca-pub-1/urlchannels"))
        .respond_with(paged_channels(total, page_size))
        .expect(expected.len() as u64)
        .mount(&server)
        .await;

    let config = config_for(&server, "");
    let mut pager = api_from(&config)
        .urlchannels()
        .list("ca-pub-1")
        .max_results(page_size as u32)
        .pager();

    let mut sizes = Vec::new();
    let mut tokens = Vec::new();
    let mut ids = Vec::new();
    while let Some(page) = pager.next_page().await.unwrap() {
        sizes.push(page.items.len());
        tokens.push(page.next_page_token.is_some());
        ids.extend(page.items.iter().filter_map(|c| c.id.clone()));
    }

    assert_eq!(sizes, expected);
    let all: Vec<String> = (0..total).map(|i| format!("uc{i}")).collect();
    assert_eq!(ids, all);
    assert_eq!(tokens.last(), Some(&false));
    assert!(tokens[..tokens.len() - 1].iter().all(|t| *t));
    assert_eq!(pager.state().items_fetched, total as u64);
}

#[tokio::test]
async fn test_forbidden_surfaces_error_items() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/adclients"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {
                "code": 403,
                "message": "User does not have an Ad Exchange account.",
                "errors": [{
                    "domain": "global",
                    "reason": "noAdExchangeAccount",
                    "message": "User does not have an Ad Exchange account."
                }]
            }
        })))
        .mount(&server)
        .await;

    let config = config_for(&server, "");
    let err = api_from(&config).adclients().list().send().await.unwrap_err();

    assert_eq!(err.status(), Some(403));
    let api_error = err.api_error().unwrap();
    assert_eq!(api_error.items()[0].reason, "noAdExchangeAccount");
    assert!(err.to_string().contains("Ad Exchange account"));
}

#[tokio::test]
async fn test_conditional_get_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/adclients/ca-pub-1/adunits/u1"))
        .and(header("If-None-Match", "\"v1\""))
        .respond_with(ResponseTemplate::new(304))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/adclients/ca-pub-1/adunits/u1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("ETag", "\"v1\"")
                .set_body_json(json!({ "id": "u1", "code": "1234", "status": "NEW" })),
        )
        .mount(&server)
        .await;

    let config = config_for(&server, "");
    let api = api_from(&config);

    let unit = api.adunits().get("ca-pub-1", "u1").send().await.unwrap();
    let etag = unit.meta.etag().unwrap().to_string();
    assert_eq!(unit.code.as_deref(), Some("1234"));

    let err = api
        .adunits()
        .get("ca-pub-1", "u1")
        .if_none_match(etag)
        .send()
        .await
        .unwrap_err();
    assert!(err.is_not_modified());
}

// ============================================================================
// Report Export Integration Tests
// ============================================================================

#[tokio::test]
async fn test_report_to_csv_and_parquet() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reports"))
        .and(query_param("startDate", "2024-01-01"))
        .and(query_param("endDate", "2024-01-02"))
        .and(query_param("filter", "AD_CLIENT_ID==ca-pub-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "adexchangeseller#report",
            "totalMatchedRows": "2",
            "headers": [
                { "name": "DATE", "type": "DIMENSION" },
                { "name": "AD_IMPRESSIONS", "type": "METRIC_TALLY" },
                { "name": "EARNINGS", "type": "METRIC_CURRENCY", "currency": "EUR" }
            ],
            "rows": [
                ["2024-01-01", "10", "0.40"],
                ["2024-01-02", "30", "1.20"]
            ],
            "totals": ["", "40", "1.60"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server, "parquet_compression: snappy\n");
    let report = api_from(&config)
        .reports()
        .generate("2024-01-01", "2024-01-02")
        .dimension("DATE")
        .metric("AD_IMPRESSIONS")
        .metric("EARNINGS")
        .filter("AD_CLIENT_ID==ca-pub-1")
        .send()
        .await
        .unwrap();
    assert_eq!(report.total_matched_rows, Some(2));

    let mut csv = Vec::new();
    write_csv(&report, &mut csv).unwrap();
    let csv = String::from_utf8(csv).unwrap();
    assert_eq!(
        csv.lines().collect::<Vec<_>>(),
        vec![
            "DATE,AD_IMPRESSIONS,EARNINGS",
            "2024-01-01,10,0.40",
            "2024-01-02,30,1.20",
            "TOTALS,40,1.60",
        ]
    );

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("report.parquet");
    let parquet_config = config.parquet_config().unwrap();
    let rows = write_report_parquet(&file, &report, Some(&parquet_config)).unwrap();
    assert_eq!(rows, 2);

    let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(&file).unwrap())
        .unwrap()
        .build()
        .unwrap();
    let total: usize = reader.map(|batch| batch.unwrap().num_rows()).sum();
    assert_eq!(total, 2);
}

#[tokio::test]
async fn test_invalid_report_parameters_never_reach_server() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = config_for(&server, "");
    let err = api_from(&config)
        .reports()
        .generate("yesterday", "today")
        .send()
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidParameter { ref name, .. } if name == "startDate"));
}

#[tokio::test]
async fn test_abort_cancels_slow_report() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reports"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(5))
                .set_body_json(json!({ "headers": [] })),
        )
        .mount(&server)
        .await;

    let config = config_for(&server, "");
    let (handle, registration) = AbortHandle::new_pair();
    let call = api_from(&config)
        .reports()
        .generate("today-1d", "today")
        .abort_with(registration)
        .send();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.abort();
    });

    let err = call.await.unwrap_err();
    assert!(matches!(err, Error::Cancelled));
}
