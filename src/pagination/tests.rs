//! Tests for pagination module

use super::*;
use crate::error::Error;
use crate::http::{HttpClient, HttpClientConfig, RequestSpec};
use futures::future::AbortHandle;
use futures::StreamExt;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// NextPage Tests
// ============================================================================

#[test]
fn test_next_page_from_token() {
    let next = NextPage::from_token(Some("abc"));
    assert!(next.is_continue());
    assert_eq!(
        next,
        NextPage::Continue {
            token: "abc".to_string()
        }
    );

    assert!(NextPage::from_token(None).is_done());
    assert!(NextPage::from_token(Some("")).is_done());
}

// ============================================================================
// PageState Tests
// ============================================================================

#[test]
fn test_page_state_default() {
    let state = PageState::new();
    assert_eq!(state.pages_fetched, 0);
    assert_eq!(state.items_fetched, 0);
    assert!(state.token.is_none());
    assert!(!state.done);
}

#[test]
fn test_page_state_with_token() {
    assert_eq!(
        PageState::with_token(Some("t1".to_string())).token.as_deref(),
        Some("t1")
    );
    assert!(PageState::with_token(Some(String::new())).token.is_none());
}

#[test]
fn test_page_state_record() {
    let mut state = PageState::new();

    let next = state.record(2, Some("t1")).unwrap();
    assert!(next.is_continue());
    assert_eq!(state.token.as_deref(), Some("t1"));

    let next = state.record(0, Some("t2")).unwrap();
    assert!(next.is_continue());
    assert!(!state.done);

    let next = state.record(1, None).unwrap();
    assert!(next.is_done());
    assert!(state.done);
    assert!(state.token.is_none());
    assert_eq!(state.pages_fetched, 3);
    assert_eq!(state.items_fetched, 3);
}

#[test]
fn test_page_state_rejects_repeated_token() {
    let mut state = PageState::new();
    state.record(1, Some("same")).unwrap();

    let err = state.record(1, Some("same")).unwrap_err();
    assert!(matches!(err, Error::Pagination { .. }));
    assert!(state.done);
}

// ============================================================================
// Pager Tests
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NumberPage {
    #[serde(default)]
    items: Vec<u32>,
    next_page_token: Option<String>,
}

impl Page for NumberPage {
    type Item = u32;

    fn items(&self) -> &[u32] {
        &self.items
    }

    fn into_items(self) -> Vec<u32> {
        self.items
    }

    fn next_page_token(&self) -> Option<&str> {
        self.next_page_token.as_deref()
    }
}

struct NumberCall {
    client: HttpClient,
    start: Option<String>,
}

impl PagedCall for NumberCall {
    type Page = NumberPage;

    fn client(&self) -> &HttpClient {
        &self.client
    }

    fn page_request(&self, page_token: Option<&str>) -> RequestSpec {
        RequestSpec::get("numbers.list", "numbers").query_opt("pageToken", page_token)
    }

    fn start_token(&self) -> Option<&str> {
        self.start.as_deref()
    }
}

fn number_call(server: &MockServer, start: Option<&str>) -> NumberCall {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .no_rate_limit()
        .build();
    NumberCall {
        client: HttpClient::with_config(config).unwrap(),
        start: start.map(str::to_string),
    }
}

async fn mount_page(
    server: &MockServer,
    token: Option<&str>,
    items: &[u32],
    next: Option<&str>,
) {
    let mut body = json!({ "items": items });
    if let Some(next) = next {
        body["nextPageToken"] = json!(next);
    }

    let mock = Mock::given(method("GET")).and(path("/numbers"));
    let mock = match token {
        Some(token) => mock.and(query_param("pageToken", token)),
        None => mock.and(query_param_is_missing("pageToken")),
    };
    mock.respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_pager_follows_tokens() {
    let server = MockServer::start().await;
    mount_page(&server, None, &[1, 2], Some("p2")).await;
    mount_page(&server, Some("p2"), &[3, 4], Some("p3")).await;
    mount_page(&server, Some("p3"), &[5], None).await;

    let mut pager = Pager::new(number_call(&server, None));
    let mut sizes = Vec::new();
    while let Some(page) = pager.next_page().await.unwrap() {
        sizes.push(page.items.len());
    }

    assert_eq!(sizes, vec![2, 2, 1]);
    assert_eq!(pager.state().items_fetched, 5);
    assert!(pager.next_page().await.unwrap().is_none());
}

#[tokio::test]
async fn test_pager_follows_empty_page_with_token() {
    let server = MockServer::start().await;
    mount_page(&server, None, &[1], Some("p2")).await;
    mount_page(&server, Some("p2"), &[], None).await;

    let items = Pager::new(number_call(&server, None))
        .collect_all()
        .await
        .unwrap();
    assert_eq!(items, vec![1]);
}

#[tokio::test]
async fn test_pager_empty_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/numbers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let items = Pager::new(number_call(&server, None))
        .collect_all()
        .await
        .unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_pager_resumes_from_start_token() {
    let server = MockServer::start().await;
    mount_page(&server, Some("p7"), &[7], None).await;

    let items = Pager::new(number_call(&server, Some("p7")))
        .collect_all()
        .await
        .unwrap();
    assert_eq!(items, vec![7]);
}

#[tokio::test]
async fn test_pager_max_pages() {
    let server = MockServer::start().await;
    mount_page(&server, None, &[1, 2], Some("p2")).await;

    let pages: Vec<_> = Pager::new(number_call(&server, None))
        .max_pages(1)
        .into_stream()
        .collect()
        .await;
    assert_eq!(pages.len(), 1);
}

#[tokio::test]
async fn test_pager_stops_on_error() {
    let server = MockServer::start().await;
    mount_page(&server, None, &[1], Some("p2")).await;
    Mock::given(method("GET"))
        .and(path("/numbers"))
        .and(query_param("pageToken", "p2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let err = Pager::new(number_call(&server, None))
        .collect_all()
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_pager_abort_before_first_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [1] })))
        .expect(0)
        .mount(&server)
        .await;

    let (handle, registration) = AbortHandle::new_pair();
    handle.abort();

    let err = Pager::new(number_call(&server, None))
        .abort_with(registration)
        .collect_all()
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Cancelled));
}

#[tokio::test]
async fn test_pager_abort_between_pages() {
    let server = MockServer::start().await;
    mount_page(&server, None, &[1, 2], Some("p2")).await;
    Mock::given(method("GET"))
        .and(path("/numbers"))
        .and(query_param("pageToken", "p2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(5))
                .set_body_json(json!({ "items": [3] })),
        )
        .mount(&server)
        .await;

    let (handle, registration) = AbortHandle::new_pair();
    let mut pager = Pager::new(number_call(&server, None)).abort_with(registration);

    let first = pager.next_page().await.unwrap().unwrap();
    assert_eq!(first.items, vec![1, 2]);

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.abort();
    });

    let started = std::time::Instant::now();
    let err = pager.next_page().await.unwrap_err();
    assert!(matches!(err, Error::Cancelled));
    assert!(started.elapsed() < Duration::from_secs(5));
    assert!(pager.next_page().await.unwrap().is_none());
}
