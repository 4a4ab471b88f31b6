//! Tests for the auth module

use super::*;
use crate::error::{Error, Result};
use async_trait::async_trait;

#[tokio::test]
async fn test_no_auth() {
    let auth = Authenticator::new(AuthConfig::None);
    let client = reqwest::Client::new();
    let req = client.get("https://example.com/api");

    let built = auth.apply(req).await.unwrap().build().unwrap();
    assert!(built.headers().get("Authorization").is_none());
    assert!(built.url().query().is_none());
}

#[tokio::test]
async fn test_bearer_token() {
    let auth = Authenticator::new(AuthConfig::bearer("my-token"));
    let client = reqwest::Client::new();
    let req = client.get("https://example.com/api");

    let built = auth.apply(req).await.unwrap().build().unwrap();
    assert_eq!(
        built.headers().get("Authorization").unwrap(),
        "Bearer my-token"
    );
}

#[tokio::test]
async fn test_api_key_query() {
    let auth = Authenticator::new(AuthConfig::api_key("k-123"));
    let client = reqwest::Client::new();
    let req = client.get("https://example.com/api?alt=json");

    let built = auth.apply(req).await.unwrap().build().unwrap();
    let query = built.url().query().unwrap();
    assert!(query.contains("alt=json"));
    assert!(query.contains("key=k-123"));
    assert!(built.headers().get("Authorization").is_none());
}

#[tokio::test]
async fn test_token_source() {
    let auth = Authenticator::new(AuthConfig::token_source(StaticToken::new("from-provider")));
    let client = reqwest::Client::new();
    let req = client.get("https://example.com/api");

    let built = auth.apply(req).await.unwrap().build().unwrap();
    assert_eq!(
        built.headers().get("Authorization").unwrap(),
        "Bearer from-provider"
    );
}

struct FailingSource;

#[async_trait]
impl TokenSource for FailingSource {
    async fn token(&self) -> Result<String> {
        Err(Error::config("credentials expired"))
    }
}

#[tokio::test]
async fn test_token_source_failure_propagates() {
    let auth = Authenticator::new(AuthConfig::token_source(FailingSource));
    let client = reqwest::Client::new();
    let req = client.get("https://example.com/api");

    let err = auth.apply(req).await.unwrap_err();
    assert!(err.to_string().contains("credentials expired"));
}
