//! Response interpretation
//!
//! Classifies a raw HTTP response into "not modified", "API error" or a
//! decoded payload, and wraps raw media responses for streaming.

use crate::error::{Error, Result};
use crate::types::{Response, ResponseMeta};
use bytes::Bytes;
use futures::{Stream, TryStreamExt};
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

/// Reject 304 and non-2xx responses
///
/// A 304 is closed without reading the body. Any other non-2xx has its body
/// read so the server's error payload reaches the caller.
pub async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();

    if status == StatusCode::NOT_MODIFIED {
        let headers = response.headers().clone();
        drop(response);
        return Err(Error::NotModified { headers });
    }

    if !status.is_success() {
        let headers = response.headers().clone();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                debug!("Failed to read body of HTTP {status} response: {e}");
                format!("<unreadable error body: {e}>")
            }
        };
        return Err(Error::api(status.as_u16(), headers, body));
    }

    Ok(response)
}

/// Interpret a response as JSON of type `T`
pub async fn interpret_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<Response<T>> {
    let response = check_status(response).await?;
    let meta = ResponseMeta::new(response.status().as_u16(), response.headers().clone());
    let body = response.bytes().await?;
    let payload = decode_body(&body)?;
    Ok(Response::new(meta, payload))
}

/// Decode a JSON body, reporting shape mismatches as decode errors
pub fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| Error::decode(format!("Failed to parse JSON: {e}")))
}

/// Interpret a response as a raw media download
pub async fn interpret_media(response: reqwest::Response) -> Result<MediaDownload> {
    let response = check_status(response).await?;
    Ok(MediaDownload::new(response))
}

// ============================================================================
// Media Download
// ============================================================================

/// An open media response (e.g. a CSV report)
///
/// The caller owns the body and is expected to consume it fully; dropping
/// the value releases the connection.
#[derive(Debug)]
pub struct MediaDownload {
    meta: ResponseMeta,
    response: reqwest::Response,
}

impl MediaDownload {
    fn new(response: reqwest::Response) -> Self {
        let meta = ResponseMeta::new(response.status().as_u16(), response.headers().clone());
        Self { meta, response }
    }

    /// Status and headers
    pub fn meta(&self) -> &ResponseMeta {
        &self.meta
    }

    /// Response headers
    pub fn headers(&self) -> &HeaderMap {
        &self.meta.headers
    }

    /// `Content-Type` of the body
    pub fn content_type(&self) -> Option<&str> {
        self.meta.header(CONTENT_TYPE.as_str())
    }

    /// Declared body length, if the server sent one
    pub fn content_length(&self) -> Option<u64> {
        self.response.content_length()
    }

    /// Read the entire body into memory
    pub async fn bytes(self) -> Result<Bytes> {
        Ok(self.response.bytes().await?)
    }

    /// Read the entire body as text
    pub async fn text(self) -> Result<String> {
        Ok(self.response.text().await?)
    }

    /// Stream the body chunk by chunk
    pub fn bytes_stream(self) -> impl Stream<Item = Result<Bytes>> {
        self.response.bytes_stream().map_err(Error::from)
    }

    /// Copy the body into a writer, returning the number of bytes written
    pub async fn copy_to<W>(self, writer: &mut W) -> Result<u64>
    where
        W: AsyncWrite + Unpin,
    {
        let mut response = self.response;
        let mut written = 0u64;
        while let Some(chunk) = response.chunk().await? {
            writer.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        writer.flush().await?;
        Ok(written)
    }

    /// Give up the wrapper and take the raw response
    pub fn into_inner(self) -> reqwest::Response {
        self.response
    }
}
