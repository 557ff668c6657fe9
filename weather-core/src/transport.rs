//! HTTP transport seam.
//!
//! The provider never talks to `reqwest` directly; it goes through
//! [`HttpTransport`], so tests can swap in a scripted transport.

use async_trait::async_trait;
use reqwest::Client;
use std::{error::Error as _, fmt::Debug, time::Duration};
use thiserror::Error;
use tracing::trace;

/// Raw response: status code plus the full body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self { status, body: body.into() }
    }

    /// 4xx or 5xx.
    pub fn is_error(&self) -> bool {
        self.status >= 400
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    /// DNS failure, refused or unreachable host.
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connect(error_chain(&err))
        } else {
            TransportError::Other(error_chain(&err))
        }
    }
}

/// Performs a single GET. Implementations must not retry.
#[async_trait]
pub trait HttpTransport: Send + Sync + Debug {
    async fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, TransportError>;
}

/// Production transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self { http: Client::new() }
    }

    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, TransportError> {
        let res = self.http.get(url).timeout(timeout).send().await?;

        let status = res.status().as_u16();
        let body = res.bytes().await?;
        trace!(status, bytes = body.len(), "received response");

        Ok(HttpResponse { status, body: body.to_vec() })
    }
}

/// `reqwest` hides the interesting part (e.g. "connection refused") in the
/// source chain.
fn error_chain(err: &reqwest::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}
