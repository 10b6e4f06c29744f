//! HTTP transports used by the clients.
//!
//! [`Client`](crate::Client) talks to ALKS through the [`Transport`] trait so
//! tests (or callers with special networking needs) can substitute their own
//! implementation. [`ReqwestTransport`] is the default.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::exec::RawResponse;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) const USER_AGENT: &str = concat!("rs-alks/", env!("CARGO_PKG_VERSION"));

/// Sends one JSON POST and returns the raw status and body.
///
/// Implementations must not inspect the status; classification happens
/// afterwards. Failures below HTTP should be returned as
/// [`AlksError::Network`](crate::AlksError::Network).
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(&self, url: &str, body: &Value) -> Result<RawResponse>;
}

/// [`Transport`] backed by `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with the default timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { http })
    }

    /// Wraps an already configured reqwest client.
    pub fn from_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<RawResponse> {
        let response = self
            .http
            .post(url)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}

/// Blocking counterpart of [`Transport`].
#[cfg(feature = "blocking")]
pub trait BlockingTransport: Send + Sync {
    fn post_json(&self, url: &str, body: &Value) -> Result<RawResponse>;
}

/// [`BlockingTransport`] backed by `reqwest::blocking::Client`.
#[cfg(feature = "blocking")]
#[derive(Debug, Clone)]
pub struct BlockingReqwestTransport {
    http: reqwest::blocking::Client,
}

#[cfg(feature = "blocking")]
impl BlockingReqwestTransport {
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { http })
    }

    pub fn from_client(http: reqwest::blocking::Client) -> Self {
        Self { http }
    }
}

#[cfg(feature = "blocking")]
impl BlockingTransport for BlockingReqwestTransport {
    fn post_json(&self, url: &str, body: &Value) -> Result<RawResponse> {
        let response = self
            .http
            .post(url)
            .header("Content-Type", "application/json")
            .json(body)
            .send()?;

        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(RawResponse { status, body })
    }
}
