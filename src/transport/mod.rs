//! Outbound transport seam.
//!
//! The client only needs "given a URL, return the response body or fail";
//! everything HTTP-specific lives behind the [`Transport`] trait. Timeouts
//! and any retry policy a caller wants belong to the transport, not to the
//! normalization core.

pub mod mock;

pub use mock::MockTransport;

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// A transport-level failure, reported once per call.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Performs the single HTTP GET for a built request URL.
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Fetch the raw response body for `url`.
    async fn fetch(&self, url: &str) -> Result<String, TransportError>;
}

/// Default transport backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with the default user agent and timeouts
    pub fn new() -> Result<Self, TransportError> {
        Self::with_user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
    }

    /// Create a transport with a custom user agent
    pub fn with_user_agent(user_agent: &str) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| TransportError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Create from an existing reqwest client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, url: &str) -> Result<String, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TransportError(format!(
                "server returned status: {}",
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| TransportError(format!("failed to read body: {}", e)))
    }
}
