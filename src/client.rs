//! High-level client composing the Query Builder, the transport and the
//! Response Normalizer.

use std::sync::Arc;

use crate::error::ClientError;
use crate::models::{ApiResponse, BrowseFeed, PostFilters, Request, Skin, Version};
use crate::normalize::normalize;
use crate::query::{build_url, DEFAULT_HOST};
use crate::transport::{HttpTransport, Transport, TransportError};

/// Client for the service's read endpoints.
///
/// Each operation performs one outbound GET and returns an [`ApiResponse`]
/// carrying both the built URL and the normalized body, so nothing about a
/// call survives on the client itself. The client is `Send + Sync`; clones
/// share the transport.
///
/// # Example
///
/// ```rust,no_run
/// use bliptv_client::{BlipClient, PostFilters, Skin};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = BlipClient::new(Skin::Json)?;
/// let response = client
///     .posts(PostFilters::new().channel("mercyscross").count(5))
///     .await?;
/// for record in response.body.records().unwrap_or_default() {
///     println!("{:?}", record.get("title"));
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BlipClient {
    transport: Arc<dyn Transport>,
    host: String,
    skin: Skin,
    version: Version,
}

impl BlipClient {
    /// Create a client with the default HTTP transport.
    pub fn new(skin: Skin) -> Result<Self, TransportError> {
        Ok(Self::with_transport(skin, Arc::new(HttpTransport::new()?)))
    }

    /// Create a client with a caller-supplied transport.
    pub fn with_transport(skin: Skin, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            host: DEFAULT_HOST.to_string(),
            skin,
            version: Version::default(),
        }
    }

    /// Set the pseudo-JSON protocol version (ignored for XML skins).
    pub fn version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    /// Override the service host, e.g. for a test server. No scheme.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Browse one of the video feeds (popular, recent, random, featured).
    pub async fn browse(
        &self,
        feed: BrowseFeed,
        page: Option<u32>,
    ) -> Result<ApiResponse, ClientError> {
        self.execute(&Request::Browse { feed, page }).await
    }

    /// List posts, optionally scoped to a channel and filtered.
    pub async fn posts(&self, filters: PostFilters) -> Result<ApiResponse, ClientError> {
        self.execute(&Request::Posts(filters)).await
    }

    /// Search videos by phrase.
    ///
    /// The service has no per-user search; the search section accepts only
    /// the phrase and a page number.
    pub async fn search(
        &self,
        phrase: impl Into<String>,
        page: Option<u32>,
    ) -> Result<ApiResponse, ClientError> {
        self.execute(&Request::Search {
            phrase: phrase.into(),
            page,
        })
        .await
    }

    /// Fetch details for a single file by id.
    pub async fn video_info(&self, id: u64) -> Result<ApiResponse, ClientError> {
        self.execute(&Request::FileDetail { id }).await
    }

    /// Fetch the list of supported licenses.
    ///
    /// Always XML: the service's JSON rendition of this endpoint is broken,
    /// so the configured skin is overridden for this one call.
    pub async fn licenses(&self) -> Result<ApiResponse, ClientError> {
        self.execute(&Request::Licenses).await
    }

    /// Execute an arbitrary [`Request`]: build the URL, fetch it once, and
    /// normalize the response for the effective skin.
    pub async fn execute(&self, request: &Request) -> Result<ApiResponse, ClientError> {
        let skin = request.forced_skin().unwrap_or(self.skin);
        let url = build_url(&self.host, request, self.skin, self.version);

        tracing::debug!("requesting {}", url);

        let raw = self
            .transport
            .fetch(&url)
            .await
            .map_err(|e| ClientError::transport(&url, e.to_string()))?;

        let body = normalize(&raw, skin, self.version, &url)?;
        Ok(ApiResponse {
            request_url: url,
            body,
        })
    }
}
