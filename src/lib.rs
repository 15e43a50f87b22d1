//! # Blip.TV Client
//!
//! A client for the Blip.TV legacy HTTP API. The service exposes its read
//! endpoints through URL path conventions and a `skin` query parameter that
//! selects between three response formats: a pseudo-JSON format (invalid
//! JSON that this crate repairs and decodes) and two XML-family formats
//! (`api` and RSS, returned verbatim and unparsed).
//!
//! ## Architecture
//!
//! - [`models`]: request descriptors (sections, skins, per-endpoint filter
//!   records) and normalized responses (records, pagination)
//! - [`query`]: translation of a request into a fully-formed URL
//! - `normalize` (internal): repair and decoding of the pseudo-JSON envelope
//! - [`transport`]: the outbound HTTP seam, with a reqwest default and a
//!   mock for tests
//! - [`client`]: the [`BlipClient`] composing the above per call
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use bliptv_client::{BlipClient, BrowseFeed, Skin};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = BlipClient::new(Skin::Json)?;
//! let response = client.browse(BrowseFeed::Popular, None).await?;
//! println!("fetched {}", response.request_url);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod models;
pub mod query;
pub mod transport;

mod normalize;

// Re-export commonly used types
pub use client::BlipClient;
pub use error::ClientError;
pub use models::{
    ApiResponse, BrowseFeed, Pagination, PostFilters, Record, Request, ResponseBody, Section,
    Skin, SortBy, Version,
};
pub use transport::{HttpTransport, MockTransport, Transport, TransportError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
