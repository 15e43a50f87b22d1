//! Error taxonomy for client operations.

use crate::models::Skin;

/// Errors that can occur while fetching or normalizing a response.
///
/// Every failure surfaces as an `Err` value with a human-readable message;
/// the client instance remains usable for subsequent calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The transport collaborator failed or returned an empty body
    #[error("data retrieval failed for url: {url}: {reason}")]
    Transport {
        /// The URL that was attempted
        url: String,
        /// What went wrong at the transport layer
        reason: String,
    },

    /// The operation was invoked with a response format it does not support
    #[error("wrong response format for this operation: {0}")]
    FormatMismatch(Skin),

    /// The payload could not be decoded after envelope repair
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The service reported an application-level error inside the envelope
    #[error("{0}")]
    Upstream(String),

    /// The pagination trailer did not yield exactly two name:value pairs
    #[error("malformed pagination trailer: {0}")]
    PaginationParse(String),
}

impl ClientError {
    pub(crate) fn transport(url: &str, reason: impl Into<String>) -> Self {
        ClientError::Transport {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(format!("JSON: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_message_names_url() {
        let err = ClientError::transport("http://blip.tv/recent/?skin=rss", "empty response body");
        let msg = err.to_string();
        assert!(msg.contains("http://blip.tv/recent/?skin=rss"));
        assert!(msg.contains("data retrieval failed"));
    }

    #[test]
    fn test_upstream_message_is_verbatim() {
        let err = ClientError::Upstream("Invalid topic name".to_string());
        assert_eq!(err.to_string(), "Invalid topic name");
    }
}
