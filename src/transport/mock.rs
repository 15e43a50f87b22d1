//! Mock transport for testing purposes.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::transport::{Transport, TransportError};

/// A mock transport that replays queued responses and records every URL it
/// was asked to fetch.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<String, TransportError>>>,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    /// Create a mock with no queued responses.
    ///
    /// Fetching with an empty queue fails, so every expected call needs a
    /// queued response.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response body.
    pub fn push_body(&self, body: impl Into<String>) {
        let mut guard = self.responses.lock().unwrap();
        guard.push_back(Ok(body.into()));
    }

    /// Queue a transport failure.
    pub fn push_failure(&self, reason: impl Into<String>) {
        let mut guard = self.responses.lock().unwrap();
        guard.push_back(Err(TransportError(reason.into())));
    }

    /// The URLs fetched so far, in call order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn fetch(&self, url: &str) -> Result<String, TransportError> {
        self.requests.lock().unwrap().push(url.to_string());
        let mut guard = self.responses.lock().unwrap();
        guard
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no queued response".to_string())))
    }
}
