//! Shared test utilities for CLI tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use stash_pulls::{StashError, Transport, TransportRequest, TransportResponse};

/// A transport that records requests and replays one canned response.
#[derive(Clone, Default)]
pub struct CapturingTransport {
    /// Requests received so far.
    pub captured: Arc<Mutex<Vec<TransportRequest>>>,
    /// Response to return (consumed on first call).
    pub response: Arc<Mutex<Option<Result<TransportResponse, StashError>>>>,
}

impl CapturingTransport {
    /// Creates a transport that answers once with `response`.
    pub fn answering(response: Result<TransportResponse, StashError>) -> Self {
        Self {
            captured: Arc::default(),
            response: Arc::new(Mutex::new(Some(response))),
        }
    }

    /// Returns the paths of the captured requests.
    pub fn paths(&self) -> Vec<String> {
        self.captured
            .lock()
            .expect("captured mutex should be available")
            .iter()
            .map(|request| request.path.clone())
            .collect()
    }
}

#[async_trait]
impl Transport for CapturingTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, StashError> {
        self.captured
            .lock()
            .expect("captured mutex should be available")
            .push(request);

        self.response
            .lock()
            .expect("response mutex should be available")
            .take()
            .expect("response should only be consumed once")
    }
}
