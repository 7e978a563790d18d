//! The transport seam between the service layer and the network.
//!
//! [`Transport`] performs exactly one HTTP round trip per call. The service
//! layer builds [`TransportRequest`]s, decodes [`TransportResponse`] bodies
//! into raw documents and reports a [`Response`] envelope to its caller. The
//! trait keeps the service testable without a server; [`HttpTransport`] is
//! the `reqwest` implementation used by the CLI.

mod error_mapping;
mod reqwest_transport;

pub use reqwest_transport::{HttpTransport, HttpTransportConfig};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use http::Method;

use crate::stash::error::StashError;
use crate::stash::pagination::PageHints;

/// A single request for the transport to perform.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the server base URL, including any query string.
    pub path: String,
    /// JSON body to send, if any.
    pub body: Option<Value>,
}

impl TransportRequest {
    /// Builds a `GET` request without a body.
    #[must_use]
    pub const fn get(path: String) -> Self {
        Self {
            method: Method::GET,
            path,
            body: None,
        }
    }

    /// Builds a `POST` request with an optional body.
    #[must_use]
    pub const fn post(path: String, body: Option<Value>) -> Self {
        Self {
            method: Method::POST,
            path,
            body,
        }
    }
}

/// The outcome of a successful round trip.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Decoded JSON body, or `None` when the response had no content.
    pub body: Option<Value>,
}

impl TransportResponse {
    /// Builds a response carrying a JSON body.
    #[must_use]
    pub const fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    /// Builds a response without a body.
    #[must_use]
    pub const fn empty(status: u16) -> Self {
        Self { status, body: None }
    }

    /// Decodes the body into a raw document.
    ///
    /// # Errors
    ///
    /// Returns [`StashError::Decode`] when the body is missing or does not
    /// match the document shape.
    pub fn decode<T>(self) -> Result<T, StashError>
    where
        T: DeserializeOwned,
    {
        let body = self.body.ok_or_else(|| StashError::Decode {
            message: format!("expected a response body (status {})", self.status),
        })?;
        serde_json::from_value(body).map_err(|error| StashError::Decode {
            message: error.to_string(),
        })
    }
}

/// Response envelope returned to service callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Pagination hints, set by list operations.
    pub page: PageHints,
}

impl Response {
    /// Builds an envelope without pagination hints.
    #[must_use]
    pub const fn new(status: u16) -> Self {
        Self {
            status,
            page: PageHints { first: 0, next: 0 },
        }
    }

    /// Returns the envelope with the given pagination hints.
    #[must_use]
    pub const fn with_page(mut self, page: PageHints) -> Self {
        self.page = page;
        self
    }
}

/// Performs HTTP round trips against a Stash server.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends one request and returns the decoded response.
    ///
    /// Implementations map non-success statuses and network failures to
    /// [`StashError`] and must not retry.
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, StashError>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Response, TransportResponse};
    use crate::stash::api::ApiCommentProperties;
    use crate::stash::error::StashError;
    use crate::stash::pagination::PageHints;

    #[test]
    fn decode_reads_json_body() {
        let response = TransportResponse::json(200, json!({ "repositoryId": 4 }));
        let properties: ApiCommentProperties = response.decode().expect("body should decode");
        assert_eq!(properties.repository_id, 4);
    }

    #[test]
    fn decode_without_body_fails() {
        let result = TransportResponse::empty(204).decode::<ApiCommentProperties>();
        assert!(
            matches!(result, Err(StashError::Decode { .. })),
            "expected Decode, got {result:?}"
        );
    }

    #[test]
    fn decode_shape_mismatch_fails() {
        let result = TransportResponse::json(200, json!([1, 2])).decode::<ApiCommentProperties>();
        assert!(
            matches!(result, Err(StashError::Decode { .. })),
            "expected Decode, got {result:?}"
        );
    }

    #[test]
    fn response_envelope_starts_without_hints() {
        let response = Response::new(200);
        assert!(!response.page.has_next());
        let paged = response.with_page(PageHints { first: 1, next: 2 });
        assert_eq!(paged.page.next, 2);
        assert_eq!(paged.status, 200);
    }
}
