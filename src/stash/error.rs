//! Error types exposed by the Stash pull request layer.

use thiserror::Error;

/// Errors surfaced while talking to a Stash server or preparing a request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StashError {
    /// The operation is not supported by the Stash driver.
    #[error("operation not supported by Stash: {operation}")]
    Unsupported {
        /// Name of the rejected operation.
        operation: &'static str,
    },

    /// The server rejected the supplied credentials.
    #[error("Stash rejected the token: {message}")]
    Authentication {
        /// Message returned with the 401/403 response.
        message: String,
    },

    /// Stash returned a non-authentication API error.
    #[error("Stash API error ({status}): {message}")]
    Api {
        /// HTTP status code of the failed response.
        status: u16,
        /// First error message from the response body, or a fallback.
        message: String,
    },

    /// Networking failed while calling Stash.
    #[error("network error talking to Stash: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// A response body did not match the expected document shape.
    #[error("failed to decode Stash response: {message}")]
    Decode {
        /// Decoder error detail.
        message: String,
    },

    /// An outbound document could not be encoded.
    #[error("failed to encode Stash request: {message}")]
    Encode {
        /// Encoder error detail.
        message: String,
    },

    /// The configured server URL could not be parsed.
    #[error("server URL is invalid: {0}")]
    InvalidUrl(String),

    /// Configuration could not be loaded or is incomplete.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}

impl StashError {
    /// Returns true when the error is the unsupported-operation sentinel.
    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}
