//! Error types for HTTP operations.

use thiserror::Error;

/// Error type for a single HTTP exchange.
///
/// Only failures that prevent a response from arriving are represented here.
/// A response with a non-2xx status is still a response; classifying it is
/// left to the caller.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, refused connections,
    /// and TLS handshake errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The router did not answer within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// The request URL could not be used.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] Box<dyn std::error::Error + Send + Sync>),
}
