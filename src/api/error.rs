//! Error types for router API calls.

use thiserror::Error;

use super::IpVersion;
use crate::transport::HttpError;

/// Error returned by every [`VyosClient`](super::VyosClient) operation.
#[derive(Debug, Error)]
pub enum Error {
    /// Input was rejected before any request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request never got a response.
    #[error("Transport error: {0}")]
    Transport(#[from] HttpError),

    /// The router answered with a status outside 200–299.
    ///
    /// The raw body is kept for diagnostics.
    #[error("non 2xx response code received, code: {}, resp: {body}", .status.as_u16())]
    Status {
        /// Status code returned by the router
        status: http::StatusCode,
        /// Raw response body
        body: String,
    },

    /// The response body was not a valid envelope.
    #[error("Failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The actions could not be serialised.
    #[error("Failed to encode action: {0}")]
    Encode(#[source] serde_json::Error),

    /// The router reported `success: false`.
    #[error("VyOS API error: {0}")]
    Api(String),

    /// The configured host is not a usable base URL.
    #[error("Invalid host '{host}': {reason}")]
    InvalidHost {
        /// The host string as configured
        host: String,
        /// Reason for invalidity
        reason: String,
    },
}

impl Error {
    /// Returns true if the error was raised locally, before any network call.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Local input validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Value is not in `address/prefix` notation.
    #[error("invalid {field} '{value}': must be in CIDR format, e.g. 192.168.1.1/24")]
    InvalidCidr {
        /// Name of the argument
        field: &'static str,
        /// The rejected value
        value: String,
    },

    /// Value is not an IP address.
    #[error("invalid {field} '{value}': not an IP address")]
    InvalidIp {
        /// Name of the argument
        field: &'static str,
        /// The rejected value
        value: String,
    },

    /// Two addresses that must share a family do not.
    #[error("address family mismatch: {left} is {left_version}, {right} is {right_version}")]
    FamilyMismatch {
        /// First address
        left: String,
        /// Family of the first address
        left_version: IpVersion,
        /// Second address
        right: String,
        /// Family of the second address
        right_version: IpVersion,
    },

    /// An address does not match the requested family.
    #[error("{field} '{value}' is not an {expected} address")]
    VersionMismatch {
        /// Name of the argument
        field: &'static str,
        /// The rejected value
        value: String,
        /// Family the caller asked for
        expected: IpVersion,
    },

    /// IP version number other than 4 or 6.
    #[error("unsupported IP version {0}: expected 4 or 6")]
    UnsupportedVersion(u8),
}
