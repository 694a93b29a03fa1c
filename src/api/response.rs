//! Response envelope returned by every router endpoint.

use serde::Deserialize;
use serde_json::Value;

use super::Error;

/// Parsed `{success, error, data}` envelope.
///
/// `error` and `data` have no fixed schema and are kept as JSON trees.
/// Missing fields decode as `false` / `null`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope {
    /// Whether the router applied the request
    #[serde(default)]
    pub success: bool,
    /// Error payload, usually a string
    #[serde(default)]
    pub error: Value,
    /// Result payload
    #[serde(default)]
    pub data: Value,
}

impl Envelope {
    /// Parses an envelope from a raw response body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the body is not a JSON envelope.
    pub fn parse(body: &[u8]) -> Result<Self, Error> {
        serde_json::from_slice(body).map_err(Error::Decode)
    }

    /// Turns the envelope into the `data` payload or an API error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] carrying the stringified `error` field when
    /// `success` is false.
    pub fn into_data(self) -> Result<Value, Error> {
        if self.success {
            Ok(self.data)
        } else {
            Err(Error::Api(error_message(&self.error)))
        }
    }
}

/// Decodes a response body, discarding any payload.
pub(crate) fn decode(body: &[u8]) -> Result<(), Error> {
    Envelope::parse(body)?.into_data().map(drop)
}

/// Decodes a response body and returns its payload.
pub(crate) fn decode_data(body: &[u8]) -> Result<Value, Error> {
    Envelope::parse(body)?.into_data()
}

fn error_message(error: &Value) -> String {
    match error {
        Value::String(message) => message.clone(),
        Value::Null => "unknown error".to_string(),
        other => other.to_string(),
    }
}
