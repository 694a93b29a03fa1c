//! Client construction settings.

use std::fmt;
use std::time::Duration;

use url::Url;

/// Content type of every request body.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Checks that `host` can serve as the API base URL.
///
/// The host must be an absolute `http` or `https` URL without a query or
/// fragment. Returns it with any trailing `/` removed, ready for endpoint
/// names to be appended.
///
/// # Errors
///
/// Returns the reason the host was rejected.
pub fn normalize_host(host: &str) -> Result<String, String> {
    let url = Url::parse(host).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!(
            "scheme must be http or https, got '{}'",
            url.scheme()
        ));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err("query and fragment are not allowed".to_string());
    }

    Ok(host.trim_end_matches('/').to_string())
}

/// Settings captured when a [`VyosClient`](super::VyosClient) is built.
///
/// Values are read once at construction; changing a `ClientConfig` afterwards
/// has no effect on clients already built from it.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use vyos_client::ClientConfig;
///
/// let config = ClientConfig::new("https://192.0.2.1")
///     .with_api_key("secret")
///     .with_skip_tls_verify(true)
///     .with_timeout(Duration::from_secs(10));
/// assert_eq!(config.host, "https://192.0.2.1");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the router API, e.g. `https://192.0.2.1`
    pub host: String,
    /// Key sent in the `key` form field
    pub api_key: String,
    /// Accept invalid and self-signed certificates
    pub skip_tls_verify: bool,
    /// Per-request timeout; zero disables it
    pub timeout: Duration,
}

impl ClientConfig {
    /// Creates settings for `host` with no key, strict TLS and the default timeout.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            api_key: String::new(),
            skip_tls_verify: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Sets whether certificate verification is skipped.
    #[must_use]
    pub const fn with_skip_tls_verify(mut self, skip: bool) -> Self {
        self.skip_tls_verify = skip;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_empty() {
            "<empty>"
        } else {
            "<redacted>"
        };
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("api_key", &api_key)
            .field("skip_tls_verify", &self.skip_tls_verify)
            .field("timeout", &self.timeout)
            .finish()
    }
}
