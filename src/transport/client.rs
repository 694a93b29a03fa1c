//! Production HTTP client implementation using reqwest.

use std::time::Duration;

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Production HTTP client using reqwest.
///
/// A thin wrapper around `reqwest::Client` that implements [`HttpClient`].
/// Connection pooling comes from reqwest; clones share the same pool.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use vyos_client::transport::{HttpClient, HttpRequest, ReqwestClient};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ReqwestClient::with_settings(Duration::from_secs(10), true)?;
/// let url = Url::parse("https://192.0.2.1/retrieve")?;
/// let response = client.request(HttpRequest::post(url)).await?;
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a client with the given request timeout and TLS policy.
    ///
    /// A zero `timeout` disables the timeout. When `skip_tls_verify` is set,
    /// invalid and self-signed certificates are accepted, which is what a
    /// factory-fresh router presents.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Build`] if the TLS backend cannot be initialised.
    pub fn with_settings(timeout: Duration, skip_tls_verify: bool) -> Result<Self, HttpError> {
        let mut builder = reqwest::Client::builder().danger_accept_invalid_certs(skip_tls_verify);
        if !timeout.is_zero() {
            builder = builder.timeout(timeout);
        }

        let inner = builder
            .build()
            .map_err(|e| HttpError::Build(Box::new(e)))?;
        Ok(Self { inner })
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut builder = self.inner.request(req.method, req.url.as_str());

        for (name, value) in &req.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                HttpError::Timeout
            } else if e.is_builder() {
                HttpError::InvalidUrl(e.to_string())
            } else {
                HttpError::Connection(Box::new(e))
            }
        })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    HttpError::Timeout
                } else {
                    HttpError::Connection(Box::new(e))
                }
            })?
            .to_vec();

        Ok(HttpResponse::new(status, body))
    }
}
